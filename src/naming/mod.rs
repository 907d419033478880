//! Deterministic file names for output groups.
//!
//! Effective groups are named `date_company_type.pdf`, or
//! `date_company_type_person様.pdf` when a person is known. Excluded groups
//! all share one reserved name because they are merged into a single output.
//! Repeated names are numbered `_2`, `_3`, ... in emission order.

mod options;

pub use options::{
    NamingOptions, DEFAULT_EXCLUDED_FILE_NAME, DEFAULT_EXTENSION, DEFAULT_HONORIFIC,
    DEFAULT_NO_PERSON,
};

use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;

use crate::model::Group;

/// Characters that are not allowed in file names on common platforms.
const RESERVED_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replace reserved path characters and control characters with `_`.
///
/// The text is NFC-normalized first so composed and decomposed kana produce
/// the same name.
pub fn sanitize_segment(segment: &str) -> String {
    segment
        .nfc()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Split `name` into its base and `extension` (if it ends with it, ignoring case).
pub fn split_extension<'a>(name: &'a str, extension: &str) -> (&'a str, &'a str) {
    if !extension.is_empty()
        && name.len() >= extension.len()
        && name.is_char_boundary(name.len() - extension.len())
    {
        let at = name.len() - extension.len();
        if name[at..].eq_ignore_ascii_case(extension) {
            return (&name[..at], &name[at..]);
        }
    }
    (name, "")
}

/// Number repeated names in order.
///
/// The first occurrence of a base name keeps it; later ones get `_2`, `_3`, ...
/// A suffixed name that is already taken is skipped to the next number.
pub fn resolve_collisions<I>(names: I, extension: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    CollisionResolver::new(extension).resolve_all(names)
}

/// Stateful collision numbering.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    extension: String,
    counts: HashMap<String, usize>,
    used: HashSet<String>,
}

impl CollisionResolver {
    /// Create a resolver for names ending in `extension`.
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            ..Self::default()
        }
    }

    /// Claim `name` so later names cannot take it.
    pub fn reserve(&mut self, name: &str) {
        let (base, _) = split_extension(name, &self.extension);
        *self.counts.entry(base.to_string()).or_insert(0) += 1;
        self.used.insert(name.to_string());
    }

    /// Return a unique version of `name`.
    pub fn resolve(&mut self, name: String) -> String {
        let (base, ext) = split_extension(&name, &self.extension);
        let (base, ext) = (base.to_string(), ext.to_string());
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            name
        } else {
            format!("{}_{}{}", base, count, ext)
        };
        while self.used.contains(&candidate) {
            *count += 1;
            candidate = format!("{}_{}{}", base, count, ext);
        }

        self.used.insert(candidate.clone());
        candidate
    }

    /// Resolve every name in order.
    pub fn resolve_all<I>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        names.into_iter().map(|n| self.resolve(n)).collect()
    }
}

/// Builds file names for groups.
#[derive(Debug, Clone, Default)]
pub struct NameSynthesizer {
    options: NamingOptions,
}

impl NameSynthesizer {
    /// Create a synthesizer.
    pub fn new(options: NamingOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &NamingOptions {
        &self.options
    }

    /// Name for one group, before collision numbering.
    pub fn name_for_group(&self, group: &Group) -> String {
        let opts = &self.options;
        if group.is_excluded_data {
            return opts.excluded_file_name.clone();
        }

        if let Some(name) = self.manual_name(&group.manual_file_name) {
            return name;
        }

        let date = sanitize_segment(&group.envelope_info.date);
        let company = sanitize_segment(&group.envelope_info.company_name);
        let document_type = sanitize_segment(&group.document_type);
        let person = group.person_name.trim();

        if person.is_empty() || person == opts.no_person_marker {
            format!("{}_{}_{}{}", date, company, document_type, opts.extension)
        } else {
            format!(
                "{}_{}_{}_{}{}{}",
                date,
                company,
                document_type,
                sanitize_segment(person),
                opts.honorific,
                opts.extension
            )
        }
    }

    /// Final names for all groups, in emission order.
    ///
    /// Effective groups are numbered against each other; excluded groups all
    /// keep the reserved name, which no effective group may take.
    pub fn name_groups(&self, groups: &[Group]) -> Vec<String> {
        self.name_groups_with(groups, true)
    }

    /// Like [`name_groups`](Self::name_groups), but the reserved name is only
    /// claimed when `reserve_excluded` is set and an excluded group exists.
    pub fn name_groups_with(&self, groups: &[Group], reserve_excluded: bool) -> Vec<String> {
        let mut resolver = CollisionResolver::new(&self.options.extension);
        if reserve_excluded && groups.iter().any(|g| g.is_excluded_data) {
            resolver.reserve(&self.options.excluded_file_name);
        }

        groups
            .iter()
            .map(|group| {
                let name = self.name_for_group(group);
                if group.is_excluded_data {
                    name
                } else {
                    resolver.resolve(name)
                }
            })
            .collect()
    }

    /// Sanitized manual name, or `None` when it has no usable base.
    fn manual_name(&self, manual: &str) -> Option<String> {
        let name = sanitize_segment(manual.trim());
        let (base, ext) = split_extension(&name, &self.options.extension);
        if base.trim().is_empty() {
            return None;
        }
        if ext.is_empty() {
            Some(format!("{}{}", name, self.options.extension))
        } else {
            Some(name)
        }
    }
}

/// Name one group with the default options.
pub fn name_for_group(group: &Group) -> String {
    NameSynthesizer::default().name_for_group(group)
}
