//! Output assembly: turns named groups into document blobs.
//!
//! Every effective group becomes one output. All excluded pages of the run are
//! merged into a single output under the reserved name. Each output is
//! extracted with one call to a [`PageSource`]; a failed call is recorded and
//! the remaining outputs are still produced.

mod options;

pub use options::AssembleOptions;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{AssembledDocument, AssemblyFailure, Group, Manifest, OutputDocument};
use crate::naming::NameSynthesizer;

/// Produces a new document from a list of source pages.
///
/// Page numbers are 1-based; the result holds exactly those pages in the
/// given order.
pub trait PageSource: Sync {
    /// Extract `pages` into a new document.
    fn extract_pages(&self, pages: &[u32]) -> Result<Vec<u8>>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn extract_pages(&self, pages: &[u32]) -> Result<Vec<u8>> {
        (**self).extract_pages(pages)
    }
}

/// Result of an assembly run.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Produced outputs, in planned order
    pub outputs: Vec<AssembledDocument>,
    /// Outputs that could not be produced, in planned order
    pub failures: Vec<AssemblyFailure>,
}

impl Assembly {
    /// Check if every planned output was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serializable summary without the document bytes.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            outputs: self.outputs.iter().map(|o| o.document.clone()).collect(),
            failures: self.failures.clone(),
        }
    }
}

/// Plans and extracts output documents.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    naming: NameSynthesizer,
    options: AssembleOptions,
}

impl Assembler {
    /// Create an assembler.
    pub fn new(naming: NameSynthesizer, options: AssembleOptions) -> Self {
        Self { naming, options }
    }

    /// Options in use.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Output descriptors for `groups`, without extracting anything.
    ///
    /// Effective groups come first in emission order, followed by the single
    /// excluded output (if any page was excluded and it is enabled). Ids are
    /// positions in this list.
    pub fn plan(&self, groups: &[Group]) -> Vec<OutputDocument> {
        let names = self
            .naming
            .name_groups_with(groups, self.options.include_excluded);
        let mut planned: Vec<OutputDocument> = groups
            .iter()
            .zip(names)
            .filter(|(group, _)| group.is_effective())
            .enumerate()
            .map(|(id, (group, file_name))| OutputDocument {
                id,
                file_name,
                page_numbers: sorted_pages(group.page_numbers()),
                is_excluded: false,
            })
            .collect();

        if self.options.include_excluded {
            let excluded = sorted_pages(
                groups
                    .iter()
                    .filter(|g| g.is_excluded_data)
                    .flat_map(|g| g.page_numbers())
                    .collect(),
            );
            if !excluded.is_empty() {
                planned.push(OutputDocument {
                    id: planned.len(),
                    file_name: self.naming.options().excluded_file_name.clone(),
                    page_numbers: excluded,
                    is_excluded: true,
                });
            }
        }

        planned
    }

    /// Plan and extract all outputs for `groups`.
    pub fn assemble<S: PageSource + ?Sized>(&self, source: &S, groups: &[Group]) -> Assembly {
        self.assemble_planned(source, self.plan(groups), |_| {})
    }

    /// Extract already planned outputs.
    ///
    /// `progress` is called once per finished output, possibly from several
    /// threads. Results keep the planned order regardless of completion order.
    pub fn assemble_planned<S, F>(
        &self,
        source: &S,
        planned: Vec<OutputDocument>,
        progress: F,
    ) -> Assembly
    where
        S: PageSource + ?Sized,
        F: Fn(&OutputDocument) + Sync,
    {
        let total = planned.len();
        let extract = |document: OutputDocument| {
            let result = extract_one(source, document);
            match &result {
                Ok(done) => progress(&done.document),
                Err((document, _)) => progress(document),
            }
            result
        };

        let results: Vec<_> = if self.options.parallel {
            planned.into_par_iter().map(extract).collect()
        } else {
            planned.into_iter().map(extract).collect()
        };

        let mut assembly = Assembly::default();
        for result in results {
            match result {
                Ok(done) => assembly.outputs.push(done),
                Err((document, error)) => assembly.failures.push(AssemblyFailure {
                    id: document.id,
                    file_name: document.file_name,
                    page_numbers: document.page_numbers,
                    is_excluded: document.is_excluded,
                    error: error.to_string(),
                }),
            }
        }

        log::info!(
            "Assembled {} of {} outputs ({} failed)",
            assembly.outputs.len(),
            total,
            assembly.failures.len()
        );
        assembly
    }
}

fn extract_one<S: PageSource + ?Sized>(
    source: &S,
    document: OutputDocument,
) -> std::result::Result<AssembledDocument, (OutputDocument, Error)> {
    match source.extract_pages(&document.page_numbers) {
        Ok(data) => {
            log::debug!(
                "Output {} '{}': {} pages, {} bytes",
                document.id,
                document.file_name,
                document.page_count(),
                data.len()
            );
            Ok(AssembledDocument { document, data })
        }
        Err(err) => {
            let err = match err {
                Error::Extraction { .. } => err,
                other => Error::extraction(&document.page_numbers, other),
            };
            log::warn!(
                "Skipping output {} '{}': {}",
                document.id,
                document.file_name,
                err
            );
            Err((document, err))
        }
    }
}

fn sorted_pages(mut pages: Vec<u32>) -> Vec<u32> {
    pages.sort_unstable();
    pages.dedup();
    pages
}
