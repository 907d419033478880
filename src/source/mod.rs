//! Source PDF access through lopdf.
//!
//! [`SourceDocument`] provides per-page text for classification and builds
//! new PDFs out of selected pages for the assembler.

mod header;
mod options;

pub use header::{is_pdf, read_header, read_header_from_path, PdfHeader};
pub use options::{ErrorMode, SourceOptions};

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::assemble::PageSource;
use crate::error::{Error, Result};
use crate::model::Page;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: &[&[u8]] = &[b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page trees deeper than this are treated as corrupt.
const MAX_TREE_DEPTH: usize = 64;

/// A loaded source PDF.
pub struct SourceDocument {
    doc: LopdfDocument,
    header: PdfHeader,
    options: SourceOptions,
}

impl SourceDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, SourceOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: SourceOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, SourceOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: SourceOptions) -> Result<Self> {
        let header = read_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;

        if doc.is_encrypted() {
            log::warn!("Source PDF is encrypted; page text may be unreadable");
        }

        log::info!("Loaded {} with {} pages", header, doc.get_pages().len());
        Ok(Self {
            doc,
            header,
            options,
        })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Text of one page (1-based).
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        let count = self.page_count();
        if page_number == 0 || page_number > count {
            return Err(Error::PageOutOfRange(page_number, count));
        }
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::extraction(&[page_number], e))
    }

    /// All pages with their text, in document order.
    pub fn pages(&self) -> Result<Vec<Page>> {
        (1..=self.page_count())
            .map(|n| match self.page_text(n) {
                Ok(text) => Ok(Page::new(n, text)),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", n, e);
                    Ok(Page::new(n, String::new()))
                }
                Err(e) => Err(e),
            })
            .collect()
    }

    /// Build a new PDF holding `pages` in the given order.
    pub fn extract(&self, pages: &[u32]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(Error::EmptyPageList);
        }

        let page_ids = self.doc.get_pages();
        let count = page_ids.len() as u32;
        let mut seen = HashSet::with_capacity(pages.len());
        let mut kept: Vec<ObjectId> = Vec::with_capacity(pages.len());
        for &number in pages {
            let id = *page_ids
                .get(&number)
                .ok_or(Error::PageOutOfRange(number, count))?;
            if seen.insert(number) {
                kept.push(id);
            } else {
                log::warn!(
                    "Page {} requested more than once; keeping the first",
                    number
                );
            }
        }

        // Only objects reachable from the kept pages are copied into the new document.
        let mut out = LopdfDocument::with_version(self.doc.version.clone());
        out.max_id = self.doc.max_id;
        let tree_id = out.new_object_id();

        let mut pending = Vec::new();
        for &page_id in &kept {
            let mut page = self.doc.get_dictionary(page_id)?.clone();
            for (key, value) in inherited_attributes(&self.doc, page_id) {
                if !page.has(key) {
                    page.set(key, value);
                }
            }
            page.set("Parent", Object::Reference(tree_id));
            let page = Object::Dictionary(page);
            collect_references(&page, &mut pending);
            out.objects.insert(page_id, page);
        }
        copy_reachable(&self.doc, &mut out, pending);

        let kids: Vec<Object> = kept.iter().map(|&id| Object::Reference(id)).collect();
        out.objects.insert(
            tree_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
            }),
        );
        let catalog_id = out.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => tree_id,
        });
        out.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        out.save_to(&mut data)?;
        log::debug!("Extracted pages {:?} ({} bytes)", pages, data.len());
        Ok(data)
    }
}

impl PageSource for SourceDocument {
    fn extract_pages(&self, pages: &[u32]) -> Result<Vec<u8>> {
        self.extract(pages)
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("version", &self.header.version)
            .field("pages", &self.page_count())
            .finish()
    }
}

/// Inheritable attributes found on the ancestors of `page_id`, nearest first.
fn inherited_attributes(doc: &LopdfDocument, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let mut found: Vec<(&'static [u8], Object)> = Vec::new();
    let mut parent = parent_of(doc, page_id);
    let mut depth = 0;

    while let Some(node_id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            log::warn!("Page tree above {:?} is too deep; stopping", page_id);
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        for &key in INHERITABLE {
            if found.iter().any(|(k, _)| *k == key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                found.push((key, value.clone()));
            }
        }
        parent = parent_of(doc, node_id);
    }

    found
}

/// Copy every object reachable from `pending` into `out`.
///
/// `Parent` links are not followed and pages other than those already in
/// `out` are left behind, so the rest of the source page tree stays out.
fn copy_reachable(doc: &LopdfDocument, out: &mut LopdfDocument, mut pending: Vec<ObjectId>) {
    while let Some(id) = pending.pop() {
        if out.objects.contains_key(&id) {
            continue;
        }
        let Ok(object) = doc.get_object(id) else {
            log::debug!("Dangling reference {:?}", id);
            continue;
        };
        if is_page(object) {
            continue;
        }
        collect_references(object, &mut pending);
        out.objects.insert(id, object.clone());
    }
}

fn collect_references(object: &Object, pending: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => pending.push(*id),
        Object::Array(items) => {
            for item in items {
                collect_references(item, pending);
            }
        }
        Object::Dictionary(dict) => collect_dictionary_references(dict, pending),
        Object::Stream(stream) => collect_dictionary_references(&stream.dict, pending),
        _ => {}
    }
}

fn collect_dictionary_references(dict: &Dictionary, pending: &mut Vec<ObjectId>) {
    for (key, value) in dict.iter() {
        if key.as_slice() != b"Parent" {
            collect_references(value, pending);
        }
    }
}

fn is_page(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page")
}

fn parent_of(doc: &LopdfDocument, id: ObjectId) -> Option<ObjectId> {
    doc.get_dictionary(id)
        .ok()?
        .get(b"Parent")
        .ok()?
        .as_reference()
        .ok()
}
