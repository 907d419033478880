//! Data model for sorting a scanned bundle.
//!
//! Pages are created once per run and never mutated. Classifications are
//! edited during review and then frozen; groups and output descriptors are
//! derived from them in a single pass.

mod classification;
mod group;
mod output;
mod page;

pub use classification::{Classification, ClassifiedPage, ExtractedInfo, Field, Mode};
pub use group::{EnvelopeInfo, Group};
pub use output::{AssembledDocument, AssemblyFailure, Manifest, OutputDocument};
pub use page::{Page, TextItem};
