//! Front/back serial printing of PDF batches on a single-sided printer.
//!
//! Every document is printed two pages per landscape sheet. The front pass
//! prints each document's odd sheets, the stack is flipped by hand, and the
//! back pass prints the even sheets plus one blank wherever a document ends on
//! a front-only sheet, so every document starts aligned in both passes.

mod batch;
pub mod constants;
pub mod dispatch;
mod io;
mod manifest;
mod options;
pub mod plan;
pub mod render;
mod stats;
mod types;

pub use batch::{JobReport, artifact_path, print_batch};
pub use dispatch::{PrintBackend, SpoolerBackend, SumatraBackend, list_printers, select_backend};
pub use io::{discover_documents, expand_home, list_pdfs, load_pdf, save_pdf};
pub use manifest::{BatchManifest, ManifestEntry};
pub use options::*;
pub use plan::{align_batch, plan_document, plan_sheets, split_by_pass};
pub use stats::calculate_statistics;
pub use types::*;
