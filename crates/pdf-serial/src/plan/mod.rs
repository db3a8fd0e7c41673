//! Pagination core - mapping document pages to physical sheets
//!
//! Pure and free of I/O:
//! 1. Plan the 2-up sheets of a single document
//! 2. Split them between the front and back passes
//! 3. Pad each document's back pass so the flipped stack stays aligned

mod align;
mod sheets;

pub use align::{align_batch, plan_document, split_by_pass};
pub use sheets::{physical_sheets, plan_sheets};
