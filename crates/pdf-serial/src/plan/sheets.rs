//! 2-up sheet planning for a single document

use crate::constants::PAGES_PER_SHEET;
use crate::types::*;

/// Number of physical sheets a document of `page_count` pages occupies
pub fn physical_sheets(page_count: usize) -> usize {
    page_count.div_ceil(PAGES_PER_SHEET)
}

/// Plan the sheets of one document.
///
/// Sheet `i` (1-indexed) carries pages `2i-1` and `2i`. When the page count is
/// odd the last sheet only carries `2i-1` and its right half stays empty.
pub fn plan_sheets(page_count: usize) -> Result<Vec<Sheet>> {
    if page_count < 1 {
        return Err(SerialPrintError::InvalidPageCount {
            document: None,
            page_count,
        });
    }

    let sheets = (1..=page_count)
        .step_by(PAGES_PER_SHEET)
        .map(|first| {
            if first < page_count {
                Sheet::full(first)
            } else {
                Sheet::half(first)
            }
        })
        .collect();

    Ok(sheets)
}

// =============================================================================
// Tests
// =============================================================================
