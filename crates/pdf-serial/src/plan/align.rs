//! Front/back pass selection and stack alignment across a batch

use super::sheets::plan_sheets;
use crate::types::*;

/// Split a document's sheets by the parity of their 1-indexed position.
///
/// Returns `(front, back)`: positions 1, 3, 5, ... and 2, 4, 6, ...
pub fn split_by_pass(sheets: &[Sheet]) -> (Vec<Sheet>, Vec<Sheet>) {
    let mut front = Vec::with_capacity(sheets.len().div_ceil(2));
    let mut back = Vec::with_capacity(sheets.len() / 2);

    for (idx, sheet) in sheets.iter().enumerate() {
        match Pass::of_position(idx + 1) {
            Pass::Front => front.push(*sheet),
            Pass::Back => back.push(*sheet),
        }
    }

    (front, back)
}

/// Plan one document for the given pass.
///
/// The back pass gets one trailing blank whenever the document's front pass has
/// one more sheet than its back pass, so the next document starts on a fresh
/// sheet in both passes.
pub fn plan_document(document: &SourceDocument, pass: Pass) -> Result<PrintPlan> {
    let sheets = plan_sheets(document.page_count).map_err(|e| e.for_document(&document.name))?;
    let (front, back) = split_by_pass(&sheets);

    let sheets = match pass {
        Pass::Front => front,
        Pass::Back => {
            let needs_blank = front.len() > back.len();
            let mut sheets = back;
            if needs_blank {
                sheets.push(Sheet::BLANK);
            }
            sheets
        }
    };

    Ok(PrintPlan {
        document: document.name.clone(),
        page_count: document.page_count,
        pass,
        sheets,
    })
}

/// Running totals kept for diagnostics only; no planning decision reads them.
#[derive(Debug, Default)]
struct AlignmentTracker {
    front_total: usize,
    back_total: usize,
    carry: usize,
}

impl AlignmentTracker {
    fn record(&mut self, name: &str, front_sheets: usize, back_real: usize, back_blanks: usize) {
        self.carry = front_sheets - back_real;
        self.front_total += front_sheets;
        self.back_total += back_real + back_blanks;

        debug_assert!(self.carry <= 1);
        debug_assert_eq!(self.front_total, self.back_total);

        log::debug!(
            "{}: front {} / back {}+{} (carry {}, cumulative {} / {})",
            name,
            front_sheets,
            back_real,
            back_blanks,
            self.carry,
            self.front_total,
            self.back_total
        );
    }
}

/// Plan a whole batch for one pass.
///
/// Documents are taken in the order given; the caller is responsible for the
/// stable ordering. Every page count is validated before anything is returned,
/// so an invalid document aborts the batch before a single job can be sent.
pub fn align_batch(documents: &[SourceDocument], pass: Pass) -> Result<BatchPlan> {
    let mut tracker = AlignmentTracker::default();
    let mut plans = Vec::with_capacity(documents.len());

    for document in documents {
        let front = plan_document(document, Pass::Front)?;
        let back = plan_document(document, Pass::Back)?;
        tracker.record(
            &document.name,
            front.len(),
            back.real_sheets(),
            back.blank_sheets(),
        );

        plans.push(match pass {
            Pass::Front => front,
            Pass::Back => back,
        });
    }

    Ok(BatchPlan { pass, plans })
}

// =============================================================================
// Tests
// =============================================================================
