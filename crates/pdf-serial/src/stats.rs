use crate::plan::physical_sheets;
use crate::types::*;

/// Calculate statistics for a planned pass
pub fn calculate_statistics(batch: &BatchPlan) -> BatchStatistics {
    let mut stats = BatchStatistics {
        documents: batch.plans.len(),
        source_pages: 0,
        physical_sheets: 0,
        output_sheets: 0,
        real_sheets: 0,
        blank_sheets: 0,
        pages_selected: 0,
    };

    for plan in &batch.plans {
        stats.source_pages += plan.page_count;
        stats.physical_sheets += physical_sheets(plan.page_count);
        stats.output_sheets += plan.len();
        stats.real_sheets += plan.real_sheets();
        stats.blank_sheets += plan.blank_sheets();
        stats.pages_selected += plan.page_numbers().len();
    }

    stats
}
