//! Shared constants for serial printing
//!
//! This module centralizes magic numbers and defaults used throughout
//! planning, rendering and dispatch.

// =============================================================================
// Layout
// =============================================================================

/// Logical pages placed side by side on one physical sheet
pub const PAGES_PER_SHEET: usize = 2;

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Discovery
// =============================================================================

/// File extension of printable documents (matched case-insensitively)
pub const PDF_EXTENSION: &str = "pdf";

// =============================================================================
// Dispatch
// =============================================================================

/// Printer used when none is configured
pub const DEFAULT_PRINTER_NAME: &str = "EPSON L130 Series";

/// Pause after handing a job to SumatraPDF, in milliseconds
pub const DEFAULT_JOB_DELAY_MS: u64 = 2000;

/// Pause before removing a rendered temp file, in milliseconds
pub const DEFAULT_CLEANUP_DELAY_MS: u64 = 1000;

/// Extra pause the OS spooler backend needs before the next job, in milliseconds
pub const SPOOLER_EXTRA_DELAY_MS: u64 = 3000;

/// SumatraPDF executable name looked up on `PATH`
pub const SUMATRA_EXE_NAME: &str = if cfg!(windows) {
    "SumatraPDF.exe"
} else {
    "SumatraPDF"
};

/// SumatraPDF exit codes that mean the job reached the spooler.
/// SumatraPDF reports 1 for some successful silent prints.
pub const SUMATRA_ACCEPTED_EXIT_CODES: [i32; 2] = [0, 1];

// =============================================================================
// Manifest
// =============================================================================

/// Format version written into batch manifests
pub const MANIFEST_VERSION: u32 = 1;
