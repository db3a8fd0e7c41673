//! Batch printing - plan, render and dispatch one pass of a batch

use crate::dispatch::PrintBackend;
use crate::io::{load_pdf, save_pdf};
use crate::options::{JobSettings, PrintOptions};
use crate::plan::{align_batch, physical_sheets};
use crate::render::render;
use crate::types::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What was sent to the printer for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub document: String,
    pub sheets: usize,
    pub blank_sheets: usize,
    /// Rendered file, when kept in the save directory
    pub artifact: Option<PathBuf>,
}

/// Print one pass of a batch.
///
/// `options` are validated here. The whole batch is planned before the first
/// job goes out, so an invalid document stops the run with nothing printed.
/// Jobs are then submitted one at a time in document order; the first failure
/// ends the run, since the physical stack can no longer be trusted. Every
/// error from a document's job names that document.
pub async fn print_batch(
    documents: &[SourceDocument],
    pass: Pass,
    options: &PrintOptions,
    backend: &dyn PrintBackend,
) -> Result<Vec<JobReport>> {
    options.validate()?;
    let batch = align_batch(documents, pass)?;
    let settings = options.job_settings();

    if let Some(dir) = &options.save_dir {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut reports = Vec::with_capacity(batch.plans.len());
    for (document, plan) in documents.iter().zip(batch.plans) {
        log::info!(
            "{} [{}]: {} pages, {} physical sheets",
            document.name,
            pass,
            document.page_count,
            physical_sheets(document.page_count)
        );

        // Every document has a page, so the back pass gets a sheet or a blank
        debug_assert!(!plan.is_empty());

        log::info!(
            "  Pages selected: {:?}, output sheets: {}{}",
            plan.page_numbers(),
            plan.len(),
            if plan.blank_sheets() > 0 {
                " (includes 1 blank)"
            } else {
                ""
            }
        );

        let report = print_document(document, plan, options, &settings, backend)
            .await
            .map_err(|e| e.for_document(&document.name))?;
        reports.push(report);
    }

    Ok(reports)
}

/// Render one document's plan and send it as a single job
async fn print_document(
    document: &SourceDocument,
    plan: PrintPlan,
    options: &PrintOptions,
    settings: &JobSettings,
    backend: &dyn PrintBackend,
) -> Result<JobReport> {
    let pass = plan.pass;
    let report = JobReport {
        document: document.name.clone(),
        sheets: plan.len(),
        blank_sheets: plan.blank_sheets(),
        artifact: None,
    };

    let source = load_pdf(&document.path).await?;
    let rendered = render(source, plan).await?;

    match &options.save_dir {
        Some(dir) => {
            let path = artifact_path(dir, document, pass);
            save_pdf(rendered, &path).await?;
            submit(backend, &path, settings, &document.name).await?;
            Ok(JobReport {
                artifact: Some(path),
                ..report
            })
        }
        None => {
            let temp = tempfile::Builder::new()
                .prefix("pdfsp-")
                .suffix(".pdf")
                .tempfile()?;
            save_pdf(rendered, temp.path()).await?;
            submit(backend, temp.path(), settings, &document.name).await?;
            // Give the backend time to release the file before it is removed
            sleep(Duration::from_millis(options.cleanup_delay_ms)).await;
            drop(temp);
            Ok(report)
        }
    }
}

/// Submit one job and wait out the backend's settle delay
async fn submit(
    backend: &dyn PrintBackend,
    artifact: &Path,
    settings: &JobSettings,
    document: &str,
) -> Result<()> {
    backend
        .submit_job(artifact, settings)
        .await
        .map_err(|e| dispatch_failure(e, document, backend.name()))?;
    log::info!("  Job sent via {}", backend.name());
    sleep(backend.settle_delay()).await;
    Ok(())
}

/// Where a rendered pass is kept: `<dir>/<file name>.<pass>.pdf`.
///
/// The whole source file name is kept, so `a.pdf` and `a.PDF` never share an
/// artifact.
pub fn artifact_path(dir: &Path, document: &SourceDocument, pass: Pass) -> PathBuf {
    let mut file_name = match document.path.file_name() {
        Some(name) => name.to_os_string(),
        None => OsString::from(&document.name),
    };
    file_name.push(format!(".{}.pdf", pass));
    dir.join(file_name)
}

/// Report any submission error as a dispatch failure of `document`
fn dispatch_failure(error: SerialPrintError, document: &str, backend: &str) -> SerialPrintError {
    match error {
        SerialPrintError::DispatchFailure {
            backend, reason, ..
        } => SerialPrintError::DispatchFailure {
            document: document.to_string(),
            backend,
            reason,
        },
        other => SerialPrintError::DispatchFailure {
            document: document.to_string(),
            backend: backend.to_string(),
            reason: other.to_string(),
        },
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
