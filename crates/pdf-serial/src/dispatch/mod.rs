//! Print dispatch - handing rendered sheets to a printer
//!
//! Two backends implement [`PrintBackend`]:
//! - [`SumatraBackend`] drives SumatraPDF's silent printing
//! - [`SpoolerBackend`] submits to the operating system's spooler
//!
//! Which one is used is decided once per run by [`select_backend`].

mod spooler;
mod sumatra;

pub use spooler::SpoolerBackend;
pub use sumatra::{SumatraBackend, find_sumatra};

use crate::options::{BackendPreference, JobSettings, PrintOptions};
use crate::types::*;
use async_trait::async_trait;
use std::path::Path;
use std::process::Output;
use std::time::Duration;

/// Something that can submit one rendered PDF as one print job
#[async_trait]
pub trait PrintBackend: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Submit `artifact` as a single spool job. Returns once the job has been
    /// accepted; an error means the job may or may not have printed.
    async fn submit_job(&self, artifact: &Path, settings: &JobSettings) -> Result<()>;

    /// How long to wait after a job before sending the next one
    fn settle_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Pick the backend for this run according to `options.backend`.
pub fn select_backend(options: &PrintOptions) -> Result<Box<dyn PrintBackend>> {
    let job_delay = Duration::from_millis(options.job_delay_ms);
    let sumatra = || find_sumatra(options.sumatra_path.as_deref());

    match options.backend {
        BackendPreference::Sumatra => match sumatra() {
            Some(exe) => Ok(Box::new(SumatraBackend::new(exe, job_delay))),
            None => Err(SerialPrintError::Config(
                "SumatraPDF backend requested but SumatraPDF was not found".to_string(),
            )),
        },
        BackendPreference::Spooler => Ok(Box::new(SpoolerBackend::new(job_delay))),
        BackendPreference::Auto => match sumatra() {
            Some(exe) => Ok(Box::new(SumatraBackend::new(exe, job_delay))),
            None => {
                log::info!("SumatraPDF not found, using the system spooler");
                Ok(Box::new(SpoolerBackend::new(job_delay)))
            }
        },
    }
}

/// Names of the printers known to the operating system
pub async fn list_printers() -> Result<Vec<String>> {
    let output = spooler::list_printers_command().output().await?;
    if !output.status.success() {
        return Err(SerialPrintError::Config(format!(
            "Listing printers failed: {}",
            stderr_text(&output)
        )));
    }

    Ok(spooler::parse_printer_list(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

pub(crate) fn stderr_text(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if text.is_empty() {
        format!("exited with {}", output.status)
    } else {
        text
    }
}
