//! Operating system spooler backend
//!
//! Uses `lp` on Unix-like systems and the shell `PrintTo` verb on Windows.

use super::{PrintBackend, stderr_text};
use crate::constants::SPOOLER_EXTRA_DELAY_MS;
use crate::options::JobSettings;
use crate::types::*;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

pub struct SpoolerBackend {
    job_delay: Duration,
}

impl SpoolerBackend {
    pub fn new(job_delay: Duration) -> Self {
        Self { job_delay }
    }
}

#[async_trait]
impl PrintBackend for SpoolerBackend {
    fn name(&self) -> &str {
        "system spooler"
    }

    async fn submit_job(&self, artifact: &Path, settings: &JobSettings) -> Result<()> {
        let mut cmd = submit_command(artifact, settings);
        log::debug!("[spooler] {:?}", cmd.as_std());

        let output = cmd.output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(SerialPrintError::DispatchFailure {
                document: artifact.display().to_string(),
                backend: self.name().to_string(),
                reason: stderr_text(&output),
            })
        }
    }

    fn settle_delay(&self) -> Duration {
        // The spooler returns before the printer has picked the job up
        self.job_delay + Duration::from_millis(SPOOLER_EXTRA_DELAY_MS)
    }
}

#[cfg(not(windows))]
pub(crate) fn submit_command(artifact: &Path, settings: &JobSettings) -> Command {
    let mut cmd = Command::new("lp");
    cmd.arg("-d").arg(&settings.printer);
    if settings.monochrome {
        cmd.arg("-o").arg("print-color-mode=monochrome");
    }
    if settings.fit_to_page {
        cmd.arg("-o").arg("fit-to-page");
    }
    cmd.arg(artifact);
    cmd
}

#[cfg(windows)]
pub(crate) fn submit_command(artifact: &Path, settings: &JobSettings) -> Command {
    if settings.monochrome || settings.fit_to_page {
        log::debug!("PrintTo uses the printer's own colour and scaling defaults");
    }
    let script = format!(
        "Start-Process -FilePath '{}' -Verb PrintTo -ArgumentList '\"{}\"' -WindowStyle Hidden",
        ps_quote(&artifact.display().to_string()),
        ps_quote(&settings.printer)
    );
    powershell(&script)
}

#[cfg(not(windows))]
pub(crate) fn list_printers_command() -> Command {
    let mut cmd = Command::new("lpstat");
    cmd.arg("-e");
    cmd
}

#[cfg(windows)]
pub(crate) fn list_printers_command() -> Command {
    powershell("Get-Printer | Select-Object -ExpandProperty Name")
}

#[cfg(windows)]
fn powershell(script: &str) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", script]);
    cmd
}

/// Escape a value for a single-quoted PowerShell string
#[cfg(windows)]
fn ps_quote(value: &str) -> String {
    value.replace('\'', "''")
}

/// One printer name per non-empty output line
pub(crate) fn parse_printer_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
