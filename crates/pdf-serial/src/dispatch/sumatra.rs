//! SumatraPDF silent printing backend

use super::{PrintBackend, stderr_text};
use crate::constants::{SUMATRA_ACCEPTED_EXIT_CODES, SUMATRA_EXE_NAME};
use crate::options::JobSettings;
use crate::types::*;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Locate a SumatraPDF executable.
///
/// An explicitly configured path wins; otherwise the usual install locations
/// are tried before falling back to a `PATH` lookup.
pub fn find_sumatra(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        log::warn!("Configured SumatraPDF path '{}' does not exist", path.display());
    }

    install_locations()
        .into_iter()
        .find(|p| p.is_file())
        .or_else(|| search_path(SUMATRA_EXE_NAME))
}

fn install_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if cfg!(windows) {
        locations.push(PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"));
        locations.push(PathBuf::from(
            r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe",
        ));
    }
    if let Some(local) = dirs::data_local_dir() {
        locations.push(local.join("SumatraPDF").join(SUMATRA_EXE_NAME));
    }
    locations
}

fn search_path(exe: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(exe))
        .find(|candidate| candidate.is_file())
}

pub struct SumatraBackend {
    executable: PathBuf,
    job_delay: Duration,
}

impl SumatraBackend {
    pub fn new(executable: impl Into<PathBuf>, job_delay: Duration) -> Self {
        Self {
            executable: executable.into(),
            job_delay,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub(crate) fn command(&self, artifact: &Path, settings: &JobSettings) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-print-to")
            .arg(&settings.printer)
            .arg("-print-settings")
            .arg(print_settings(settings))
            .arg(artifact);
        cmd
    }
}

/// SumatraPDF `-print-settings` value
fn print_settings(settings: &JobSettings) -> String {
    let colour = if settings.monochrome {
        "monochrome"
    } else {
        "color"
    };
    let scaling = if settings.fit_to_page { "fit" } else { "noscale" };
    format!("{},{}", colour, scaling)
}

#[async_trait]
impl PrintBackend for SumatraBackend {
    fn name(&self) -> &str {
        "SumatraPDF"
    }

    async fn submit_job(&self, artifact: &Path, settings: &JobSettings) -> Result<()> {
        let mut cmd = self.command(artifact, settings);
        log::debug!("[SumatraPDF] {:?}", cmd.as_std());

        let output = cmd.output().await?;
        match output.status.code() {
            Some(code) if SUMATRA_ACCEPTED_EXIT_CODES.contains(&code) => Ok(()),
            _ => Err(SerialPrintError::DispatchFailure {
                document: artifact.display().to_string(),
                backend: self.name().to_string(),
                reason: stderr_text(&output),
            }),
        }
    }

    fn settle_delay(&self) -> Duration {
        self.job_delay
    }
}

// =============================================================================
// Tests
// =============================================================================
