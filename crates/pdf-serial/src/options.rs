use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which print backend to hand rendered sheets to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BackendPreference {
    /// SumatraPDF when it can be found, the OS spooler otherwise
    #[default]
    Auto,
    /// Always use SumatraPDF; fail if it cannot be found
    Sumatra,
    /// Always use the operating system's print spooler
    Spooler,
}

/// Per-job settings handed to a print backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub printer: String,
    pub monochrome: bool,
    pub fit_to_page: bool,
}

/// Serial printing configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintOptions {
    // Target
    pub printer: String,
    pub monochrome: bool,
    pub fit_to_page: bool,

    // Backend
    pub backend: BackendPreference,
    pub sumatra_path: Option<PathBuf>,

    // Pacing
    pub job_delay_ms: u64,
    pub cleanup_delay_ms: u64,

    // Keep rendered sheets here instead of temp files
    pub save_dir: Option<PathBuf>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            printer: DEFAULT_PRINTER_NAME.to_string(),
            monochrome: true,
            fit_to_page: true,
            backend: BackendPreference::Auto,
            sumatra_path: None,
            job_delay_ms: DEFAULT_JOB_DELAY_MS,
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
            save_dir: None,
        }
    }
}

impl PrintOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SerialPrintError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SerialPrintError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.printer.trim().is_empty() {
            return Err(SerialPrintError::Config(
                "Printer name must not be empty".to_string(),
            ));
        }

        if let Some(dir) = &self.save_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(SerialPrintError::Config(format!(
                    "Save directory '{}' is not a directory",
                    dir.display()
                )));
            }
        }

        if self.backend == BackendPreference::Spooler && self.sumatra_path.is_some() {
            log::warn!("sumatra_path is ignored with the spooler backend");
        }

        Ok(())
    }

    /// Settings passed to the backend with every job
    pub fn job_settings(&self) -> JobSettings {
        JobSettings {
            printer: self.printer.clone(),
            monochrome: self.monochrome,
            fit_to_page: self.fit_to_page,
        }
    }

    /// Human-readable print mode, e.g. "Black & White, fit to page"
    pub fn mode_description(&self) -> String {
        let colour = if self.monochrome {
            "Black & White"
        } else {
            "Colour"
        };
        let scaling = if self.fit_to_page {
            "fit to page"
        } else {
            "actual size"
        };
        format!("{}, {}, {} pages per landscape sheet", colour, scaling, PAGES_PER_SHEET)
    }
}
