//! Batch manifest - a record of the front pass used to check the back pass
//!
//! Nothing ties the two invocations together except the directory listing.
//! When a manifest path is given the front pass writes the batch it printed
//! and the back pass refuses to run if the listing no longer matches.

use crate::constants::MANIFEST_VERSION;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManifestEntry {
    pub name: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchManifest {
    pub version: u32,
    pub documents: Vec<ManifestEntry>,
}

impl BatchManifest {
    pub fn from_documents(documents: &[SourceDocument]) -> Self {
        Self {
            version: MANIFEST_VERSION,
            documents: documents
                .iter()
                .map(|d| ManifestEntry {
                    name: d.name.clone(),
                    page_count: d.page_count,
                })
                .collect(),
        }
    }

    /// Check that `documents` is the batch this manifest recorded.
    ///
    /// Reports the first difference found.
    pub fn verify(&self, documents: &[SourceDocument]) -> Result<()> {
        for (idx, (expected, found)) in self.documents.iter().zip(documents).enumerate() {
            if expected.name != found.name {
                return Err(SerialPrintError::BatchDrift(format!(
                    "document #{} was '{}', now '{}'",
                    idx + 1,
                    expected.name,
                    found.name
                )));
            }
            if expected.page_count != found.page_count {
                return Err(SerialPrintError::BatchDrift(format!(
                    "'{}' had {} pages, now {}",
                    expected.name, expected.page_count, found.page_count
                )));
            }
        }

        if self.documents.len() != documents.len() {
            return Err(SerialPrintError::BatchDrift(format!(
                "front pass printed {} documents, directory now has {}",
                self.documents.len(),
                documents.len()
            )));
        }

        Ok(())
    }

    /// Load a manifest from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let manifest: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SerialPrintError::Config(format!("Failed to parse manifest: {}", e)))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(SerialPrintError::Config(format!(
                "Unsupported manifest version {}",
                manifest.version
            )));
        }
        Ok(manifest)
    }

    /// Save the manifest to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SerialPrintError::Config(format!("Failed to serialize manifest: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
