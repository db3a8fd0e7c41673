//! Document discovery and PDF I/O

use crate::constants::PDF_EXTENSION;
use crate::types::*;
use lopdf::Document;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// List the PDF files directly inside `dir`, sorted by file name.
///
/// Names compare as raw OS strings (bytes on Unix), so the order is the same
/// on every run even for names that are not valid UTF-8.
pub async fn list_pdfs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return Err(SerialPrintError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // metadata() follows symlinks, file_type() would not
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        let is_pdf = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(PDF_EXTENSION))
            .unwrap_or(false);
        if is_pdf {
            found.push(path);
        }
    }

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Discover the batch: every PDF in `dir` with its page count, in print order.
///
/// Page counts are read here, but not validated; zero-page documents are
/// rejected by the planner so the error names the document.
pub async fn discover_documents(dir: impl AsRef<Path>) -> Result<Vec<SourceDocument>> {
    let dir = dir.as_ref();
    let paths = list_pdfs(dir).await?;
    if paths.is_empty() {
        return Err(SerialPrintError::EmptyBatch(dir.to_path_buf()));
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let name = file_name(&path);
        let page_count = load_pdf(&path)
            .await
            .map_err(|e| e.for_document(&name))?
            .get_pages()
            .len();
        log::debug!("Found {} ({} pages)", path.display(), page_count);
        documents.push(SourceDocument::new(name, page_count).with_path(path));
    }
    Ok(documents)
}

/// Save a rendered document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, SerialPrintError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Printable file name. Bytes that are not valid UTF-8 are escaped rather
/// than replaced, so distinct files keep distinct names.
fn file_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => match name.to_str() {
            Some(name) => name.to_string(),
            None => escape_name(name),
        },
        None => String::new(),
    }
}

#[cfg(unix)]
fn escape_name(name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let mut escaped = String::new();
    for chunk in name.as_bytes().utf8_chunks() {
        escaped.push_str(chunk.valid());
        for byte in chunk.invalid() {
            escaped.push_str(&format!("\\x{:02X}", byte));
        }
    }
    escaped
}

#[cfg(windows)]
fn escape_name(name: &OsStr) -> String {
    use std::os::windows::ffi::OsStrExt;

    char::decode_utf16(name.encode_wide())
        .map(|unit| match unit {
            Ok(c) => c.to_string(),
            Err(e) => format!("\\u{{{:04X}}}", e.unpaired_surrogate()),
        })
        .collect()
}

#[cfg(not(any(unix, windows)))]
fn escape_name(name: &OsStr) -> String {
    name.to_string_lossy().into_owned()
}
