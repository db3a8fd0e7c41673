mod common;

use async_trait::async_trait;
use common::{page_size, write_test_pdf};
use pdf_serial::*;
use std::path::Path;
use std::sync::Mutex;

/// Records every job it receives: (printer, sheet count, sheet width)
#[derive(Default)]
struct RecordingBackend {
    jobs: Mutex<Vec<(String, usize, f32)>>,
    fail_on_job: Option<usize>,
}

#[async_trait]
impl PrintBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn submit_job(&self, artifact: &Path, settings: &JobSettings) -> Result<()> {
        let mut jobs = self.jobs.lock().unwrap();
        if self.fail_on_job == Some(jobs.len()) {
            return Err(SerialPrintError::DispatchFailure {
                document: artifact.display().to_string(),
                backend: "recorder".to_string(),
                reason: "printer offline".to_string(),
            });
        }

        let doc = lopdf::Document::load(artifact).unwrap();
        let pages = doc.get_pages();
        let width = pages
            .values()
            .next()
            .map(|&id| page_size(&doc, id).0)
            .unwrap_or(0.0);
        jobs.push((settings.printer.clone(), pages.len(), width));
        Ok(())
    }
}

fn fast_options() -> PrintOptions {
    PrintOptions {
        printer: "Test Printer".to_string(),
        job_delay_ms: 0,
        cleanup_delay_ms: 0,
        ..Default::default()
    }
}

async fn sample_batch(dir: &Path) -> Vec<SourceDocument> {
    write_test_pdf(dir, "a.pdf", 5);
    write_test_pdf(dir, "b.pdf", 4);
    write_test_pdf(dir, "c.pdf", 1);
    discover_documents(dir).await.unwrap()
}

#[tokio::test]
async fn test_front_pass_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    let backend = RecordingBackend::default();

    let reports = print_batch(&documents, Pass::Front, &fast_options(), &backend)
        .await
        .unwrap();

    let jobs = backend.jobs.lock().unwrap().clone();
    assert_eq!(
        jobs,
        vec![
            ("Test Printer".to_string(), 2, 1224.0),
            ("Test Printer".to_string(), 1, 1224.0),
            ("Test Printer".to_string(), 1, 1224.0),
        ]
    );
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.blank_sheets == 0));
    assert!(reports.iter().all(|r| r.artifact.is_none()));
}

#[tokio::test]
async fn test_back_pass_jobs_include_blanks() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    let backend = RecordingBackend::default();

    let reports = print_batch(&documents, Pass::Back, &fast_options(), &backend)
        .await
        .unwrap();

    let sheets: Vec<usize> = backend.jobs.lock().unwrap().iter().map(|j| j.1).collect();
    assert_eq!(sheets, vec![2, 1, 1]);

    let summary: Vec<(&str, usize, usize)> = reports
        .iter()
        .map(|r| (r.document.as_str(), r.sheets, r.blank_sheets))
        .collect();
    assert_eq!(
        summary,
        vec![("a.pdf", 2, 1), ("b.pdf", 1, 0), ("c.pdf", 1, 1)]
    );
}

#[tokio::test]
async fn test_invalid_document_aborts_before_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(dir.path(), "a.pdf", 3);
    write_test_pdf(dir.path(), "b.pdf", 0);
    let documents = discover_documents(dir.path()).await.unwrap();
    let backend = RecordingBackend::default();

    let result = print_batch(&documents, Pass::Front, &fast_options(), &backend).await;
    match result {
        Err(SerialPrintError::InvalidPageCount {
            document: Some(name),
            ..
        }) => assert_eq!(name, "b.pdf"),
        other => panic!("Expected InvalidPageCount, got {:?}", other),
    }
    assert!(backend.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_failure_stops_batch() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    let backend = RecordingBackend {
        fail_on_job: Some(1),
        ..Default::default()
    };

    let result = print_batch(&documents, Pass::Front, &fast_options(), &backend).await;
    match result {
        Err(SerialPrintError::DispatchFailure {
            document,
            backend: name,
            reason,
        }) => {
            assert_eq!(document, "b.pdf");
            assert_eq!(name, "recorder");
            assert_eq!(reason, "printer offline");
        }
        other => panic!("Expected DispatchFailure, got {:?}", other),
    }
    // c.pdf was never sent
    assert_eq!(backend.jobs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_dir_keeps_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    let out = dir.path().join("rendered");
    let backend = RecordingBackend::default();
    let options = PrintOptions {
        save_dir: Some(out.clone()),
        ..fast_options()
    };

    let reports = print_batch(&documents, Pass::Back, &options, &backend)
        .await
        .unwrap();

    assert_eq!(reports[0].artifact, Some(out.join("a.pdf.back.pdf")));
    for report in &reports {
        let artifact = report.artifact.as_ref().unwrap();
        let doc = lopdf::Document::load(artifact).unwrap();
        assert_eq!(doc.get_pages().len(), report.sheets);
    }
}

#[test]
fn test_artifact_path() {
    let dir = Path::new("out");
    let chapter = SourceDocument::new("chapter 1.pdf", 3).with_path("in/chapter 1.pdf");
    let notes = SourceDocument::new("notes.PDF", 2).with_path("in/notes.PDF");
    assert_eq!(
        artifact_path(dir, &chapter, Pass::Front),
        dir.join("chapter 1.pdf.front.pdf")
    );
    assert_eq!(
        artifact_path(dir, &notes, Pass::Back),
        dir.join("notes.PDF.back.pdf")
    );
}

// a.pdf and a.PDF can only coexist on a case-sensitive filesystem
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_save_dir_keeps_same_stem_documents_apart() {
    let dir = tempfile::tempdir().unwrap();
    write_test_pdf(dir.path(), "a.pdf", 3);
    write_test_pdf(dir.path(), "a.PDF", 5);
    let documents = discover_documents(dir.path()).await.unwrap();
    let out = dir.path().join("rendered");
    let backend = RecordingBackend::default();
    let options = PrintOptions {
        save_dir: Some(out.clone()),
        ..fast_options()
    };

    let reports = print_batch(&documents, Pass::Front, &options, &backend)
        .await
        .unwrap();

    let artifacts: Vec<_> = reports.iter().map(|r| r.artifact.clone().unwrap()).collect();
    assert_eq!(
        artifacts,
        vec![out.join("a.PDF.front.pdf"), out.join("a.pdf.front.pdf")]
    );
    // a.PDF (5 pages) -> 2 front sheets, a.pdf (3 pages) -> 1 front sheet
    for (report, artifact) in reports.iter().zip(&artifacts) {
        let doc = lopdf::Document::load(artifact).unwrap();
        assert_eq!(doc.get_pages().len(), report.sheets);
    }
    assert_eq!(reports[0].sheets, 2);
    assert_eq!(reports[1].sheets, 1);
}

#[tokio::test]
async fn test_unreadable_document_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    // b.pdf is replaced between discovery and printing
    std::fs::write(dir.path().join("b.pdf"), b"not a pdf").unwrap();
    let backend = RecordingBackend::default();

    let err = print_batch(&documents, Pass::Front, &fast_options(), &backend)
        .await
        .unwrap_err();
    match &err {
        SerialPrintError::Document { document, .. } => assert_eq!(document, "b.pdf"),
        other => panic!("Expected Document error, got {:?}", other),
    }
    assert!(err.to_string().contains("b.pdf"));
    // a.pdf went out before the failure
    assert_eq!(backend.jobs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_options_rejected_before_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let documents = sample_batch(dir.path()).await;
    let backend = RecordingBackend::default();
    let options = PrintOptions {
        printer: "  ".to_string(),
        ..fast_options()
    };

    let result = print_batch(&documents, Pass::Front, &options, &backend).await;
    assert!(matches!(result, Err(SerialPrintError::Config(_))));
    assert!(backend.jobs.lock().unwrap().is_empty());
}
