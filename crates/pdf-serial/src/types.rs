use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerialPrintError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid page count {page_count}{}: a document needs at least one page", in_document(.document))]
    InvalidPageCount {
        document: Option<String>,
        page_count: usize,
    },
    #[error("'{document}' has no page {page}")]
    MissingPage { document: String, page: usize },
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("No PDF files found in '{}'", .0.display())]
    EmptyBatch(PathBuf),
    #[error("Print job for '{document}' failed ({backend}): {reason}")]
    DispatchFailure {
        document: String,
        backend: String,
        reason: String,
    },
    #[error("Batch changed since the front pass: {0}")]
    BatchDrift(String),
    #[error("'{document}': {source}")]
    Document {
        document: String,
        #[source]
        source: Box<SerialPrintError>,
    },
}

fn in_document(document: &Option<String>) -> String {
    match document {
        Some(name) => format!(" in '{}'", name),
        None => String::new(),
    }
}

impl SerialPrintError {
    /// Attach the offending document's name to an error.
    ///
    /// Errors that already name their document pass through unchanged.
    pub(crate) fn for_document(self, name: &str) -> Self {
        match self {
            SerialPrintError::InvalidPageCount { page_count, .. } => {
                SerialPrintError::InvalidPageCount {
                    document: Some(name.to_string()),
                    page_count,
                }
            }
            named @ (SerialPrintError::MissingPage { .. }
            | SerialPrintError::DispatchFailure { .. }
            | SerialPrintError::Document { .. }) => named,
            other => SerialPrintError::Document {
                document: name.to_string(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SerialPrintError>;

/// 1-based logical page number within a document
pub type PageNumber = usize;

/// Which half of the manual duplex run is being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pass {
    /// Odd-positioned sheets (1, 3, 5, ...)
    Front,
    /// Even-positioned sheets (2, 4, 6, ...), printed after flipping the stack
    Back,
}

impl Pass {
    /// Pass owning the sheet at a 1-indexed position within its document
    pub fn of_position(position: usize) -> Self {
        if position % 2 == 1 {
            Pass::Front
        } else {
            Pass::Back
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pass::Front => "front",
            Pass::Back => "back",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical side of paper holding up to two logical pages side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sheet {
    /// Page placed on the left half
    pub left: Option<PageNumber>,
    /// Page placed on the right half
    pub right: Option<PageNumber>,
}

impl Sheet {
    /// Synthetic sheet with no content, used to keep the paper stack aligned
    pub const BLANK: Sheet = Sheet {
        left: None,
        right: None,
    };

    /// Two consecutive pages starting at `first`
    pub fn full(first: PageNumber) -> Self {
        Self {
            left: Some(first),
            right: Some(first + 1),
        }
    }

    /// Final sheet of an odd-paged document, right half left empty
    pub fn half(page: PageNumber) -> Self {
        Self {
            left: Some(page),
            right: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Logical pages carried by this sheet, left to right
    pub fn pages(&self) -> impl Iterator<Item = PageNumber> {
        self.left.into_iter().chain(self.right)
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.left, self.right) {
            (Some(l), Some(r)) => write!(f, "{},{}", l, r),
            (Some(l), None) => write!(f, "{},-", l),
            (None, Some(r)) => write!(f, "-,{}", r),
            (None, None) => f.write_str("BLANK"),
        }
    }
}

/// A PDF discovered for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name, also the batch sort key
    pub name: String,
    pub path: PathBuf,
    pub page_count: usize,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, page_count: usize) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            page_count,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// Sheets selected for one document on one pass, after alignment padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPlan {
    pub document: String,
    pub page_count: usize,
    pub pass: Pass,
    pub sheets: Vec<Sheet>,
}

impl PrintPlan {
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn real_sheets(&self) -> usize {
        self.sheets.iter().filter(|s| !s.is_blank()).count()
    }

    pub fn blank_sheets(&self) -> usize {
        self.sheets.iter().filter(|s| s.is_blank()).count()
    }

    /// Logical pages printed by this plan, in output order
    pub fn page_numbers(&self) -> Vec<PageNumber> {
        self.sheets.iter().flat_map(|s| s.pages()).collect()
    }
}

/// Per-document plans for one invocation, in batch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub pass: Pass,
    pub plans: Vec<PrintPlan>,
}

impl BatchPlan {
    /// Every sheet of the invocation in physical output order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.plans.iter().flat_map(|p| p.sheets.iter())
    }
}

/// Statistics about a planned pass
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStatistics {
    /// Number of documents in the batch
    pub documents: usize,
    /// Total number of source pages
    pub source_pages: usize,
    /// Physical sheets the batch needs across both passes
    pub physical_sheets: usize,
    /// Sheets output by this pass, blanks included
    pub output_sheets: usize,
    /// Sheets carrying at least one page
    pub real_sheets: usize,
    /// Synthetic blanks added to keep the stack aligned
    pub blank_sheets: usize,
    /// Logical pages printed by this pass
    pub pages_selected: usize,
}
