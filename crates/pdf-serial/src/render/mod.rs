//! PDF rendering of print plans
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building 2-up landscape sheets, blanks included
//! - Deep copying PDF objects between documents

mod sheet;
mod xobject;

pub use sheet::{render, render_plan};
pub use xobject::{copy_object_deep, create_page_xobject, get_page_dimensions};
