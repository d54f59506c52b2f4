//! PDF Stamp Library
//!
//! A cross-platform library for stamping one PDF's first page onto another.
//! Given a "target" PDF and a "header" PDF, the library draws the header's
//! first page onto the target's first page, scaled by a uniform factor and
//! anchored to the top-left corner. This library provides functionality to:
//! - Composite two in-memory PDF buffers into a merged buffer
//! - Embed a page from one document into another as a Form XObject
//! - Compute placement geometry independently of any PDF codec
//! - Inspect page counts and page dimensions
//!
//! # Example
//!
//! ```no_run
//! use pdf_stamp::pdf::composite;
//!
//! let target = std::fs::read("report.pdf").unwrap();
//! let header = std::fs::read("letterhead.pdf").unwrap();
//!
//! let merged = composite(&target, &header, 0.5).expect("Failed to composite PDFs");
//! std::fs::write("merged.pdf", merged).unwrap();
//! ```

pub mod error;
pub mod geometry;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
