//! Font-size fitting and transactional pagination for business documents
//! (invoices, quotes, letters) rendered to PDF.
//!
//! Layout code draws through the [`Canvas`] trait. [`PdfCanvas`] implements it
//! on top of a [`Document`], and [`layout`] holds the fitting and pagination
//! engine that works against any canvas.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Fitting text into boxes and flowing rows across pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod pdf_canvas;
pub use pdf_canvas::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

#[cfg(test)]
mod testing;

/// Re-export PDF-writer functionality
pub use pdf_writer;
