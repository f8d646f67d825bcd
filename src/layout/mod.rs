//! Fitting text into boxes and flowing rows across pages.
//!
//! Everything here works against the [`Canvas`](crate::Canvas) trait, so the
//! same code drives [`PdfCanvas`](crate::PdfCanvas) and any other target.
//!
//! # Building blocks
//!
//! - [`fit_font_size`](crate::layout::fit_font_size) - the largest font size at which text fits a rectangle
//! - [`align_vertically`](crate::layout::align_vertically) - move fitted text up or down within its rectangle
//! - [`TextBox`](crate::layout::TextBox) - both of the above, drawing the result once
//! - [`RenderTransaction`](crate::layout::RenderTransaction) - undo a speculative draw
//! - [`PaginatedRowRenderer`](crate::layout::PaginatedRowRenderer) - place rows down the page, breaking pages between rows
//! - [`fit_to_single_page`](crate::layout::fit_to_single_page) - shrink a whole body until it fits on one page
//!
//! # Example
//!
//! ```no_run
//! use pdf_flow::{Document, Font, PdfCanvas, Pt, pagesize};
//! use pdf_flow::layout::{Margins, PageGeometry, PaginatedRowRenderer, TableRow, TextAlign};
//!
//! let font = Font::load(std::fs::read("DejaVuSans.ttf")?)?;
//! let geometry = PageGeometry::new(pagesize::A4, Margins::all(Pt(57.0)))
//!     .with_footer_reservation(Pt(30.0));
//! let mut canvas = PdfCanvas::new(Document::default(), geometry, font);
//!
//! let rows: Vec<TableRow> = (1..=40)
//!     .map(|i| {
//!         TableRow::new(format!("P-{i:03}"), Pt(10.0))
//!             .cell(Pt(80.0), format!("P-{i:03}"), TextAlign::Left)
//!             .cell(Pt(300.0), "Consulting services", TextAlign::Left)
//!             .cell(Pt(100.0), "120.00", TextAlign::Right)
//!     })
//!     .collect();
//! PaginatedRowRenderer::new().render_rows(&mut canvas, &rows)?;
//!
//! let mut out = std::fs::File::create("invoice.pdf")?;
//! canvas.into_document().write(&mut out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod align;
mod cursor;
mod fit;
mod margins;
mod paginate;
mod rows;
mod shrink;
mod text;
mod text_box;
mod transaction;

pub use align::*;
pub use cursor::*;
pub use fit::*;
pub use margins::*;
pub use paginate::*;
pub use rows::*;
pub use shrink::*;
pub use text::*;
pub use text_box::*;
pub use transaction::*;
