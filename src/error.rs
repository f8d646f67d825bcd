use crate::{rect::Rect, units::Pt};
use thiserror::Error;

/// Failures reported by a [`Canvas`](crate::Canvas) while drawing.
///
/// [`DrawError::Overflow`] is the only variant the layout engine acts on: it
/// drives the font-size descent and the page-break retry. Every other variant
/// is propagated untouched since retrying cannot fix it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("insufficient space for text in {rect:?}")]
    /// The content does not fit inside the requested rectangle
    Overflow { rect: Rect },

    #[error("font #{0} is not registered with the document")]
    /// The canvas was asked to draw with a font it does not know about
    MissingFont(usize),

    #[error("font has no glyph for {0:?} and no replacement glyph")]
    /// A character could not be mapped to a glyph at all
    MissingGlyph(char),

    #[error("{0}")]
    /// Any other backend failure
    Other(String),
}

impl DrawError {
    pub fn is_overflow(&self) -> bool {
        matches!(self, DrawError::Overflow { .. })
    }
}

/// Errors surfaced by the fitting and pagination engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{text:?} does not fit in {rect:?} even at {min_size}")]
    /// The text cannot fit in the rectangle at the minimum font size
    FittingImpossible { rect: Rect, text: String, min_size: Pt },

    #[error("{label} (row {index:?}) does not fit in the {band} content band of page {page}")]
    /// A single row cannot fit within a full page's content band
    RowTooLarge {
        /// `None` for the repeated header
        index: Option<usize>,
        label: String,
        page: usize,
        /// The measured height, when the row finished drawing before overflowing
        height: Option<Pt>,
        band: Pt,
    },

    #[error("a render transaction is already open")]
    TransactionAlreadyOpen,

    #[error("no render transaction is open")]
    NoTransaction,

    #[error("invalid fit range: max {max}, min {min}, step {step}")]
    InvalidFitRange { max: Pt, min: Pt, step: Pt },

    #[error("drawing failed on page {page} (row {row:?}, rect {rect:?}): {source}")]
    /// A canvas failure unrelated to space, with the context it happened in
    Draw {
        page: usize,
        row: Option<usize>,
        rect: Option<Rect>,
        #[source]
        source: DrawError,
    },
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// Fitting or pagination failed
    Layout(#[from] LayoutError),

    #[error("a page referenced by the page order is missing from the document")]
    PageMissing,
}

/// Shortens text for error messages so a long paragraph doesn't swamp the log
pub(crate) fn text_identity(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(MAX_CHARS).collect();
        s.push('…');
        s
    }
}
