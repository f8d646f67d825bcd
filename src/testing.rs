//! Test doubles shared by the unit tests.

use crate::canvas::Canvas;
use crate::error::DrawError;
use crate::layout::{layout_block, PageCursor, PageGeometry, RowUnit, TextAlign, TextMetrics};
use crate::layout::Margins;
use crate::rect::Rect;
use crate::units::Pt;

/// Fixed-pitch metrics: every character advances by `advance_em` of the font
/// size, with ascent/descent at 0.8/-0.2 of it.
#[derive(Debug, Copy, Clone)]
pub(crate) struct FixedMetrics {
    pub advance_em: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        FixedMetrics { advance_em: 0.5 }
    }
}

impl TextMetrics for FixedMetrics {
    fn advance(&self, _ch: char, size: Pt) -> Pt {
        size * self.advance_em
    }

    fn ascent(&self, size: Pt) -> Pt {
        size * 0.8
    }

    fn descent(&self, size: Pt) -> Pt {
        size * -0.2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Text {
        page: usize,
        rect: Rect,
        text: String,
        size: Pt,
        bottom: Pt,
    },
    Line {
        page: usize,
        from: (Pt, Pt),
        to: (Pt, Pt),
    },
}

/// A canvas that records what was drawn instead of producing output
pub(crate) struct MockCanvas {
    pub metrics: FixedMetrics,
    pub cursor: PageCursor,
    pub font: usize,
    pub size: Pt,
    pub pages: usize,
    pub ops: Vec<Op>,
    /// Number of draw_bounded_text calls, including ones that overflowed
    pub text_attempts: usize,
    /// Drawing exactly this text fails with a non-overflow error
    pub poisoned_text: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct MockSnapshot {
    cursor: PageCursor,
    font: usize,
    size: Pt,
    pages: usize,
    ops: usize,
}

impl MockCanvas {
    pub fn new(geometry: PageGeometry) -> MockCanvas {
        MockCanvas {
            metrics: FixedMetrics::default(),
            cursor: PageCursor::new(geometry),
            font: 0,
            size: Pt(10.0),
            pages: 1,
            ops: Vec::new(),
            text_attempts: 0,
            poisoned_text: None,
        }
    }

    /// A page whose content band is exactly `band` tall, starting at y = band
    pub fn with_band(band: Pt) -> MockCanvas {
        MockCanvas::new(PageGeometry::new(
            (Pt(200.0), band),
            Margins::empty(),
        ))
    }

    pub fn texts(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Text { .. }))
            .collect()
    }

    pub fn lines_on_page(&self, wanted: usize) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Line { page, .. } if *page == wanted))
            .count()
    }
}

impl Canvas for MockCanvas {
    type Snapshot = MockSnapshot;
    type FontHandle = usize;

    fn draw_bounded_text(
        &mut self,
        rect: Rect,
        text: &str,
        size: Pt,
        align: TextAlign,
    ) -> Result<(), DrawError> {
        self.text_attempts += 1;
        if self.poisoned_text.as_deref() == Some(text) {
            return Err(DrawError::Other("invalid colour".into()));
        }
        let block = layout_block(&self.metrics, rect, text, size, align)?;
        self.size = size;
        self.ops.push(Op::Text {
            page: self.cursor.page,
            rect,
            text: text.to_string(),
            size,
            bottom: block.bottom,
        });
        self.cursor.x = rect.x1;
        self.cursor.y = block.bottom;
        Ok(())
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), _width: Pt) -> Result<(), DrawError> {
        self.ops.push(Op::Line {
            page: self.cursor.page,
            from,
            to,
        });
        Ok(())
    }

    fn current_font(&self) -> usize {
        self.font
    }

    fn current_font_size(&self) -> Pt {
        self.size
    }

    fn set_font_size(&mut self, size: Pt) {
        self.size = size;
    }

    fn snapshot_state(&self) -> MockSnapshot {
        MockSnapshot {
            cursor: self.cursor,
            font: self.font,
            size: self.size,
            pages: self.pages,
            ops: self.ops.len(),
        }
    }

    fn restore_state(&mut self, snapshot: MockSnapshot) {
        self.cursor = snapshot.cursor;
        self.font = snapshot.font;
        self.size = snapshot.size;
        self.pages = snapshot.pages;
        self.ops.truncate(snapshot.ops);
    }

    fn begin_page(&mut self) -> usize {
        self.pages += 1;
        self.cursor.new_page();
        self.cursor.page
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn page_cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn page_cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.cursor
    }
}

/// A row of a fixed height, drawn as a vertical tick down the left edge
pub(crate) struct FixedRow {
    pub label: String,
    pub height: Pt,
}

impl FixedRow {
    pub fn new(label: impl Into<String>, height: f32) -> FixedRow {
        FixedRow {
            label: label.into(),
            height: Pt(height),
        }
    }
}

impl<C: Canvas> RowUnit<C> for FixedRow {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError> {
        let (x, y) = canvas.cursor_position();
        canvas.draw_line((x, y), (x, y - self.height), Pt(0.5))?;
        canvas.set_cursor_position(x, y - self.height);
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
