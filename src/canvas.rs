//! The drawing surface the layout engine renders onto.

use crate::error::DrawError;
use crate::layout::{PageCursor, PageGeometry, TextAlign};
use crate::rect::Rect;
use crate::units::Pt;

/// A paginated drawing target.
///
/// The fitter and the paginator only ever talk to a `Canvas`: they draw bounded
/// text, read the cursor back to measure what they drew, and use
/// [`snapshot_state`](Canvas::snapshot_state) / [`restore_state`](Canvas::restore_state)
/// to undo speculative attempts. [`PdfCanvas`](crate::PdfCanvas) is the
/// implementation that produces real pages.
///
/// The write position is held in a [`PageCursor`], which the canvas owns and
/// must include in its snapshots.
pub trait Canvas {
    /// A fully independent copy of every piece of mutable render state
    type Snapshot;

    /// Identifies the active font
    type FontHandle: Copy + PartialEq + std::fmt::Debug;

    /// Wrap and draw `text` inside `rect` at `size`, top-anchored.
    ///
    /// On success the cursor is left at `(rect.x1, bottom of the last line)` and
    /// the active font size becomes `size`. If the text needs more room than the
    /// rectangle has, returns [`DrawError::Overflow`] without drawing anything.
    fn draw_bounded_text(
        &mut self,
        rect: Rect,
        text: &str,
        size: Pt,
        align: TextAlign,
    ) -> Result<(), DrawError>;

    /// Stroke a straight line between two points
    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), width: Pt) -> Result<(), DrawError>;

    fn current_font(&self) -> Self::FontHandle;

    fn current_font_size(&self) -> Pt;

    fn set_font_size(&mut self, size: Pt);

    fn snapshot_state(&self) -> Self::Snapshot;

    fn restore_state(&mut self, snapshot: Self::Snapshot);

    /// Start a new output page and move the cursor to the top of its content
    /// band. Returns the 0-based index of the new page.
    fn begin_page(&mut self) -> usize;

    fn page_count(&self) -> usize;

    fn page_cursor(&self) -> &PageCursor;

    fn page_cursor_mut(&mut self) -> &mut PageCursor;

    fn geometry(&self) -> &PageGeometry {
        &self.page_cursor().geometry
    }

    /// 0-based index of the page currently being drawn on
    fn current_page(&self) -> usize {
        self.page_cursor().page
    }

    fn cursor_position(&self) -> (Pt, Pt) {
        let cursor = self.page_cursor();
        (cursor.x, cursor.y)
    }

    fn set_cursor_position(&mut self, x: Pt, y: Pt) {
        let cursor = self.page_cursor_mut();
        cursor.x = x;
        cursor.y = y;
    }
}
