use super::TextAlign;
use crate::canvas::Canvas;
use crate::error::DrawError;
use crate::rect::Rect;
use crate::units::Pt;

/// One atomic, non-splittable piece of content placed by the
/// [`PaginatedRowRenderer`](super::PaginatedRowRenderer).
///
/// `render` starts drawing at the canvas cursor and must leave the cursor's y
/// at the lowest point it drew. It may be called more than once for the same
/// row (after a rollback and page break), so it must not keep state between
/// calls.
pub trait RowUnit<C: Canvas + ?Sized> {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError>;

    /// A human readable identity for error messages, such as a product code
    fn label(&self) -> String;
}

impl<C: Canvas + ?Sized, R: RowUnit<C> + ?Sized> RowUnit<C> for Box<R> {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError> {
        (**self).render(canvas)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

impl<C: Canvas + ?Sized, R: RowUnit<C> + ?Sized> RowUnit<C> for &R {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError> {
        (**self).render(canvas)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub width: Pt,
    pub text: String,
    pub align: TextAlign,
    pub size: Pt,
}

/// A table row: fixed-width cells laid side by side from the cursor, each one
/// wrapping its own text. The row is as tall as its tallest cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Cell>,
    /// Space above and below the cell text
    pub padding: Pt,
    size: Pt,
}

impl TableRow {
    /// Start a row whose cells default to `size`
    pub fn new<S: ToString>(label: S, size: Pt) -> TableRow {
        TableRow {
            label: label.to_string(),
            cells: Vec::new(),
            padding: Pt(0.0),
            size,
        }
    }

    pub fn cell<S: ToString>(mut self, width: Pt, text: S, align: TextAlign) -> TableRow {
        self.cells.push(Cell {
            width,
            text: text.to_string(),
            align,
            size: self.size,
        });
        self
    }

    pub fn padding(mut self, padding: Pt) -> TableRow {
        self.padding = padding;
        self
    }

    pub fn width(&self) -> Pt {
        self.cells.iter().map(|c| c.width).sum()
    }
}

impl<C: Canvas + ?Sized> RowUnit<C> for TableRow {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError> {
        let (left, top) = canvas.cursor_position();
        let text_top = top - self.padding;

        let mut x = left;
        let mut lowest = text_top;
        for cell in self.cells.iter() {
            // cells may run all the way down the page; the paginator decides
            // whether the row as a whole fits
            let rect = Rect::new(x, Pt(0.0), x + cell.width, text_top);
            canvas.draw_bounded_text(rect, &cell.text, cell.size, cell.align)?;
            lowest = lowest.min(canvas.cursor_position().1);
            x += cell.width;
        }

        canvas.set_cursor_position(left, lowest - self.padding);
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// A block of running text across the full content width, such as a letter
/// paragraph or a free-text note under an invoice table
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size: Pt,
    pub align: TextAlign,
    pub space_before: Pt,
    pub space_after: Pt,
}

impl Paragraph {
    pub fn new<S: ToString>(text: S, size: Pt) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            size,
            align: TextAlign::Left,
            space_before: Pt(0.0),
            space_after: Pt(0.0),
        }
    }

    pub fn align(mut self, align: TextAlign) -> Paragraph {
        self.align = align;
        self
    }

    pub fn spacing(mut self, before: Pt, after: Pt) -> Paragraph {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

impl<C: Canvas + ?Sized> RowUnit<C> for Paragraph {
    fn render(&self, canvas: &mut C) -> Result<(), DrawError> {
        let geometry = *canvas.geometry();
        let (_, top) = canvas.cursor_position();
        let rect = Rect::new(
            geometry.content_left(),
            Pt(0.0),
            geometry.content_right(),
            top - self.space_before,
        );
        canvas.draw_bounded_text(rect, &self.text, self.size, self.align)?;
        let (_, bottom) = canvas.cursor_position();
        canvas.set_cursor_position(geometry.content_left(), bottom - self.space_after);
        Ok(())
    }

    fn label(&self) -> String {
        let words: Vec<&str> = self.text.split_whitespace().take(4).collect();
        format!("paragraph \"{}\"", words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCanvas, Op};

    #[test]
    fn table_rows_are_as_tall_as_their_tallest_cell() {
        let mut canvas = MockCanvas::with_band(Pt(300.0));
        // 10pt text: 5pt per character, 13.33pt per line
        let row = TableRow::new("WID-01", Pt(10.0))
            .cell(Pt(50.0), "WID-01", TextAlign::Left)
            .cell(Pt(50.0), "Blue widget, XL size", TextAlign::Left)
            .cell(Pt(40.0), "12.00", TextAlign::Right)
            .padding(Pt(2.0));
        assert_eq!(row.width(), Pt(140.0));

        row.render(&mut canvas).expect("draws");

        // "Blue widget, XL size" wraps to three 10-character lines
        let (x, y) = canvas.cursor_position();
        assert_eq!(x, Pt(0.0));
        assert!((*y - (300.0 - 2.0 - 40.0 - 2.0)).abs() < 1e-3);
        let lefts: Vec<Pt> = canvas
            .texts()
            .iter()
            .map(|op| match op {
                Op::Text { rect, .. } => rect.x1,
                Op::Line { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(lefts, vec![Pt(0.0), Pt(50.0), Pt(100.0)]);
    }

    #[test]
    fn paragraphs_span_the_content_width() {
        let mut canvas = MockCanvas::with_band(Pt(300.0));
        let para = Paragraph::new("Dear customer,", Pt(12.0)).spacing(Pt(4.0), Pt(6.0));
        para.render(&mut canvas).expect("draws");
        match canvas.texts()[0] {
            Op::Text { rect, .. } => {
                assert_eq!(rect.x2, Pt(200.0));
                assert_eq!(rect.y2, Pt(296.0));
            }
            Op::Line { .. } => unreachable!(),
        }
        let (_, y) = canvas.cursor_position();
        assert!((*y - (296.0 - 16.0 - 6.0)).abs() < 1e-3);
        assert_eq!(
            RowUnit::<MockCanvas>::label(&para),
            "paragraph \"Dear customer,\""
        );
    }
}
