use super::{align_vertically, fit_font_size, FitRange, FitResult, RenderTransaction, TextAlign, VerticalAlign};
use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::rect::Rect;
use crate::units::Pt;

/// A fixed rectangle that text is shrunk into, such as an address window or a
/// product description cell.
///
/// ```
/// # use pdf_flow::{Canvas, LayoutError, Pt, Rect};
/// # use pdf_flow::layout::{TextBox, VerticalAlign};
/// # fn address<C: Canvas>(canvas: &mut C) -> Result<(), LayoutError> {
/// let mut address = TextBox::new(Rect::new(Pt(57.0), Pt(600.0), Pt(297.0), Pt(686.0)));
/// address
///     .content("Jane Example\n1 Example Street\n12345 Example City")
///     .vertical_align(VerticalAlign::Center)
///     .max_font_size(Pt(12.0));
/// let fitted = address.render(canvas)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub content: String,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub range: FitRange,
}

impl TextBox {
    pub fn new(rect: Rect) -> TextBox {
        TextBox {
            rect: Rect::new(rect.x1, rect.y1, rect.x2, rect.y2),
            content: String::new(),
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            range: FitRange::default(),
        }
    }

    pub fn content<S: ToString>(&mut self, content: S) -> &mut Self {
        self.content = content.to_string();
        self
    }

    pub fn text_align(&mut self, align: TextAlign) -> &mut Self {
        self.text_align = align;
        self
    }

    pub fn vertical_align(&mut self, align: VerticalAlign) -> &mut Self {
        self.vertical_align = align;
        self
    }

    pub fn max_font_size(&mut self, size: Pt) -> &mut Self {
        self.range.max = size;
        self
    }

    pub fn min_font_size(&mut self, size: Pt) -> &mut Self {
        self.range.min = size;
        self
    }

    pub fn step(&mut self, step: Pt) -> &mut Self {
        self.range.step = step;
        self
    }

    /// Fit, align and draw the content.
    ///
    /// The measuring draws are rolled back, so the content is drawn exactly
    /// once. The canvas font size is left at the fitted size.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<FitResult, LayoutError> {
        let mut tx = RenderTransaction::new();
        tx.begin(canvas)?;
        let measured = fit_font_size(canvas, self.rect, &self.content, self.range, self.text_align)
            .and_then(|fitted| {
                align_vertically(
                    canvas,
                    fitted,
                    &self.content,
                    self.text_align,
                    self.vertical_align,
                )
            });
        tx.rollback(canvas)?;
        let fitted = measured?;

        canvas
            .draw_bounded_text(fitted.rect, &self.content, fitted.size, self.text_align)
            .map_err(|source| LayoutError::Draw {
                page: canvas.current_page(),
                row: None,
                rect: Some(fitted.rect),
                source,
            })?;
        canvas.set_font_size(fitted.size);

        let (_, bottom) = canvas.cursor_position();
        Ok(FitResult { bottom, ..fitted })
    }
}
