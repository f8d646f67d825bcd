use super::{FitRange, RenderTransaction};
use crate::canvas::Canvas;
use crate::error::{DrawError, LayoutError};
use crate::rect::Rect;
use crate::units::Pt;

/// Draw a whole block of content at the largest size in `range` that keeps it
/// on the current page and above `limit_y`.
///
/// `draw` is called with the canvas and a candidate size and should draw the
/// entire block (several paragraphs, a signature, ...) from the current cursor.
/// Attempts that spill onto another page, end below `limit_y` or overflow are
/// rolled back and retried one step smaller. The accepted attempt stays drawn
/// and its size is returned.
pub fn fit_to_single_page<C, F>(
    canvas: &mut C,
    range: FitRange,
    limit_y: Pt,
    mut draw: F,
) -> Result<Pt, LayoutError>
where
    C: Canvas + ?Sized,
    F: FnMut(&mut C, Pt) -> Result<(), DrawError>,
{
    range.validate()?;

    let start_page = canvas.current_page();
    let (_, start_y) = canvas.cursor_position();
    let mut tx = RenderTransaction::new();

    for size in range.candidates() {
        tx.begin(canvas)?;
        let fits = match draw(&mut *canvas, size) {
            Ok(()) => {
                canvas.current_page() == start_page && canvas.cursor_position().1 >= limit_y
            }
            Err(DrawError::Overflow { .. }) => false,
            Err(source) => {
                tx.rollback(canvas)?;
                return Err(LayoutError::Draw {
                    page: start_page,
                    row: None,
                    rect: None,
                    source,
                });
            }
        };

        if fits {
            tx.commit()?;
            log::debug!("body fits on page {start_page} at {size}");
            return Ok(size);
        }
        tx.rollback(canvas)?;
        log::trace!("body does not fit on one page at {size}");
    }

    let geometry = canvas.geometry();
    Err(LayoutError::FittingImpossible {
        rect: Rect::new(
            geometry.content_left(),
            limit_y,
            geometry.content_right(),
            start_y,
        ),
        text: "document body".into(),
        min_size: range.min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Paragraph, RowUnit};
    use crate::testing::MockCanvas;

    fn body() -> Vec<Paragraph> {
        vec![
            Paragraph::new("Dear Ms Example,", Pt(0.0)),
            Paragraph::new(lipsum::lipsum(60), Pt(0.0)),
            Paragraph::new("Kind regards", Pt(0.0)),
        ]
    }

    fn draw_body(canvas: &mut MockCanvas, size: Pt) -> Result<(), DrawError> {
        for paragraph in body() {
            let paragraph = Paragraph { size, ..paragraph }.spacing(Pt(0.0), size);
            if canvas.page_cursor().would_overflow(canvas.cursor_position().1) {
                canvas.begin_page();
            }
            paragraph.render(canvas)?;
        }
        Ok(())
    }

    #[test]
    fn shrinks_until_the_body_fits() {
        let mut canvas = MockCanvas::with_band(Pt(300.0));
        let size = fit_to_single_page(&mut canvas, FitRange::default(), Pt(40.0), draw_body)
            .expect("fits at some size");

        assert!(size < Pt(14.0));
        assert_eq!(canvas.page_count(), 1);
        assert!(canvas.cursor_position().1 >= Pt(40.0));
        assert_eq!(canvas.texts().len(), 3);

        // one step larger would not have fitted
        let mut probe = MockCanvas::with_band(Pt(300.0));
        let larger = size + Pt(0.5);
        let spilled = draw_body(&mut probe, larger).is_err()
            || probe.page_count() > 1
            || probe.cursor_position().1 < Pt(40.0);
        assert!(spilled);
    }

    #[test]
    fn bodies_too_long_for_the_minimum_size_fail() {
        let mut canvas = MockCanvas::with_band(Pt(60.0));
        let err = fit_to_single_page(&mut canvas, FitRange::default(), Pt(0.0), draw_body)
            .unwrap_err();

        assert!(matches!(err, LayoutError::FittingImpossible { min_size, .. } if min_size == Pt(6.0)));
        assert!(canvas.ops.is_empty());
        assert_eq!(canvas.page_count(), 1);
    }
}
