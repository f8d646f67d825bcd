use super::TextAlign;
use crate::canvas::Canvas;
use crate::error::{text_identity, DrawError, LayoutError};
use crate::rect::Rect;
use crate::units::Pt;

/// Slack allowed when deciding whether the next candidate size is still within
/// the range, so that `max - k * step` landing a hair under `min` still counts
const SIZE_TOLERANCE: f32 = 1e-4;

/// The font sizes a fit may choose from: `max`, `max - step`, `max - 2 * step`,
/// and so on down to `min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitRange {
    pub max: Pt,
    pub min: Pt,
    pub step: Pt,
}

impl FitRange {
    /// Create a range, checking that `0 < min <= max` and `step > 0`
    pub fn new(max: Pt, min: Pt, step: Pt) -> Result<FitRange, LayoutError> {
        let range = FitRange { max, min, step };
        range.validate()?;
        Ok(range)
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        if *self.min > 0.0 && self.min <= self.max && *self.step > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidFitRange {
                max: self.max,
                min: self.min,
                step: self.step,
            })
        }
    }

    /// The candidate sizes in the order they are tried. Empty for an invalid range
    pub fn candidates(&self) -> impl Iterator<Item = Pt> {
        let FitRange { max, min, step } = *self;
        let count = if self.validate().is_ok() { usize::MAX } else { 0 };
        (0..count)
            .map(move |k| max - step * k as f32)
            .take_while(move |size| size.0 >= min.0 - SIZE_TOLERANCE)
    }
}

impl Default for FitRange {
    /// 14pt down to 6pt in half-point steps
    fn default() -> Self {
        FitRange {
            max: Pt(14.0),
            min: Pt(6.0),
            step: Pt(0.5),
        }
    }
}

/// The outcome of fitting text into a rectangle
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitResult {
    /// The chosen font size
    pub size: Pt,
    /// The rectangle the text was drawn in
    pub rect: Rect,
    /// Top of the drawn text
    pub top: Pt,
    /// Lowest point reached by the drawn text
    pub bottom: Pt,
}

/// Find the largest font size in `range` at which `text` fits inside `rect`.
///
/// Sizes are tried from `range.max` downwards, one `range.step` at a time; the
/// first size the canvas draws without an overflow wins. The descent is linear,
/// never a bisection: wrapped text does not overflow monotonically in the size.
///
/// Each attempt draws on the canvas for real, so the successful attempt stays
/// drawn and the canvas font size is left at the fitted size. Wrap the call in a
/// snapshot (as [`TextBox`](crate::layout::TextBox) does) to use it for
/// measuring only.
///
/// Overflows drive the descent; any other drawing error is returned at once.
/// If even `range.min` overflows, returns [`LayoutError::FittingImpossible`].
pub fn fit_font_size<C: Canvas + ?Sized>(
    canvas: &mut C,
    rect: Rect,
    text: &str,
    range: FitRange,
    align: TextAlign,
) -> Result<FitResult, LayoutError> {
    range.validate()?;

    for size in range.candidates() {
        match canvas.draw_bounded_text(rect, text, size, align) {
            Ok(()) => {
                let (_, bottom) = canvas.cursor_position();
                log::debug!("fitted {:?} at {size} in {rect:?}", text_identity(text));
                return Ok(FitResult {
                    size,
                    rect,
                    top: rect.y2,
                    bottom,
                });
            }
            Err(DrawError::Overflow { .. }) => {
                log::trace!("{:?} overflows at {size}", text_identity(text));
            }
            Err(source) => {
                return Err(LayoutError::Draw {
                    page: canvas.current_page(),
                    row: None,
                    rect: Some(rect),
                    source,
                });
            }
        }
    }

    Err(LayoutError::FittingImpossible {
        rect,
        text: text_identity(text),
        min_size: range.min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCanvas;

    fn canvas() -> MockCanvas {
        MockCanvas::with_band(Pt(500.0))
    }

    #[test]
    fn candidates_descend_linearly_to_min() {
        let range = FitRange::new(Pt(10.0), Pt(8.0), Pt(0.5)).expect("valid");
        let sizes: Vec<f32> = range.candidates().map(|s| s.0).collect();
        assert_eq!(sizes, vec![10.0, 9.5, 9.0, 8.5, 8.0]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(
            FitRange::new(Pt(6.0), Pt(10.0), Pt(1.0)),
            Err(LayoutError::InvalidFitRange { .. })
        ));
        assert!(FitRange::new(Pt(10.0), Pt(6.0), Pt(0.0)).is_err());
        assert!(FitRange::new(Pt(10.0), Pt(0.0), Pt(1.0)).is_err());
    }

    #[test]
    fn fits_at_14_but_not_14_5() {
        // five unbreakable 10-character lines in a 70pt wide, 100pt tall box:
        // at 14pt each line is exactly 70pt wide and five lines take 93.3pt,
        // anything larger splits every word and needs ten lines
        let mut canvas = canvas();
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(70.0), Pt(100.0));
        let text = ["abcdefghij"; 5].join("\n");
        let range = FitRange::new(Pt(20.0), Pt(6.0), Pt(0.5)).expect("valid");
        let fitted = fit_font_size(&mut canvas, rect, &text, range, TextAlign::Left).expect("fits");
        assert_eq!(fitted.size, Pt(14.0));
        assert_eq!(fitted.top, Pt(100.0));
        assert!((*fitted.bottom - (100.0 - 5.0 * 14.0 * 4.0 / 3.0)).abs() < 1e-3);
        assert_eq!(canvas.current_font_size(), Pt(14.0));
        // 20, 19.5, ..., 14
        assert_eq!(canvas.text_attempts, 13);
        assert_eq!(canvas.texts().len(), 1);
    }

    #[test]
    fn min_size_is_not_silently_clamped() {
        // needs size 8 or less: 3 lines at 10pt need 40pt
        let mut canvas = canvas();
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(190.0), Pt(32.0));
        let range = FitRange::new(Pt(10.0), Pt(10.0), Pt(1.0)).expect("valid");
        let err = fit_font_size(&mut canvas, rect, "a\nb\nc", range, TextAlign::Left)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::FittingImpossible {
                rect,
                text: "a\nb\nc".into(),
                min_size: Pt(10.0),
            }
        );
        assert_eq!(canvas.text_attempts, 1);
        assert!(canvas.texts().is_empty());
    }

    #[test]
    fn other_draw_errors_propagate_without_retry() {
        let mut canvas = canvas();
        canvas.poisoned_text = Some("Total".into());
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), Pt(100.0));
        let err = fit_font_size(&mut canvas, rect, "Total", FitRange::default(), TextAlign::Left)
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Draw {
                source: DrawError::Other(_),
                rect: Some(_),
                ..
            }
        ));
        assert_eq!(canvas.text_attempts, 1);
    }

    #[test]
    fn smaller_sizes_keep_fitting() {
        let text = lipsum::lipsum(40);
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(150.0), Pt(120.0));
        let mut canvas = canvas();
        let fitted =
            fit_font_size(&mut canvas, rect, &text, FitRange::default(), TextAlign::Justify)
                .expect("fits");
        let mut size = *fitted.size;
        while size >= 6.0 {
            canvas
                .draw_bounded_text(rect, &text, Pt(size), TextAlign::Justify)
                .expect("every smaller size fits too");
            size -= 0.5;
        }
    }
}
