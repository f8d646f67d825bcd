use super::{FitResult, TextAlign};
use crate::canvas::Canvas;
use crate::error::{text_identity, DrawError, LayoutError};
use crate::rect::Rect;
use crate::units::Pt;

/// Upper bound on the geometry retries of [`align_vertically`]
pub const MAX_ALIGN_ATTEMPTS: usize = 256;

/// Where fitted text sits vertically inside its rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
    /// Between the centre and the top: a quarter of the spare space above the
    /// text, three quarters below
    CenterTop,
    /// Between the centre and the bottom: three quarters of the spare space
    /// above the text, a quarter below
    CenterBottom,
}

impl VerticalAlign {
    /// Move the edges of `rect` inwards so that `overshoot` of spare space is
    /// distributed the way this alignment wants it
    fn tighten(self, rect: Rect, overshoot: Pt) -> Rect {
        let unit = overshoot / 4.0;
        let (from_top, from_bottom) = match self {
            VerticalAlign::Top => (Pt(0.0), Pt(0.0)),
            VerticalAlign::Center => {
                let half = (overshoot / 2.0).floor();
                (half, half)
            }
            VerticalAlign::CenterTop => (unit.floor(), (unit * 3.0).floor()),
            VerticalAlign::CenterBottom => ((unit * 3.0).floor(), unit.floor()),
            VerticalAlign::Bottom => (overshoot, Pt(0.0)),
        };
        Rect::new(rect.x1, rect.y1 + from_bottom, rect.x2, rect.y2 - from_top)
    }
}

/// Reposition already-fitted text inside its rectangle according to `mode`.
///
/// [`VerticalAlign::Top`] returns `fitted` untouched. Otherwise the text is
/// redrawn at the fitted size to measure the unused space under it (rounded up
/// to a whole point), and a tighter rectangle is derived from that space. If
/// the tighter rectangle overflows, the estimate is reduced by one point and the
/// geometry recomputed. The font size is never changed.
///
/// Like [`fit_font_size`](super::fit_font_size), this draws on the canvas.
pub fn align_vertically<C: Canvas + ?Sized>(
    canvas: &mut C,
    fitted: FitResult,
    text: &str,
    text_align: TextAlign,
    mode: VerticalAlign,
) -> Result<FitResult, LayoutError> {
    if mode == VerticalAlign::Top {
        return Ok(fitted);
    }

    let FitResult { size, rect, .. } = fitted;
    let impossible = || LayoutError::FittingImpossible {
        rect,
        text: text_identity(text),
        min_size: size,
    };
    let draw_error = |canvas: &C, rect: Rect, source: DrawError| LayoutError::Draw {
        page: canvas.current_page(),
        row: None,
        rect: Some(rect),
        source,
    };

    match canvas.draw_bounded_text(rect, text, size, text_align) {
        Ok(()) => {}
        Err(DrawError::Overflow { .. }) => return Err(impossible()),
        Err(source) => return Err(draw_error(&*canvas, rect, source)),
    }
    let (_, measured_bottom) = canvas.cursor_position();
    let mut overshoot = (measured_bottom - rect.y1).ceil().max(Pt(0.0));
    if *overshoot == 0.0 {
        return Ok(fitted);
    }

    for _ in 0..MAX_ALIGN_ATTEMPTS {
        let tighter = mode.tighten(rect, overshoot);
        match canvas.draw_bounded_text(tighter, text, size, text_align) {
            Ok(()) => {
                let (_, bottom) = canvas.cursor_position();
                log::debug!("aligned {:?} {mode:?} into {tighter:?}", text_identity(text));
                return Ok(FitResult {
                    size,
                    rect: tighter,
                    top: tighter.y2,
                    bottom,
                });
            }
            Err(DrawError::Overflow { .. }) => {
                overshoot = (overshoot - Pt(1.0)).max(Pt(0.0));
            }
            Err(source) => return Err(draw_error(&*canvas, tighter, source)),
        }
    }

    log::warn!("gave up aligning {:?} after {MAX_ALIGN_ATTEMPTS} attempts", text_identity(text));
    Err(impossible())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{fit_font_size, FitRange};
    use crate::testing::MockCanvas;

    fn fixed(size: f32) -> FitRange {
        FitRange::new(Pt(size), Pt(size), Pt(1.0)).expect("valid")
    }

    fn fit_and_align(size: f32, text: &str, mode: VerticalAlign) -> (FitResult, FitResult) {
        let mut canvas = MockCanvas::with_band(Pt(500.0));
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(190.0), Pt(100.0));
        let fitted =
            fit_font_size(&mut canvas, rect, text, fixed(size), TextAlign::Left).expect("fits");
        let aligned = align_vertically(&mut canvas, fitted, text, TextAlign::Left, mode)
            .expect("aligns");
        (fitted, aligned)
    }

    #[test]
    fn top_alignment_is_the_identity() {
        let (fitted, aligned) = fit_and_align(15.0, "Invoice", VerticalAlign::Top);
        assert_eq!(fitted, aligned);
    }

    #[test]
    fn spare_space_is_split_per_mode() {
        // one 20pt line leaves 80pt free in the 100pt box
        let cases = [
            (VerticalAlign::Bottom, Pt(0.0), Pt(20.0)),
            (VerticalAlign::Center, Pt(40.0), Pt(60.0)),
            (VerticalAlign::CenterTop, Pt(60.0), Pt(80.0)),
            (VerticalAlign::CenterBottom, Pt(20.0), Pt(40.0)),
        ];
        for (mode, y1, y2) in cases {
            let (fitted, aligned) = fit_and_align(15.0, "Invoice", mode);
            assert_eq!(aligned.size, fitted.size, "{mode:?}");
            assert_eq!(aligned.rect.y1, y1, "{mode:?}");
            assert_eq!(aligned.rect.y2, y2, "{mode:?}");
            assert_eq!(aligned.top, y2, "{mode:?}");
            assert!((*aligned.bottom - *y1).abs() < 1e-3, "{mode:?}");
        }
    }

    #[test]
    fn rounded_up_overshoot_is_walked_back() {
        // a 14pt line is 18.67pt tall, so the spare space rounds up to 82pt and
        // the first bottom-aligned box (18pt) is too short
        let mut canvas = MockCanvas::with_band(Pt(500.0));
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(190.0), Pt(100.0));
        let fitted =
            fit_font_size(&mut canvas, rect, "Quote", fixed(14.0), TextAlign::Left).expect("fits");
        let before = canvas.text_attempts;
        let aligned =
            align_vertically(&mut canvas, fitted, "Quote", TextAlign::Left, VerticalAlign::Bottom)
                .expect("aligns");
        assert_eq!(aligned.rect.y2, Pt(19.0));
        assert_eq!(aligned.size, Pt(14.0));
        // measure, 18pt box, 19pt box
        assert_eq!(canvas.text_attempts - before, 3);
    }

    #[test]
    fn full_boxes_are_left_alone() {
        // five 20pt lines fill the 100pt box exactly
        let (fitted, aligned) = fit_and_align(15.0, "a\nb\nc\nd\ne", VerticalAlign::Center);
        assert_eq!(fitted, aligned);
    }

    #[test]
    fn other_draw_errors_propagate() {
        let mut canvas = MockCanvas::with_band(Pt(500.0));
        let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(190.0), Pt(100.0));
        let fitted = FitResult {
            size: Pt(10.0),
            rect,
            top: rect.y2,
            bottom: Pt(86.0),
        };
        canvas.poisoned_text = Some("Signature".into());
        let err = align_vertically(
            &mut canvas,
            fitted,
            "Signature",
            TextAlign::Left,
            VerticalAlign::Center,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Draw { .. }));
    }
}
