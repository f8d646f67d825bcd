use crate::units::*;

/// A rectangle in PDF user space, specified by two opposite corners.
///
/// The origin is the bottom-left corner of the page, so `y1` is the bottom edge
/// and `y2` is the top edge. [`Rect::new`] normalizes whatever pair of corners it
/// is given so that `x1 <= x2` and `y1 <= y2` always hold.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The left edge.
    pub x1: Pt,
    /// The bottom edge.
    pub y1: Pt,
    /// The right edge.
    pub x2: Pt,
    /// The top edge.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from any two opposite corners
    pub fn new(x1: Pt, y1: Pt, x2: Pt, y2: Pt) -> Rect {
        Rect {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// A copy of this rectangle with the top edge moved to `top`
    pub fn with_top(&self, top: Pt) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, top)
    }

    /// A copy of this rectangle with the bottom edge moved to `bottom`
    pub fn with_bottom(&self, bottom: Pt) -> Rect {
        Rect::new(self.x1, bottom, self.x2, self.y2)
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<pdf_writer::Rect> for Rect {
    fn from(r: pdf_writer::Rect) -> Self {
        Rect::new(Pt(r.x1), Pt(r.y1), Pt(r.x2), Pt(r.y2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let r = Rect::new(Pt(200.0), Pt(50.0), Pt(100.0), Pt(150.0));
        assert_eq!(r.x1, Pt(100.0));
        assert_eq!(r.x2, Pt(200.0));
        assert_eq!(r.y1, Pt(50.0));
        assert_eq!(r.y2, Pt(150.0));
        assert_eq!(r.width(), Pt(100.0));
        assert_eq!(r.height(), Pt(100.0));
    }

    #[test]
    fn moving_an_edge_past_the_other_renormalizes() {
        let r = Rect::new(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)).with_top(Pt(-5.0));
        assert_eq!(r.y1, Pt(-5.0));
        assert_eq!(r.y2, Pt(0.0));
    }
}
