use crate::units::Pt;

/// Page margins. Rows and text boxes placed by the layout engine stay inside
/// them: the left/right margins bound the content width and the top/bottom
/// margins bound the content band (together with the header and footer
/// reservations of [`PageGeometry`](crate::layout::PageGeometry)).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let (vertical, horizontal) = (vertical.into(), horizontal.into());
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    pub fn empty() -> Margins {
        Margins::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{In, Mm};

    #[test]
    fn constructors_fill_the_right_sides() {
        let m = Margins::symmetric(In(1.0), Mm(0.0));
        assert_eq!(m.top, Pt(72.0));
        assert_eq!(m.bottom, Pt(72.0));
        assert_eq!(m.left, Pt(0.0));
        assert_eq!(Margins::all(Pt(5.0)).right, Pt(5.0));
        assert_eq!(Margins::empty(), Margins::all(Pt(0.0)));
    }
}
