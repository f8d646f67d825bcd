use super::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// The fixed geometry shared by every page of a document: its size, its
/// margins, and the space reserved at the top for the page header and at the
/// bottom for the footer. No row may begin inside either reservation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
    pub header_reservation: Pt,
    pub footer_reservation: Pt,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> PageGeometry {
        PageGeometry {
            size,
            margins,
            header_reservation: Pt(0.0),
            footer_reservation: Pt(0.0),
        }
    }

    pub fn with_header_reservation(mut self, height: Pt) -> PageGeometry {
        self.header_reservation = height;
        self
    }

    pub fn with_footer_reservation(mut self, height: Pt) -> PageGeometry {
        self.footer_reservation = height;
        self
    }

    pub fn width(&self) -> Pt {
        self.size.0
    }

    pub fn height(&self) -> Pt {
        self.size.1
    }

    pub fn content_left(&self) -> Pt {
        self.margins.left
    }

    pub fn content_right(&self) -> Pt {
        self.width() - self.margins.right
    }

    pub fn content_width(&self) -> Pt {
        self.content_right() - self.content_left()
    }

    /// Where the first row of a page starts, below the header reservation
    pub fn content_top(&self) -> Pt {
        self.height() - self.margins.top - self.header_reservation
    }

    /// The lowest point any row may reach, above the footer reservation
    pub fn content_floor(&self) -> Pt {
        self.margins.bottom + self.footer_reservation
    }

    /// Vertical space between the header and footer reservations
    pub fn band_height(&self) -> Pt {
        self.content_top() - self.content_floor()
    }

    /// The region rows can be placed in
    pub fn content_band(&self) -> Rect {
        Rect::new(
            self.content_left(),
            self.content_floor(),
            self.content_right(),
            self.content_top(),
        )
    }

    /// The whole page
    pub fn media_box(&self) -> Rect {
        Rect::new(Pt(0.0), Pt(0.0), self.width(), self.height())
    }

    /// The page inside its margins, ignoring the header/footer reservations
    pub fn content_box(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.bottom,
            self.content_right(),
            self.height() - self.margins.top,
        )
    }
}

/// The write position within a paginated document.
///
/// Coordinates are PDF user space: y shrinks as content is placed down the
/// page. The cursor is plain data so that canvases can copy it into their
/// snapshots.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageCursor {
    pub geometry: PageGeometry,
    /// 0-based index of the current page
    pub page: usize,
    pub x: Pt,
    pub y: Pt,
}

impl PageCursor {
    /// A cursor at the top of the content band of the first page
    pub fn new(geometry: PageGeometry) -> PageCursor {
        PageCursor {
            geometry,
            page: 0,
            x: geometry.content_left(),
            y: geometry.content_top(),
        }
    }

    pub fn current_y(&self) -> Pt {
        self.y
    }

    /// Whether content whose lowest drawn point is `bottom` would cross into the
    /// footer reservation. Touching the floor exactly is allowed.
    pub fn would_overflow(&self, bottom: Pt) -> bool {
        bottom < self.geometry.content_floor()
    }

    /// Advance to the next page, back at the top of its content band
    pub fn new_page(&mut self) {
        self.page += 1;
        self.x = self.geometry.content_left();
        self.y = self.geometry.content_top();
    }

    /// Move the write position down (or up) to `y`, back at the left edge
    pub fn advance_to(&mut self, y: Pt) {
        self.x = self.geometry.content_left();
        self.y = y;
    }

    /// Space left between the cursor and the floor of the content band
    pub fn remaining(&self) -> Pt {
        (self.y - self.geometry.content_floor()).max(Pt(0.0))
    }

    pub fn at_band_top(&self) -> bool {
        self.y >= self.geometry.content_top()
    }
}
