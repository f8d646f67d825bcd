use super::{RenderTransaction, RowUnit, EPSILON};
use crate::canvas::Canvas;
use crate::error::{DrawError, LayoutError};
use crate::units::Pt;

/// Where a row ended up
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowPlacement {
    /// Position of the row in the input
    pub index: usize,
    /// 0-based page index the row was committed on
    pub page: usize,
    pub top: Pt,
    pub bottom: Pt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationSummary {
    /// One entry per row, in input order
    pub placements: Vec<RowPlacement>,
    /// Number of distinct pages the rows were placed on
    pub pages_used: usize,
    /// The cursor y after the last row, for content that follows the table
    pub anchor_y: Pt,
}

/// Stroke settings for the horizontal rules drawn between rows
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Separator {
    pub width: Pt,
}

impl Default for Separator {
    fn default() -> Self {
        Separator { width: Pt(0.5) }
    }
}

type FooterHook<'a, C> = Box<dyn Fn(&mut C, usize) -> Result<(), DrawError> + 'a>;

enum Attempt {
    Fits { bottom: Pt },
    /// `bottom` is known when the row finished drawing and was measured
    Overflowed { bottom: Option<Pt> },
}

/// Places a sequence of [`RowUnit`]s down the page, starting new pages as
/// needed and never splitting a row.
///
/// Every row is drawn inside a [`RenderTransaction`]. If it ends below the
/// content floor (or reports [`DrawError::Overflow`] itself), the attempt is
/// rolled back, a page is started and the row is drawn again. A row that does
/// not fit at the top of a fresh page fails with [`LayoutError::RowTooLarge`]
/// rather than starting pages forever.
///
/// ```
/// # use pdf_flow::{Canvas, LayoutError};
/// # use pdf_flow::layout::{PaginatedRowRenderer, RowUnit, Separator};
/// # fn table<C: Canvas>(canvas: &mut C, header: &dyn RowUnit<C>, rows: &[Box<dyn RowUnit<C>>]) -> Result<(), LayoutError> {
/// let summary = PaginatedRowRenderer::new()
///     .with_header(header)
///     .with_separator(Separator::default())
///     .render_rows(canvas, rows)?;
/// println!("{} rows over {} pages", summary.placements.len(), summary.pages_used);
/// # Ok(())
/// # }
/// ```
pub struct PaginatedRowRenderer<'a, C: Canvas> {
    header: Option<&'a dyn RowUnit<C>>,
    separator: Option<Separator>,
    footer: Option<FooterHook<'a, C>>,
    transaction: RenderTransaction<C::Snapshot>,
}

impl<'a, C: Canvas> Default for PaginatedRowRenderer<'a, C> {
    fn default() -> Self {
        PaginatedRowRenderer {
            header: None,
            separator: None,
            footer: None,
            transaction: RenderTransaction::new(),
        }
    }
}

impl<'a, C: Canvas> PaginatedRowRenderer<'a, C> {
    pub fn new() -> PaginatedRowRenderer<'a, C> {
        PaginatedRowRenderer::default()
    }

    /// Repeat `header` at the start of the table and at the top of every page
    /// the table continues on
    pub fn with_header(mut self, header: &'a dyn RowUnit<C>) -> Self {
        self.header = Some(header);
        self
    }

    /// Draw a rule above every row and under the last row of every page
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Called with the page index for each page the table leaves, and for the
    /// page the table ends on
    pub fn with_footer<F>(mut self, footer: F) -> Self
    where
        F: Fn(&mut C, usize) -> Result<(), DrawError> + 'a,
    {
        self.footer = Some(Box::new(footer));
        self
    }

    /// Place `rows` from the current cursor position onwards
    pub fn render_rows<R: RowUnit<C>>(
        &mut self,
        canvas: &mut C,
        rows: &[R],
    ) -> Result<PaginationSummary, LayoutError> {
        let first_page = canvas.current_page();
        let mut page_top = canvas.geometry().content_top();
        let mut placements = Vec::with_capacity(rows.len());

        if let Some(header) = self.header {
            self.place(canvas, header, None, &mut page_top)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let placement = self.place(canvas, row, Some(index), &mut page_top)?;
            placements.push(placement);
        }

        let (_, anchor_y) = canvas.cursor_position();
        if !rows.is_empty() {
            self.rule(canvas, anchor_y)?;
        }
        self.finish_page(canvas)?;

        let pages_used = canvas.current_page() - first_page + 1;
        log::debug!("placed {} rows over {pages_used} pages", rows.len());
        Ok(PaginationSummary {
            placements,
            pages_used,
            anchor_y,
        })
    }

    /// Commit `unit` on the current page, or on the next one. `page_top` is the
    /// y below which the current page already holds something other than a
    /// page-top header.
    fn place<U: RowUnit<C> + ?Sized>(
        &mut self,
        canvas: &mut C,
        unit: &U,
        index: Option<usize>,
        page_top: &mut Pt,
    ) -> Result<RowPlacement, LayoutError> {
        let mut retried = false;
        loop {
            let (_, top) = canvas.cursor_position();
            let page = canvas.current_page();
            let at_page_top = *top + EPSILON >= **page_top;

            self.transaction.begin(canvas)?;
            let attempt = match self.attempt(canvas, unit, index) {
                Ok(attempt) => attempt,
                Err(e) => {
                    self.transaction.rollback(canvas)?;
                    return Err(e);
                }
            };

            match attempt {
                Attempt::Fits { bottom } => {
                    self.transaction.commit()?;
                    canvas.page_cursor_mut().advance_to(bottom);
                    if index.is_none() && at_page_top {
                        *page_top = bottom;
                    }
                    log::debug!("committed {} on page {page}", unit.label());
                    return Ok(RowPlacement {
                        index: index.unwrap_or_default(),
                        page,
                        top,
                        bottom,
                    });
                }
                Attempt::Overflowed { bottom } => {
                    self.transaction.rollback(canvas)?;
                    let band = canvas.geometry().band_height();
                    let height = bottom.map(|bottom| top - bottom);
                    // taller than an empty band: a new page cannot help
                    let hopeless = height.is_some_and(|height| *height > *band + EPSILON);
                    if at_page_top || retried || hopeless {
                        log::warn!(
                            "{} does not fit in the {band} content band of page {page}",
                            unit.label()
                        );
                        return Err(LayoutError::RowTooLarge {
                            index,
                            label: unit.label(),
                            page,
                            height,
                            band,
                        });
                    }
                    self.break_page(canvas, page_top, index.is_some())?;
                    retried = true;
                }
            }
        }
    }

    fn attempt<U: RowUnit<C> + ?Sized>(
        &self,
        canvas: &mut C,
        unit: &U,
        index: Option<usize>,
    ) -> Result<Attempt, LayoutError> {
        let (_, top) = canvas.cursor_position();
        let page = canvas.current_page();
        self.rule(canvas, top)?;

        match unit.render(canvas) {
            Ok(()) => {
                let (_, bottom) = canvas.cursor_position();
                if canvas.current_page() != page || canvas.page_cursor().would_overflow(bottom) {
                    Ok(Attempt::Overflowed {
                        bottom: Some(bottom),
                    })
                } else {
                    Ok(Attempt::Fits { bottom })
                }
            }
            Err(DrawError::Overflow { .. }) => Ok(Attempt::Overflowed { bottom: None }),
            Err(source) => Err(LayoutError::Draw {
                page,
                row: index,
                rect: None,
                source,
            }),
        }
    }

    /// Close the current page and start the next one, with the header on top
    /// unless the header itself is what is being moved
    fn break_page(
        &mut self,
        canvas: &mut C,
        page_top: &mut Pt,
        with_header: bool,
    ) -> Result<(), LayoutError> {
        let (_, y) = canvas.cursor_position();
        self.rule(canvas, y)?;
        self.finish_page(canvas)?;

        let page = canvas.begin_page();
        log::debug!("page break, continuing on page {page}");
        *page_top = canvas.geometry().content_top();

        if with_header {
            if let Some(header) = self.header {
                self.place(canvas, header, None, page_top)?;
            }
        }
        Ok(())
    }

    fn rule(&self, canvas: &mut C, y: Pt) -> Result<(), LayoutError> {
        let Some(separator) = self.separator else {
            return Ok(());
        };
        let geometry = *canvas.geometry();
        canvas
            .draw_line(
                (geometry.content_left(), y),
                (geometry.content_right(), y),
                separator.width,
            )
            .map_err(|source| LayoutError::Draw {
                page: canvas.current_page(),
                row: None,
                rect: None,
                source,
            })
    }

    /// Run the footer hook for the current page, leaving the cursor where it was
    fn finish_page(&self, canvas: &mut C) -> Result<(), LayoutError> {
        let Some(footer) = &self.footer else {
            return Ok(());
        };
        let page = canvas.current_page();
        let (x, y) = canvas.cursor_position();
        footer(&mut *canvas, page).map_err(|source| LayoutError::Draw {
            page,
            row: None,
            rect: None,
            source,
        })?;
        canvas.set_cursor_position(x, y);
        Ok(())
    }
}
