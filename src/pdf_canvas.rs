use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::error::DrawError;
use crate::font::Font;
use crate::layout::{layout_block, PageCursor, PageGeometry, TextAlign};
use crate::page::{Page, RuleLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Id;
use std::io::Write;

/// A [`Canvas`] that lays text out with real font metrics and records it as
/// PDF page content.
///
/// Pages are kept on the canvas until [`into_document`](PdfCanvas::into_document),
/// so rolling back a snapshot removes whatever was drawn after it, including
/// pages that were started since.
pub struct PdfCanvas {
    document: Document,
    pages: Vec<Page>,
    cursor: PageCursor,
    font: Id<Font>,
    size: Pt,
    colour: Colour,
    rule_colour: Colour,
}

/// Everything [`PdfCanvas`] needs to undo drawing
#[derive(Debug, Clone)]
pub struct PdfSnapshot {
    cursor: PageCursor,
    font: Id<Font>,
    size: Pt,
    colour: Colour,
    rule_colour: Colour,
    pages: usize,
    contents: usize,
}

impl PdfCanvas {
    /// Start drawing on the first page of `document`, in `font`
    pub fn new(mut document: Document, geometry: PageGeometry, font: Font) -> PdfCanvas {
        let font = document.add_font(font);
        PdfCanvas {
            document,
            pages: vec![Page::new(geometry.size, Some(geometry.margins))],
            cursor: PageCursor::new(geometry),
            font,
            size: Pt(10.0),
            colour: colours::BLACK,
            rule_colour: colours::RULE_GREY,
        }
    }

    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.document.add_font(font)
    }

    pub fn set_font(&mut self, font: Id<Font>) -> Result<(), DrawError> {
        if self.document.fonts.get(font).is_none() {
            return Err(DrawError::MissingFont(font.index()));
        }
        self.font = font;
        Ok(())
    }

    /// The fill colour for text
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    /// The stroke colour for lines
    pub fn set_rule_colour(&mut self, colour: Colour) {
        self.rule_colour = colour;
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Move the drawn pages into the document
    pub fn into_document(self) -> Document {
        let PdfCanvas {
            mut document,
            pages,
            ..
        } = self;
        for page in pages {
            document.add_page(page);
        }
        document
    }

    /// Shorthand for [`into_document`](PdfCanvas::into_document) followed by
    /// [`Document::write`]
    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.into_document().write(w)
    }

    fn current_page_mut(&mut self) -> Result<&mut Page, DrawError> {
        let page = self.cursor.page;
        self.pages
            .get_mut(page)
            .ok_or_else(|| DrawError::Other(format!("page {page} was never started")))
    }
}

impl Canvas for PdfCanvas {
    type Snapshot = PdfSnapshot;
    type FontHandle = Id<Font>;

    fn draw_bounded_text(
        &mut self,
        rect: Rect,
        text: &str,
        size: Pt,
        align: TextAlign,
    ) -> Result<(), DrawError> {
        let font = self
            .document
            .fonts
            .get(self.font)
            .ok_or(DrawError::MissingFont(self.font.index()))?;
        let block = layout_block(font, rect, text, size, align)?;

        let span_font = SpanFont { id: self.font, size };
        let mut spans = Vec::new();
        for line in block.lines.iter() {
            for span in line.spans.iter() {
                if let Some(ch) = span
                    .text
                    .chars()
                    .find(|&ch| font.glyph_or_replacement(ch).is_none())
                {
                    return Err(DrawError::MissingGlyph(ch));
                }
                spans.push(SpanLayout {
                    text: span.text.clone(),
                    font: span_font,
                    colour: self.colour,
                    coords: (span.x, line.baseline),
                });
            }
        }

        self.current_page_mut()?.add_text(spans);
        self.size = size;
        self.cursor.x = rect.x1;
        self.cursor.y = block.bottom;
        Ok(())
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), width: Pt) -> Result<(), DrawError> {
        let rule = RuleLayout {
            from,
            to,
            width,
            colour: self.rule_colour,
        };
        self.current_page_mut()?.add_rule(rule);
        Ok(())
    }

    fn current_font(&self) -> Id<Font> {
        self.font
    }

    fn current_font_size(&self) -> Pt {
        self.size
    }

    fn set_font_size(&mut self, size: Pt) {
        self.size = size;
    }

    fn snapshot_state(&self) -> PdfSnapshot {
        PdfSnapshot {
            cursor: self.cursor,
            font: self.font,
            size: self.size,
            colour: self.colour,
            rule_colour: self.rule_colour,
            pages: self.pages.len(),
            contents: self
                .pages
                .get(self.cursor.page)
                .map(|page| page.contents.len())
                .unwrap_or_default(),
        }
    }

    fn restore_state(&mut self, snapshot: PdfSnapshot) {
        self.pages.truncate(snapshot.pages);
        if let Some(page) = self.pages.get_mut(snapshot.cursor.page) {
            page.contents.truncate(snapshot.contents);
        }
        self.cursor = snapshot.cursor;
        self.font = snapshot.font;
        self.size = snapshot.size;
        self.colour = snapshot.colour;
        self.rule_colour = snapshot.rule_colour;
    }

    fn begin_page(&mut self) -> usize {
        let geometry = self.cursor.geometry;
        self.pages.push(Page::new(geometry.size, Some(geometry.margins)));
        self.cursor.new_page();
        log::debug!("started page {}", self.cursor.page);
        self.cursor.page
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn page_cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.cursor
    }
}
