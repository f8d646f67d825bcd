use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// The font and size a span of text is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text placed with its baseline starting at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A straight stroked line, such as a table rule
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// The lines of one bounded text draw
    Text(Vec<SpanLayout>),
    Rule(RuleLayout),
}

/// A single page of output
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in drawing order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a new page with the given size and margins
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect::new(Pt(0.0), Pt(0.0), size.0, size.1),
            content_box: Rect::new(
                margins.left,
                margins.bottom,
                size.0 - margins.right,
                size.1 - margins.top,
            ),
            contents: Vec::default(),
        }
    }

    pub fn add_text(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(PageContents::Rule(rule));
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get(RefType::Page(page_index)).ok_or(PDFError::PageMissing)?;
        let parent = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let index = font_id.index();
            if let Some(font_ref) = refs.get(RefType::Font(index)) {
                resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn content_box_sits_inside_the_margins() {
        let page = Page::new(pagesize::A4, Some(Margins::trbl(Pt(20.0), Pt(10.0), Pt(30.0), Pt(15.0))));
        assert_eq!(page.media_box.x2, pagesize::A4.0);
        assert_eq!(page.content_box.x1, Pt(15.0));
        assert_eq!(page.content_box.y1, Pt(30.0));
        assert_eq!(page.content_box.x2, pagesize::A4.0 - Pt(10.0));
        assert_eq!(page.content_box.y2, pagesize::A4.1 - Pt(20.0));
    }

    #[test]
    fn empty_text_is_not_recorded() {
        let mut page = Page::new(pagesize::LETTER, None);
        page.add_text(Vec::new());
        assert!(page.contents.is_empty());
        assert_eq!(page.content_box, page.media_box);
    }
}
