//! Content stream generation for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, RuleLayout, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Rule(rule) => render_rule(&mut content, rule)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        *current_font.size
    )?;
    write!(content, "{}\n", current_colour.fill_operator())?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write!(content, "{}\n", current_colour.fill_operator())?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        write!(content, "<")?;
        let font = fonts.get(current_font.id);
        for ch in span.text.chars() {
            // spans are checked for glyphs when they are drawn; .notdef otherwise
            let gid = font
                .and_then(|font| font.glyph_or_replacement(ch))
                .unwrap_or_default();
            write!(content, "{gid:04x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rule(content: &mut Vec<u8>, rule: &RuleLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(content, "{}\n", rule.colour.stroke_operator())?;
    write!(content, "{} w\n", *rule.width)?;
    write!(content, "{} {} m\n", *rule.from.0, *rule.from.1)?;
    write!(content, "{} {} l\n", *rule.to.0, *rule.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::units::Pt;

    #[test]
    fn rules_are_stroked_in_their_colour() {
        let rule = RuleLayout {
            from: (Pt(10.0), Pt(700.0)),
            to: (Pt(200.0), Pt(700.0)),
            width: Pt(0.5),
            colour: colours::RULE_GREY,
        };
        let rendered = render_contents(&[PageContents::Rule(rule)], &Arena::new())
            .expect("renders to memory");
        let rendered = String::from_utf8(rendered).expect("content streams are ascii");
        assert_eq!(rendered, "q\n0.75 G\n0.5 w\n10 700 m\n200 700 l\nS\nQ\n");
    }

    #[test]
    fn nothing_to_render_is_an_empty_stream() {
        let rendered = render_contents(&[PageContents::Text(Vec::new())], &Arena::new())
            .expect("renders to memory");
        assert!(rendered.is_empty());
    }
}
