use crate::error::DrawError;
use crate::rect::Rect;
use crate::units::Pt;

/// Tolerance used when comparing laid out extents against rectangle edges, so
/// that text which fits exactly isn't rejected over float noise
pub(crate) const EPSILON: f32 = 1e-3;

const TABSIZE: usize = 4;

/// Line spacing relative to the font size used by every bounded text draw
pub const LEADING_RATIO: f32 = 4.0 / 3.0;

/// The distance between two consecutive baselines at the given font size
pub fn leading_for(size: Pt) -> Pt {
    size * LEADING_RATIO
}

/// Glyph metrics needed to lay text out. [`Font`](crate::Font) implements this
/// from its TrueType tables; anything else that can answer these questions
/// (a fixed-pitch stand-in, a cached metrics table) can be used to measure text
/// with the same layout code.
pub trait TextMetrics {
    /// Horizontal advance of a single character
    fn advance(&self, ch: char, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the font
    fn ascent(&self, size: Pt) -> Pt;

    /// Distance from the baseline to the bottom of the font. Usually negative
    fn descent(&self, size: Pt) -> Pt;

    /// Calculate the width of a given string of text. Newlines are not special-cased
    fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }
}

/// Horizontal alignment of wrapped lines inside their rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch inter-word spacing so that every line but the last of each
    /// paragraph spans the full width
    Justify,
}

/// A run of text placed at an absolute baseline position
#[derive(Debug, Clone, PartialEq)]
pub struct LaidSpan {
    pub text: String,
    pub x: Pt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub spans: Vec<LaidSpan>,
    pub baseline: Pt,
    /// Natural width of the line, before any justification
    pub width: Pt,
}

/// The result of laying a string out inside a rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub size: Pt,
    pub lines: Vec<LaidLine>,
    /// Top of the first line box, which is always the top of the rectangle
    pub top: Pt,
    /// Bottom of the last line box
    pub bottom: Pt,
}

impl TextBlock {
    pub fn height(&self) -> Pt {
        self.top - self.bottom
    }
}

#[derive(Debug, Clone)]
struct Word {
    text: String,
    width: Pt,
}

/// Calculates the vertical offset from the top of a line box to the font's
/// baseline. The spare leading is split evenly above and below the glyphs.
pub fn baseline_offset<M: TextMetrics + ?Sized>(metrics: &M, size: Pt) -> Pt {
    let ascent = metrics.ascent(size);
    let descent = metrics.descent(size);
    let spare = leading_for(size) - (ascent - descent);
    ascent + spare / 2.0
}

/// Word-wraps `text` into `rect` at `size`, anchored to the top of the rectangle.
///
/// Lines break at whitespace; a word wider than the rectangle is broken between
/// characters instead. Explicit newlines start new lines, and tabs count as four
/// spaces. Every line occupies [`leading_for(size)`](leading_for) vertically.
///
/// Returns [`DrawError::Overflow`] if the lines need more height than the
/// rectangle has, or if a single character is wider than the rectangle. Nothing
/// is drawn by this function, so an overflow has no side effects.
pub fn layout_block<M: TextMetrics + ?Sized>(
    metrics: &M,
    rect: Rect,
    text: &str,
    size: Pt,
    align: TextAlign,
) -> Result<TextBlock, DrawError> {
    let leading = leading_for(size);
    let max_width = rect.width();

    if text.trim().is_empty() {
        return Ok(TextBlock {
            size,
            lines: Vec::new(),
            top: rect.y2,
            bottom: rect.y2,
        });
    }

    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    // (words, is the last line of its paragraph)
    let mut wrapped: Vec<(Vec<Word>, bool)> = Vec::new();
    for paragraph in text.split('\n') {
        let lines = wrap_paragraph(metrics, paragraph, size, rect)?;
        let count = lines.len();
        wrapped.extend(
            lines
                .into_iter()
                .enumerate()
                .map(|(i, line)| (line, i + 1 == count)),
        );
    }

    let height = leading * wrapped.len() as f32;
    if *height > *rect.height() + EPSILON {
        return Err(DrawError::Overflow { rect });
    }

    let space_width = metrics.width_of_text(" ", size);
    let offset = baseline_offset(metrics, size);
    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, (words, last_of_paragraph))| {
            let line_top = rect.y2 - leading * i as f32;
            place_line(
                words,
                last_of_paragraph,
                line_top - offset,
                rect,
                max_width,
                space_width,
                align,
            )
        })
        .collect();

    Ok(TextBlock {
        size,
        lines,
        top: rect.y2,
        bottom: rect.y2 - height,
    })
}

fn wrap_paragraph<M: TextMetrics + ?Sized>(
    metrics: &M,
    paragraph: &str,
    size: Pt,
    rect: Rect,
) -> Result<Vec<Vec<Word>>, DrawError> {
    let max_width = *rect.width() + EPSILON;
    let space_width = metrics.width_of_text(" ", size);

    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line: Vec<Word> = Vec::new();
    let mut line_width = Pt(0.0);

    for word in paragraph.split_whitespace() {
        for piece in split_long_word(metrics, word, size, rect)? {
            let needed = if line.is_empty() {
                piece.width
            } else {
                line_width + space_width + piece.width
            };

            if !line.is_empty() && *needed > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = piece.width;
            } else {
                line_width = needed;
            }
            line.push(piece);
        }
    }

    // a blank paragraph still takes up a line
    lines.push(line);
    Ok(lines)
}

/// Breaks a word that is wider than the rectangle into pieces that each fit
fn split_long_word<M: TextMetrics + ?Sized>(
    metrics: &M,
    word: &str,
    size: Pt,
    rect: Rect,
) -> Result<Vec<Word>, DrawError> {
    let max_width = *rect.width() + EPSILON;
    let width = metrics.width_of_text(word, size);
    if *width <= max_width {
        return Ok(vec![Word {
            text: word.to_string(),
            width,
        }]);
    }

    let mut pieces = Vec::new();
    let mut current = Word {
        text: String::new(),
        width: Pt(0.0),
    };
    for ch in word.chars() {
        let adv = metrics.advance(ch, size);
        if *(current.width + adv) > max_width {
            if current.text.is_empty() {
                // not even one character fits across
                return Err(DrawError::Overflow { rect });
            }
            pieces.push(std::mem::replace(
                &mut current,
                Word {
                    text: String::new(),
                    width: Pt(0.0),
                },
            ));
        }
        current.text.push(ch);
        current.width += adv;
    }
    if !current.text.is_empty() {
        pieces.push(current);
    }
    Ok(pieces)
}

fn place_line(
    words: Vec<Word>,
    last_of_paragraph: bool,
    baseline: Pt,
    rect: Rect,
    max_width: Pt,
    space_width: Pt,
    align: TextAlign,
) -> LaidLine {
    let words_width: Pt = words.iter().map(|w| w.width).sum();
    let gaps = words.len().saturating_sub(1);
    let width = words_width + space_width * gaps as f32;

    if align == TextAlign::Justify && !last_of_paragraph && gaps > 0 {
        let gap = (max_width - words_width) / gaps as f32;
        let mut x = rect.x1;
        let spans = words
            .into_iter()
            .map(|word| {
                let span = LaidSpan { text: word.text, x };
                x += word.width + gap;
                span
            })
            .collect();
        return LaidLine {
            spans,
            baseline,
            width,
        };
    }

    let x = match align {
        TextAlign::Left | TextAlign::Justify => rect.x1,
        TextAlign::Right => rect.x2 - width,
        TextAlign::Center => rect.x1 + (max_width - width) / 2.0,
    };
    let text = words
        .into_iter()
        .map(|w| w.text)
        .collect::<Vec<_>>()
        .join(" ");
    let spans = if text.is_empty() {
        Vec::new()
    } else {
        vec![LaidSpan { text, x }]
    };

    LaidLine {
        spans,
        baseline,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedMetrics;

    fn rect(width: f32, height: f32) -> Rect {
        Rect::new(Pt(0.0), Pt(0.0), Pt(width), Pt(height))
    }

    #[test]
    fn wraps_at_whitespace() {
        // 5pt per character at size 10
        let block = layout_block(
            &FixedMetrics::default(),
            rect(50.0, 100.0),
            "aaaa bbbb cccc",
            Pt(10.0),
            TextAlign::Left,
        )
        .expect("fits");
        let lines: Vec<&str> = block
            .lines
            .iter()
            .map(|l| l.spans[0].text.as_str())
            .collect();
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
        assert_eq!(block.top, Pt(100.0));
        assert!((*block.bottom - (100.0 - 2.0 * 40.0 / 3.0)).abs() < 1e-3);
    }

    #[test]
    fn long_words_break_between_characters() {
        let block = layout_block(
            &FixedMetrics::default(),
            rect(20.0, 100.0),
            "abcdefghij",
            Pt(10.0),
            TextAlign::Left,
        )
        .expect("fits");
        let lines: Vec<&str> = block
            .lines
            .iter()
            .map(|l| l.spans[0].text.as_str())
            .collect();
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn too_many_lines_overflow() {
        let r = rect(50.0, 20.0);
        let err = layout_block(
            &FixedMetrics::default(),
            r,
            "one\ntwo",
            Pt(10.0),
            TextAlign::Left,
        )
        .unwrap_err();
        assert_eq!(err, DrawError::Overflow { rect: r });
    }

    #[test]
    fn a_character_wider_than_the_box_overflows() {
        let err = layout_block(
            &FixedMetrics::default(),
            rect(4.0, 100.0),
            "x",
            Pt(10.0),
            TextAlign::Left,
        )
        .unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn alignment_moves_lines_horizontally() {
        let metrics = FixedMetrics::default();
        let r = rect(100.0, 50.0);
        let right = layout_block(&metrics, r, "abcd", Pt(10.0), TextAlign::Right).expect("fits");
        assert_eq!(right.lines[0].spans[0].x, Pt(80.0));
        let center = layout_block(&metrics, r, "abcd", Pt(10.0), TextAlign::Center).expect("fits");
        assert_eq!(center.lines[0].spans[0].x, Pt(40.0));
    }

    #[test]
    fn justified_lines_span_the_width_except_the_last() {
        let block = layout_block(
            &FixedMetrics::default(),
            rect(60.0, 100.0),
            "aa bb cc dd ee",
            Pt(10.0),
            TextAlign::Justify,
        )
        .expect("fits");
        // "aa bb cc dd" is 55pt wide, so it fills the first line
        assert_eq!(block.lines.len(), 2);
        let first = &block.lines[0];
        assert_eq!(first.spans.len(), 4);
        assert_eq!(first.spans[0].x, Pt(0.0));
        assert!((*first.spans[3].x - 50.0).abs() < 1e-3);
        assert_eq!(block.lines[1].spans.len(), 1);
    }

    #[test]
    fn blank_text_takes_no_space() {
        let block = layout_block(
            &FixedMetrics::default(),
            rect(10.0, 0.0),
            "  \n ",
            Pt(10.0),
            TextAlign::Left,
        )
        .expect("empty text always fits");
        assert!(block.lines.is_empty());
        assert_eq!(block.height(), Pt(0.0));
    }
}
