//! Greedy line breaking with base-14 metrics.

use folio_render_core::{Base14Font, PageSurface, TextRun};
use folio_style::{Margins, ResolvedStyle, TextAlign, TextDecoration};
use folio_types::{Color, Point, Rect};

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words wider than a line are split
/// between characters. Empty text yields no lines.
pub fn wrap_lines(text: &str, font: Base14Font, size: f32, max_width: f32) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;
        for word in paragraph.split_whitespace() {
            let word_width = font.text_width(word, size);
            let needed = if line.is_empty() { word_width } else { line_width + space + word_width };
            if needed <= max_width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_width = needed;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
            } else {
                for ch in word.chars() {
                    let w = font.char_width(ch) as f32 * size / 1000.0;
                    if !line.is_empty() && line_width + w > max_width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0.0;
                    }
                    line.push(ch);
                    line_width += w;
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Text broken into lines for one box, ready to measure or draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: Base14Font,
    pub size: f32,
    pub advance: f32,
}

impl TextBlock {
    /// Lays out `text` for a box `width` wide, inside the style padding.
    /// Without `wrap` only explicit newlines break.
    pub fn layout(text: &str, style: &ResolvedStyle, width: f32, wrap: bool) -> Self {
        let font = Base14Font::from_style(style);
        let size = style.font_size.max(0.0);
        let inner = (width - style.padding.horizontal()).max(0.0);
        let lines = if wrap {
            wrap_lines(text, font, size, inner)
        } else if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        Self {
            lines,
            font,
            size,
            advance: style.line_advance().max(0.0),
        }
    }

    /// Height of the lines alone.
    pub fn text_height(&self) -> f32 {
        self.lines.len() as f32 * self.advance
    }

    /// Height including vertical padding.
    pub fn height(&self, padding: &Margins) -> f32 {
        self.text_height() + padding.vertical()
    }

    /// Draws the lines into `rect` (page space), honoring padding,
    /// alignment and decoration from `style`.
    pub fn draw(&self, surface: &mut dyn PageSurface, rect: Rect, style: &ResolvedStyle) {
        let pad = &style.padding;
        let inner_x = rect.x + pad.left;
        let inner_w = (rect.width - pad.horizontal()).max(0.0);
        let inner_h = (rect.height - pad.vertical()).max(0.0);
        let top = rect.y + rect.height - pad.top - style.vertical_align.offset(inner_h, self.text_height());
        let ascent = self.font.ascent() * self.size / 1000.0;
        let leading = (self.advance - self.size) / 2.0;

        for (i, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let width = self.font.text_width(line, self.size);
            let x = match style.text_align {
                TextAlign::Left | TextAlign::Justify => inner_x,
                TextAlign::Right => inner_x + inner_w - width,
                TextAlign::Center => inner_x + (inner_w - width) / 2.0,
            };
            let baseline = top - i as f32 * self.advance - leading - ascent;
            surface.text(&TextRun {
                text: line,
                origin: Point::new(x, baseline),
                font: self.font,
                size: self.size,
                color: style.color.clone(),
            });
            self.decorate(surface, style, x, baseline, width, &style.color);
        }
    }

    fn decorate(
        &self,
        surface: &mut dyn PageSurface,
        style: &ResolvedStyle,
        x: f32,
        baseline: f32,
        width: f32,
        color: &Color,
    ) {
        let y = match style.text_decoration {
            TextDecoration::None => return,
            TextDecoration::Underline => baseline - self.size * 0.12,
            TextDecoration::LineThrough => baseline + self.size * 0.3,
        };
        let thickness = (self.size * 0.06).max(0.5);
        surface.line(Point::new(x, y), Point::new(x + width, y), color, thickness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render_core::testing::{DrawOp, RecordingSurface};

    const F: Base14Font = Base14Font::Courier;

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_lines("", F, 10.0, 100.0).is_empty());
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        // Courier at 10pt: 6pt per character.
        let lines = wrap_lines("aaa bbb ccc", F, 10.0, 45.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_newlines_and_blank_paragraphs() {
        let lines = wrap_lines("one\n\ntwo", F, 10.0, 100.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let lines = wrap_lines("abcdefghij", F, 10.0, 24.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_layout_respects_padding_and_height() {
        let style = ResolvedStyle {
            font_family: "Courier".into(),
            font_size: 10.0,
            line_height: 1.5,
            padding: Margins::all(5.0),
            ..Default::default()
        };
        let block = TextBlock::layout("aaa bbb", &style, 40.0, true);
        assert_eq!(block.lines, vec!["aaa", "bbb"]);
        assert_eq!(block.text_height(), 30.0);
        assert_eq!(block.height(&style.padding), 40.0);

        let unwrapped = TextBlock::layout("aaa bbb", &style, 40.0, false);
        assert_eq!(unwrapped.lines.len(), 1);
    }

    #[test]
    fn test_draw_alignment_and_underline() {
        let style = ResolvedStyle {
            font_family: "Courier".into(),
            font_size: 10.0,
            line_height: 1.0,
            text_align: TextAlign::Right,
            text_decoration: TextDecoration::Underline,
            ..Default::default()
        };
        let block = TextBlock::layout("abc", &style, 100.0, true);
        let mut surface = RecordingSurface::new();
        block.draw(&mut surface, Rect::new(0.0, 0.0, 100.0, 20.0), &style);

        match &surface.ops[0] {
            DrawOp::Text { origin, .. } => {
                assert_eq!(origin.x, 82.0);
                assert!((origin.y - (20.0 - 6.29)).abs() < 1e-3);
            }
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(surface.count(|op| matches!(op, DrawOp::Line(..))), 1);
    }
}
