//! Lays a letter out on a fixed-width sheet: one paragraph per input line,
//! greedy word wrap, height growing with content.
//!
//! Units are CSS pixels; the sheet is scaled onto the page afterwards, so
//! only proportions matter.

use crate::export::font_metrics::{get_metrics, FontFamily, FontMetricTable};

/// Ascent as a fraction of the font size, used to place the baseline.
const ASCENT_RATIO: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct SheetStyle {
    pub font: FontFamily,
    pub width_px: f32,
    pub padding_px: f32,
    pub font_size_px: f32,
    pub line_height_px: f32,
    /// Space after every paragraph.
    pub paragraph_gap_px: f32,
}

/// A4-friendly sheet: 794px wide, 32px padding, 18px serif on a 28px line.
pub fn default_sheet_style() -> SheetStyle {
    SheetStyle {
        font: FontFamily::TimesRoman,
        width_px: 794.0,
        padding_px: 32.0,
        font_size_px: 18.0,
        line_height_px: 28.0,
        paragraph_gap_px: 8.0,
    }
}

impl SheetStyle {
    /// Usable text width in em units.
    pub fn text_width_em(&self) -> f32 {
        (self.width_px - 2.0 * self.padding_px) / self.font_size_px
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLine {
    pub text: String,
    pub x: f32,
    /// Baseline, measured from the top of the sheet.
    pub baseline_y: f32,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<SheetLine>,
    pub style: SheetStyle,
}

pub fn layout_sheet(letter: &str, style: &SheetStyle) -> Sheet {
    let metrics = get_metrics(style.font);
    let max_width_em = style.text_width_em();
    let baseline_offset =
        (style.line_height_px - style.font_size_px) / 2.0 + style.font_size_px * ASCENT_RATIO;

    let mut lines = Vec::new();
    let mut cursor_y = style.padding_px;

    if !letter.is_empty() {
        for paragraph in letter.split('\n') {
            let wrapped = wrap_paragraph(paragraph.trim_end_matches('\r'), metrics, max_width_em);
            // A blank paragraph still occupies one line.
            let line_count = wrapped.len().max(1);
            for (i, text) in wrapped.into_iter().enumerate() {
                lines.push(SheetLine {
                    text,
                    x: style.padding_px,
                    baseline_y: cursor_y + i as f32 * style.line_height_px + baseline_offset,
                });
            }
            cursor_y += line_count as f32 * style.line_height_px + style.paragraph_gap_px;
        }
    }

    Sheet {
        width: style.width_px,
        height: cursor_y + style.padding_px,
        lines,
        style: style.clone(),
    }
}

/// Greedy word wrap at `max_width_em`. Runs of whitespace collapse to one
/// space; a single word wider than the line is broken between characters.
pub fn wrap_paragraph(text: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);

        if word_w > max_width_em {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, max_width_em);
            // The last piece keeps filling the line with the words after it.
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = metrics.measure_str(&tail);
            current = tail;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w > max_width_em {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_width(c);
        if !piece.is_empty() && width + w > max_width_em {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
