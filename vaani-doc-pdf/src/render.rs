//! Walks the layout tree onto pages as lopdf content operations.
//!
//! Everything here draws with the base-14 Helvetica fonts, so text widths
//! are approximated from a small per-glyph advance table. That is accurate
//! enough for wrapping and centering on a form facsimile; it is not a text
//! shaper.

use lopdf::Object;
use lopdf::content::Operation;

use crate::layout::DocNode;
use crate::page::{MARGIN_MM, MM_TO_PT, PAGE_WIDTH_MM, PageBuilder, x_pt, y_pt};

pub(crate) const FONT_REGULAR: &str = "F1";
pub(crate) const FONT_BOLD: &str = "F2";

const TITLE_PT: f32 = 14.0;
const HEADING_PT: f32 = 11.0;
const BODY_PT: f32 = 10.0;

/// Height of a single labeled row.
const ROW_MM: f32 = 7.0;
/// Height of one wrapped text line.
const LINE_MM: f32 = 5.2;
/// Side of one character box.
const BOX_MM: f32 = 6.5;
/// Side of one checkbox glyph.
const CHECK_MM: f32 = 4.2;
/// Where the box run of a character-box row starts, relative to the row.
const LABEL_COL_MM: f32 = 70.0;
const SECTION_TITLE_MM: f32 = 8.0;
const SECTION_INDENT_MM: f32 = 3.0;

/// Render a document tree into per-page operation lists.
pub(crate) fn render_nodes(nodes: &[DocNode], break_after_mm: f32) -> Vec<Vec<Operation>> {
    let mut page = PageBuilder::new(break_after_mm);
    for node in nodes {
        render_node(&mut page, node, 0.0);
    }
    page.into_pages()
}

fn render_node(page: &mut PageBuilder, node: &DocNode, indent_mm: f32) {
    match node {
        DocNode::Letterhead(lines) => letterhead(page, lines),
        DocNode::Section { title, children } => {
            section_title(page, title);
            for child in children {
                render_node(page, child, SECTION_INDENT_MM);
            }
            page.advance(3.0);
        }
        DocNode::CharBoxes { label, text, cells } => {
            char_boxes(page, indent_mm, label, text, *cells);
        }
        DocNode::RuledLine { label, text } => ruled_line(page, indent_mm, label, text),
        DocNode::CheckRow { label, options } => check_row(page, indent_mm, label, options),
        DocNode::TextBlock(text) => text_block(page, indent_mm, text),
        DocNode::KeyValue { label, value } => key_value(page, indent_mm, label, value),
        DocNode::Spacer(mm) => page.advance(*mm),
    }
}

fn letterhead(page: &mut PageBuilder, lines: &[String]) {
    page.advance(2.0);
    for (i, line) in lines.iter().enumerate() {
        let (font, size) = match i {
            0 => (FONT_BOLD, TITLE_PT),
            1 => (FONT_BOLD, HEADING_PT),
            _ => (FONT_REGULAR, BODY_PT),
        };
        let row_mm = size / MM_TO_PT + 2.5;
        page.ensure_room(row_mm);
        let top = page.top_mm();
        let x = ((PAGE_WIDTH_MM - text_width_mm(line, size)) / 2.0).max(MARGIN_MM);
        text(page, font, size, x, top + row_mm - 1.8, line);
        page.advance(row_mm);
    }
    page.advance(2.0);
    let y = page.top_mm();
    rule(page, MARGIN_MM, y, PAGE_WIDTH_MM - MARGIN_MM, y, 0.9);
    page.advance(3.0);
}

fn section_title(page: &mut PageBuilder, title: &str) {
    page.advance(2.0);
    page.ensure_room(SECTION_TITLE_MM);
    let top = page.top_mm();
    text(
        page,
        FONT_BOLD,
        HEADING_PT,
        MARGIN_MM,
        top + SECTION_TITLE_MM - 2.5,
        title,
    );
    let y = top + SECTION_TITLE_MM - 1.0;
    rule(page, MARGIN_MM, y, PAGE_WIDTH_MM - MARGIN_MM, y, 0.7);
    page.advance(SECTION_TITLE_MM);
}

fn char_boxes(page: &mut PageBuilder, indent_mm: f32, label: &str, value: &str, cells: usize) {
    let row_mm = BOX_MM + 3.0;
    page.ensure_room(row_mm);
    let top = page.top_mm();
    let x = MARGIN_MM + indent_mm;
    text(page, FONT_REGULAR, BODY_PT, x, top + row_mm - 3.5, label);

    let box_top = top + 1.0;
    let mut glyphs = value.chars();
    for cell in 0..cells {
        let bx = x + LABEL_COL_MM + cell as f32 * BOX_MM;
        rect(page, bx, box_top, BOX_MM, BOX_MM, 0.8);
        // At most one glyph per box; anything past the last box is dropped.
        if let Some(glyph) = glyphs.next() {
            let glyph = glyph.to_string();
            let gx = bx + ((BOX_MM - text_width_mm(&glyph, BODY_PT)) / 2.0).max(0.0);
            text(page, FONT_REGULAR, BODY_PT, gx, box_top + BOX_MM - 1.8, &glyph);
        }
    }
    page.advance(row_mm);
}

fn ruled_line(page: &mut PageBuilder, indent_mm: f32, label: &str, value: &str) {
    page.ensure_room(ROW_MM);
    let top = page.top_mm();
    let x = MARGIN_MM + indent_mm;
    let baseline = top + ROW_MM - 2.0;
    text(page, FONT_REGULAR, BODY_PT, x, baseline, label);

    let line_start = x + text_width_mm(label, BODY_PT) + 3.0;
    if !value.is_empty() {
        text(page, FONT_REGULAR, BODY_PT, line_start + 1.5, baseline - 0.3, value);
    }
    let y = baseline + 0.8;
    rule(page, line_start, y, PAGE_WIDTH_MM - MARGIN_MM, y, 0.6);
    page.advance(ROW_MM);
}

fn check_row(page: &mut PageBuilder, indent_mm: f32, label: &str, options: &[(String, bool)]) {
    page.ensure_room(ROW_MM);
    let top = page.top_mm();
    let x = MARGIN_MM + indent_mm;
    text(page, FONT_REGULAR, BODY_PT, x, top + ROW_MM - 2.0, label);
    page.advance(ROW_MM);

    fn flush(page: &mut PageBuilder, line: &[(f32, &str, bool)]) {
        let row_mm = CHECK_MM + 2.5;
        page.ensure_room(row_mm);
        let top = page.top_mm();
        for (option_x, option, ticked) in line {
            checkbox(page, *option_x, top + 0.6, *ticked);
            text(
                page,
                FONT_REGULAR,
                BODY_PT,
                option_x + CHECK_MM + 2.0,
                top + 0.6 + CHECK_MM - 0.6,
                option,
            );
        }
        page.advance(row_mm);
    }

    let x0 = x + 4.0;
    let right = PAGE_WIDTH_MM - MARGIN_MM;
    let mut cx = x0;
    let mut line: Vec<(f32, &str, bool)> = Vec::new();
    for (option, ticked) in options {
        let width = CHECK_MM + 2.0 + text_width_mm(option, BODY_PT);
        if !line.is_empty() && cx + width > right {
            flush(page, &line);
            line.clear();
            cx = x0;
        }
        line.push((cx, option.as_str(), *ticked));
        cx += width + 8.0;
    }
    if !line.is_empty() {
        flush(page, &line);
    }
}

fn text_block(page: &mut PageBuilder, indent_mm: f32, body: &str) {
    let x = MARGIN_MM + indent_mm;
    let width = PAGE_WIDTH_MM - MARGIN_MM - x;
    for line in wrap_text(body, width, BODY_PT) {
        page.ensure_room(LINE_MM);
        let top = page.top_mm();
        if !line.is_empty() {
            text(page, FONT_REGULAR, BODY_PT, x, top + LINE_MM - 1.5, &line);
        }
        page.advance(LINE_MM);
    }
}

fn key_value(page: &mut PageBuilder, indent_mm: f32, label: &str, value: &str) {
    let x = MARGIN_MM + indent_mm;
    let label_text = format!("{label}: ");
    let value_x = x + text_width_mm(&label_text, BODY_PT);
    let value_width = (PAGE_WIDTH_MM - MARGIN_MM - value_x).max(20.0);
    let lines = wrap_text(value, value_width, BODY_PT);

    page.ensure_room(ROW_MM);
    let top = page.top_mm();
    text(page, FONT_BOLD, BODY_PT, x, top + ROW_MM - 2.0, &label_text);
    if let Some(first) = lines.first().filter(|line| !line.is_empty()) {
        text(page, FONT_REGULAR, BODY_PT, value_x, top + ROW_MM - 2.0, first);
    }
    page.advance(ROW_MM);

    for line in lines.iter().skip(1) {
        page.ensure_room(LINE_MM);
        let top = page.top_mm();
        text(page, FONT_REGULAR, BODY_PT, value_x, top + LINE_MM - 1.5, line);
        page.advance(LINE_MM);
    }
}

fn text(page: &mut PageBuilder, font: &str, size_pt: f32, x_mm: f32, baseline_mm: f32, body: &str) {
    page.push(Operation::new("BT", vec![]));
    page.push(Operation::new("Tf", vec![font.into(), size_pt.into()]));
    page.push(Operation::new(
        "Td",
        vec![x_pt(x_mm).into(), y_pt(baseline_mm).into()],
    ));
    page.push(Operation::new("Tj", vec![Object::string_literal(body)]));
    page.push(Operation::new("ET", vec![]));
}

fn rule(page: &mut PageBuilder, x1_mm: f32, y1_mm: f32, x2_mm: f32, y2_mm: f32, stroke_pt: f32) {
    page.push(Operation::new("w", vec![stroke_pt.into()]));
    page.push(Operation::new(
        "m",
        vec![x_pt(x1_mm).into(), y_pt(y1_mm).into()],
    ));
    page.push(Operation::new(
        "l",
        vec![x_pt(x2_mm).into(), y_pt(y2_mm).into()],
    ));
    page.push(Operation::new("S", vec![]));
}

fn rect(page: &mut PageBuilder, x_mm: f32, top_mm: f32, w_mm: f32, h_mm: f32, stroke_pt: f32) {
    page.push(Operation::new("w", vec![stroke_pt.into()]));
    page.push(Operation::new(
        "re",
        vec![
            x_pt(x_mm).into(),
            y_pt(top_mm + h_mm).into(),
            (w_mm * MM_TO_PT).into(),
            (h_mm * MM_TO_PT).into(),
        ],
    ));
    page.push(Operation::new("S", vec![]));
}

/// An empty square, or a square with a drawn two-stroke tick.
fn checkbox(page: &mut PageBuilder, x_mm: f32, top_mm: f32, ticked: bool) {
    rect(page, x_mm, top_mm, CHECK_MM, CHECK_MM, 0.9);
    if ticked {
        page.push(Operation::new("w", vec![1.1_f32.into()]));
        page.push(Operation::new(
            "m",
            vec![
                x_pt(x_mm + 0.2 * CHECK_MM).into(),
                y_pt(top_mm + 0.55 * CHECK_MM).into(),
            ],
        ));
        page.push(Operation::new(
            "l",
            vec![
                x_pt(x_mm + 0.42 * CHECK_MM).into(),
                y_pt(top_mm + 0.78 * CHECK_MM).into(),
            ],
        ));
        page.push(Operation::new(
            "l",
            vec![
                x_pt(x_mm + 0.85 * CHECK_MM).into(),
                y_pt(top_mm + 0.2 * CHECK_MM).into(),
            ],
        ));
        page.push(Operation::new("S", vec![]));
    }
}

/// Approximate advance width of one Helvetica glyph, in em units.
fn advance_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '!' | '.' | ',' | ':' | ';' | '\'' | '|' => 0.26,
        'f' | 't' | 'r' | 'I' | ' ' | '(' | ')' | '[' | ']' | '-' | '/' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' => 0.89,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.67,
        _ => 0.52,
    }
}

pub(crate) fn text_width_mm(body: &str, size_pt: f32) -> f32 {
    let ems: f32 = body.chars().map(advance_em).sum();
    ems * size_pt / MM_TO_PT
}

/// Greedy word wrap against the approximate advance widths. A single word
/// wider than the column gets its own overlong line rather than splitting.
pub(crate) fn wrap_text(body: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in body.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if line.is_empty() || text_width_mm(&candidate, size_pt) <= width_mm {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
