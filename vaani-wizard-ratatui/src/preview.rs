//! Preview screen: the filled form rendered as the paper document will
//! read, with one selectable line per answer so any of them can be
//! reopened for amendment before export.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use vaani_form::display;
use vaani_form::{AnswerPath, AnswerRecord, FieldKind, FormSchema};

use crate::wizard::WizardState;

const DECLARATION_WIDTH: usize = 76;

/// What a rendered preview line stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Office heading above the form body.
    Letterhead,
    /// A section heading between groups of answers.
    SectionTitle,
    /// An answered field, reopenable via its key.
    Field(AnswerPath),
    /// Fixed text such as the declaration or the signature line.
    Static,
    /// Vertical spacing.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreviewLine {
    pub(crate) text: String,
    pub(crate) kind: LineKind,
}

impl PreviewLine {
    fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    fn blank() -> Self {
        Self::new("", LineKind::Blank)
    }
}

/// Lay the answered form out as lines, in document order. Hidden and
/// ephemeral fields are left out, exactly as the exported PDF leaves
/// them out.
pub(crate) fn preview_lines(schema: &FormSchema, answers: &AnswerRecord) -> Vec<PreviewLine> {
    let mut lines = Vec::new();

    let plan = schema.plan();
    if plan.letterhead().is_empty() {
        lines.push(PreviewLine::new(schema.title(), LineKind::Letterhead));
    } else {
        for heading in plan.letterhead() {
            lines.push(PreviewLine::new(heading.clone(), LineKind::Letterhead));
        }
    }
    lines.push(PreviewLine::blank());

    let mut current_section: Option<String> = None;
    for field in schema.fields() {
        if field.is_ephemeral() || !field.is_visible(answers) {
            continue;
        }
        if let Some(section) = field.section()
            && current_section.as_deref() != Some(section)
        {
            current_section = Some(section.to_string());
            lines.push(PreviewLine::new(section, LineKind::SectionTitle));
        }
        let text = match field.kind() {
            kind if kind.is_textual() => match field.hint().boxes {
                Some(cells) => format!(
                    "{}: {}",
                    field.label(),
                    boxed_row(&display::display_value(field, answers), cells)
                ),
                None => format!("{}: {}", field.label(), display::display_value(field, answers)),
            },
            FieldKind::Radio { options, .. } => {
                let marks: Vec<String> = options
                    .iter()
                    .map(|option| {
                        let mark = if display::option_selected(field, answers, option) {
                            "(•)"
                        } else {
                            "( )"
                        };
                        format!("{mark} {option}")
                    })
                    .collect();
                format!("{}: {}", field.label(), marks.join("  "))
            }
            FieldKind::Checkbox { options, .. } => {
                let marks: Vec<String> = options
                    .iter()
                    .map(|option| {
                        let mark = if display::option_selected(field, answers, option) {
                            "[✓]"
                        } else {
                            "[ ]"
                        };
                        format!("{mark} {option}")
                    })
                    .collect();
                format!("{}: {}", field.label(), marks.join("  "))
            }
            _ => format!("{}: {}", field.label(), display::display_value(field, answers)),
        };
        lines.push(PreviewLine::new(text, LineKind::Field(field.key().clone())));
    }

    if !plan.declaration().is_empty() {
        lines.push(PreviewLine::blank());
        for wrapped in wrap(plan.declaration(), DECLARATION_WIDTH) {
            lines.push(PreviewLine::new(wrapped, LineKind::Static));
        }
    }
    lines.push(PreviewLine::blank());
    lines.push(PreviewLine::new(
        "Signature / thumb impression of applicant: ____________________",
        LineKind::Static,
    ));

    lines
}

/// Indexes of the lines a cursor can land on.
pub(crate) fn selectable(lines: &[PreviewLine]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matches!(line.kind, LineKind::Field(_)))
        .map(|(index, _)| index)
        .collect()
}

/// One glyph per cell, padded with spaces. Glyphs past the last cell
/// are dropped, matching the character boxes on the printed form.
pub(crate) fn box_cells(value: &str, cells: usize) -> Vec<String> {
    let mut out: Vec<String> = value
        .chars()
        .take(cells)
        .map(|c| c.to_string())
        .collect();
    out.resize(cells, " ".to_string());
    out
}

/// The character boxes as a single row, e.g. `[1][2][ ]`.
pub(crate) fn boxed_row(value: &str, cells: usize) -> String {
    box_cells(value, cells)
        .iter()
        .map(|cell| format!("[{cell}]"))
        .collect()
}

/// Greedy word wrap for the declaration paragraph.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub(crate) fn draw_preview(frame: &mut Frame, state: &WizardState) {
    let theme = &state.theme;
    let lines = preview_lines(state.session.schema(), state.session.answers());
    let cursor_targets = selectable(&lines);
    let selected = state.preview_selected.min(cursor_targets.len().saturating_sub(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2), Constraint::Length(3)])
        .split(frame.area());

    let items: Vec<ListItem> = lines
        .iter()
        .map(|line| {
            let style = match line.kind {
                LineKind::Letterhead => Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
                LineKind::SectionTitle => Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                LineKind::Field(_) => Style::default().fg(theme.text),
                LineKind::Static | LineKind::Blank => Style::default().fg(theme.border),
            };
            ListItem::new(line.text.clone()).style(style)
        })
        .collect();

    let title = format!(" {} (preview) ", state.session.schema().title());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(Style::default().fg(theme.success)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut list_state = ListState::default();
    if let Some(&index) = cursor_targets.get(selected) {
        list_state.select(Some(index));
    }
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let notice = Paragraph::new(state.notice.clone().unwrap_or_default())
        .style(Style::default().fg(theme.highlight));
    frame.render_widget(notice, chunks[1]);

    let help = Paragraph::new("↑/↓: Choose a line | Enter: Amend | x: Export PDF | ←: Back | Esc: Cancel")
        .style(Style::default().fg(theme.secondary))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_form::{AnswerValue, DocumentPlan, FieldDescriptor, FormSession};

    fn mini_schema() -> FormSchema {
        FormSchema::new(
            "mini",
            "Mini application",
            vec![
                FieldDescriptor::new("fullName", "Full name", FieldKind::text())
                    .with_section("Applicant"),
                FieldDescriptor::new("married", "Married", FieldKind::yes_no())
                    .with_section("Applicant"),
                FieldDescriptor::new("spouseName", "Name of spouse", FieldKind::text())
                    .with_section("Applicant")
                    .with_condition(|answers| answers.bool_at("married")),
            ],
            DocumentPlan::new("mini.pdf")
                .with_letterhead(["Office of the Mini Registrar"])
                .with_declaration("I solemnly affirm that the particulars given above are true."),
        )
    }

    #[test]
    fn hidden_fields_stay_out_of_the_preview() {
        let schema = mini_schema();
        let mut session = FormSession::new(schema);
        session
            .set_value("fullName", AnswerValue::Text("Asha Devi".into()))
            .unwrap();
        session.select_option(&"married".into(), "No").unwrap();

        let lines = preview_lines(session.schema(), session.answers());
        assert!(!lines.iter().any(|line| line.text.contains("spouse")));

        session.select_option(&"married".into(), "Yes").unwrap();
        let lines = preview_lines(session.schema(), session.answers());
        assert!(lines.iter().any(|line| line.text.contains("Name of spouse")));
    }

    #[test]
    fn sections_appear_once_per_group() {
        let session = FormSession::new(mini_schema());
        let lines = preview_lines(session.schema(), session.answers());
        let sections = lines
            .iter()
            .filter(|line| line.kind == LineKind::SectionTitle)
            .count();
        assert_eq!(sections, 1);
    }

    #[test]
    fn the_cursor_only_lands_on_answer_lines() {
        let session = FormSession::new(mini_schema());
        let lines = preview_lines(session.schema(), session.answers());
        for index in selectable(&lines) {
            assert!(matches!(lines[index].kind, LineKind::Field(_)));
        }
        // Letterhead, declaration and signature are not amendable.
        assert_eq!(selectable(&lines).len(), 2);
    }

    #[test]
    fn radio_answers_read_as_marked_options() {
        let mut session = FormSession::new(mini_schema());
        session.select_option(&"married".into(), "Yes").unwrap();

        let lines = preview_lines(session.schema(), session.answers());
        let married = lines
            .iter()
            .find(|line| line.text.starts_with("Married"))
            .unwrap();
        assert!(married.text.contains("(•) Yes"));
        assert!(married.text.contains("( ) No"));
    }

    #[test]
    fn the_declaration_and_signature_close_the_preview() {
        let session = FormSession::new(mini_schema());
        let lines = preview_lines(session.schema(), session.answers());
        assert!(lines.iter().any(|line| line.text.contains("solemnly affirm")));
        assert!(
            lines
                .last()
                .unwrap()
                .text
                .starts_with("Signature / thumb impression")
        );
    }

    #[test]
    fn aadhaar_numbers_render_in_twelve_boxes() {
        let mut session = FormSession::new(vaani_forms::voter_id::schema());
        session
            .set_value("aadhaarNumber", AnswerValue::Text("123456789012".into()))
            .unwrap();

        let lines = preview_lines(session.schema(), session.answers());
        let aadhaar = lines
            .iter()
            .find(|line| line.text.starts_with("Aadhaar number"))
            .unwrap();
        assert_eq!(aadhaar.text.matches('[').count(), 12);
        assert!(aadhaar.text.contains("[1][2][3]"));
    }

    #[test]
    fn box_rows_pad_and_truncate_to_the_cell_count() {
        assert_eq!(box_cells("AB", 4), vec!["A", "B", " ", " "]);
        assert_eq!(box_cells("ABCDE", 3), vec!["A", "B", "C"]);
        assert_eq!(boxed_row("12", 3), "[1][2][ ]");
    }

    #[test]
    fn wrapping_keeps_words_whole() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }
}
