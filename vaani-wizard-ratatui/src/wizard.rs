//! Full-screen terminal wizard over a [`FormSession`]: one visible field
//! per screen, dictation into text fields via F2, a document preview with
//! per-line amendment, and PDF export.
//!
//! The session owns every answer and all navigation; this module keeps
//! only per-step scratch (the input buffer, cursor and selection indexes)
//! and rebuilds that scratch whenever the cursor moves. Validation
//! failures, capture problems and export failures are shown on screen and
//! the wizard keeps running; only terminal I/O aborts a run.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use vaani_form::display;
use vaani_form::{
    AnswerValue, FieldDescriptor, FieldKind, FileHandle, FormSchema, FormSession, StepOutcome,
};
use vaani_speech::{CaptureError, CaptureHandle, SpeechCapture};

use crate::preview;

/// How often the event loop wakes up to poll an in-flight capture.
const TICK: Duration = Duration::from_millis(100);

/// Colors for the wizard screens.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The applicant confirmed the preview; the PDF is at this path.
    Exported(PathBuf),
    /// The applicant backed out; nothing was written.
    Cancelled,
}

/// Terminal failures. Everything else is reported on screen and the
/// wizard keeps running.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// The wizard itself. Configure with the builder methods, then call
/// [`FormWizard::run`] once per form.
pub struct FormWizard {
    theme: Theme,
    speech: Option<Box<dyn SpeechCapture>>,
    capture_language: String,
    export_dir: PathBuf,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWizard {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            speech: None,
            capture_language: "hi".to_string(),
            export_dir: PathBuf::from("."),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Attach a speech engine. F2 then dictates into text fields.
    pub fn with_speech(mut self, capture: impl SpeechCapture + 'static) -> Self {
        self.speech = Some(Box::new(capture));
        self
    }

    /// Language tag handed to the speech engine on every capture.
    /// Defaults to Hindi.
    pub fn with_capture_language(mut self, language: impl Into<String>) -> Self {
        self.capture_language = language.into();
        self
    }

    /// Directory the exported PDF is written to. Defaults to the
    /// working directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Walk an applicant through one form. Returns when they export or
    /// cancel; the filled answers die with the session either way.
    pub fn run(&mut self, schema: FormSchema) -> Result<WizardOutcome, WizardError> {
        let mut terminal = self.setup_terminal()?;
        let mut state = WizardState::new(FormSession::new(schema), self.theme.clone());
        let outcome = self.run_loop(&mut terminal, &mut state);
        state.stop_capture();
        self.restore_terminal(&mut terminal)?;
        outcome
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        state: &mut WizardState,
    ) -> Result<WizardOutcome, WizardError> {
        loop {
            deliver_capture(state);

            let speech_available = self.speech.is_some();
            terminal.draw(|frame| draw(frame, state, speech_available))?;

            if !event::poll(TICK)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if state.confirm_return.is_some() {
                handle_confirm_key(state, key.code);
                continue;
            }
            if state.session.in_preview() {
                if let Some(outcome) = self.handle_preview_key(state, key.code) {
                    return Ok(outcome);
                }
                continue;
            }
            if let Some(outcome) = self.handle_step_key(state, key.code) {
                return Ok(outcome);
            }
        }
    }

    fn handle_step_key(&mut self, state: &mut WizardState, code: KeyCode) -> Option<WizardOutcome> {
        let Some(field) = state.session.current_field().cloned() else {
            if code == KeyCode::Esc {
                return Some(WizardOutcome::Cancelled);
            }
            return None;
        };
        match code {
            KeyCode::Esc => {
                state.stop_capture();
                return Some(WizardOutcome::Cancelled);
            }
            KeyCode::F(2) => self.toggle_capture(state, &field),
            KeyCode::Enter => submit(state, &field),
            KeyCode::Char(' ') if matches!(field.kind(), FieldKind::Checkbox { .. }) => {
                toggle_selected(state, &field);
            }
            KeyCode::Char(c) if takes_typed_text(field.kind()) => {
                let at = byte_index(&state.input, state.cursor_pos);
                state.input.insert(at, c);
                state.cursor_pos += 1;
                state.error_message = None;
            }
            KeyCode::Backspace => {
                if !takes_typed_text(field.kind()) || state.input.is_empty() {
                    go_back(state);
                } else if state.cursor_pos > 0 {
                    state.cursor_pos -= 1;
                    let at = byte_index(&state.input, state.cursor_pos);
                    state.input.remove(at);
                }
            }
            KeyCode::Delete => match field.kind() {
                FieldKind::File if state.input.is_empty() => remove_selected_file(state, &field),
                kind if takes_typed_text(kind) => {
                    if state.cursor_pos < state.input.chars().count() {
                        let at = byte_index(&state.input, state.cursor_pos);
                        state.input.remove(at);
                    }
                }
                _ => {}
            },
            KeyCode::Left => {
                if takes_typed_text(field.kind()) {
                    state.cursor_pos = state.cursor_pos.saturating_sub(1);
                } else {
                    go_back(state);
                }
            }
            KeyCode::Right => {
                if takes_typed_text(field.kind()) && state.cursor_pos < state.input.chars().count()
                {
                    state.cursor_pos += 1;
                }
            }
            KeyCode::Home => state.cursor_pos = 0,
            KeyCode::End => state.cursor_pos = state.input.chars().count(),
            KeyCode::Up => move_selection(state, &field, -1),
            KeyCode::Down => move_selection(state, &field, 1),
            _ => {}
        }
        None
    }

    fn handle_preview_key(
        &mut self,
        state: &mut WizardState,
        code: KeyCode,
    ) -> Option<WizardOutcome> {
        match code {
            KeyCode::Esc => return Some(WizardOutcome::Cancelled),
            KeyCode::Up => state.preview_selected = state.preview_selected.saturating_sub(1),
            KeyCode::Down => {
                let lines =
                    preview::preview_lines(state.session.schema(), state.session.answers());
                if state.preview_selected + 1 < preview::selectable(&lines).len() {
                    state.preview_selected += 1;
                }
            }
            KeyCode::Enter => {
                let lines =
                    preview::preview_lines(state.session.schema(), state.session.answers());
                let targets = preview::selectable(&lines);
                if let Some(&index) = targets.get(state.preview_selected)
                    && let preview::LineKind::Field(key) = &lines[index].kind
                {
                    state.session.jump_to_edit(key);
                    state.sync_from_session();
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                match vaani_doc_pdf::export(
                    state.session.schema(),
                    state.session.answers(),
                    &self.export_dir,
                ) {
                    Ok(path) => return Some(WizardOutcome::Exported(path)),
                    Err(err) => {
                        state.notice =
                            Some(format!("Export failed: {err}. Your answers are kept."));
                    }
                }
            }
            KeyCode::Left | KeyCode::Backspace => {
                state.session.retreat();
                state.sync_from_session();
            }
            _ => {}
        }
        None
    }

    fn toggle_capture(&mut self, state: &mut WizardState, field: &FieldDescriptor) {
        if !field.kind().is_textual() {
            return;
        }
        if state.capture.is_some() {
            state.stop_capture();
            state.notice = Some("Voice capture stopped.".to_string());
            return;
        }
        let Some(speech) = self.speech.as_mut() else {
            state.notice = Some(capture_notice(&CaptureError::Unsupported));
            return;
        };
        match speech.start_capture(&self.capture_language) {
            Ok(handle) => {
                state.capture = Some(handle);
                state.notice = Some("Listening... speak now, then pause.".to_string());
            }
            Err(err) => state.notice = Some(capture_notice(&err)),
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, WizardError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), WizardError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Everything the draw functions read. The session is the source of
/// truth; the rest is per-step scratch rebuilt on every navigation.
pub(crate) struct WizardState {
    pub(crate) session: FormSession,
    pub(crate) input: String,
    pub(crate) cursor_pos: usize,
    pub(crate) selected_option: usize,
    pub(crate) attached_selected: usize,
    pub(crate) error_message: Option<String>,
    pub(crate) notice: Option<String>,
    pub(crate) capture: Option<CaptureHandle>,
    pub(crate) confirm_return: Option<usize>,
    pub(crate) preview_selected: usize,
    pub(crate) theme: Theme,
}

impl WizardState {
    fn new(session: FormSession, theme: Theme) -> Self {
        let mut state = Self {
            session,
            input: String::new(),
            cursor_pos: 0,
            selected_option: 0,
            attached_selected: 0,
            error_message: None,
            notice: None,
            capture: None,
            confirm_return: None,
            preview_selected: 0,
            theme,
        };
        state.sync_from_session();
        state
    }

    /// Rebuild the scratch for the field now under the cursor. Text
    /// fields reopen with their stored answer so an amendment starts
    /// from what was already given.
    fn sync_from_session(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
        self.selected_option = 0;
        self.attached_selected = 0;
        self.error_message = None;
        self.notice = None;

        let Some(field) = self.session.current_field() else {
            return;
        };
        match field.kind() {
            kind if kind.is_textual() => {
                let text = self
                    .session
                    .answers()
                    .text_at(field.key().clone())
                    .to_string();
                self.cursor_pos = text.chars().count();
                self.input = text;
            }
            FieldKind::Radio { options, .. } => {
                self.selected_option = options
                    .iter()
                    .position(|option| {
                        display::option_selected(field, self.session.answers(), option)
                    })
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    fn stop_capture(&mut self) {
        if let Some(handle) = self.capture.take() {
            handle.cancel();
        }
    }
}

/// Whether the current screen routes printable keys into the input
/// buffer. File fields take a typed path, so they count too.
fn takes_typed_text(kind: &FieldKind) -> bool {
    kind.is_textual() || matches!(kind, FieldKind::File)
}

/// Move a finished capture's outcome into the input buffer or a notice.
fn deliver_capture(state: &mut WizardState) {
    if let Some(handle) = state.capture.as_mut()
        && let Some(outcome) = handle.poll()
    {
        state.capture = None;
        match outcome {
            Ok(transcript) => {
                append_transcript(&mut state.input, transcript.text());
                state.cursor_pos = state.input.chars().count();
                state.notice = None;
            }
            Err(err) => state.notice = Some(capture_notice(&err)),
        }
    }
}

fn submit(state: &mut WizardState, field: &FieldDescriptor) {
    match field.kind() {
        kind if kind.is_textual() => {
            let value = AnswerValue::Text(state.input.clone());
            if let Err(message) = field.validate_answer(&value, state.session.answers()) {
                state.error_message = Some(message);
                return;
            }
            if let Err(err) = state.session.set_value(field.key().clone(), value) {
                state.error_message = Some(err.to_string());
                return;
            }
            advance_flow(state);
        }
        FieldKind::Radio { options, .. } => {
            let Some(option) = options.get(state.selected_option) else {
                return;
            };
            if let Err(err) = state.session.select_option(field.key(), option) {
                state.error_message = Some(err.to_string());
                return;
            }
            advance_flow(state);
        }
        FieldKind::Checkbox { .. } => advance_flow(state),
        FieldKind::File => {
            if state.input.is_empty() {
                advance_flow(state);
            } else {
                attach_typed_path(state, field);
            }
        }
        _ => {}
    }
}

fn attach_typed_path(state: &mut WizardState, field: &FieldDescriptor) {
    let raw = state.input.trim().to_string();
    let path = PathBuf::from(&raw);
    if !path.exists() {
        state.error_message = Some(format!("No file found at '{raw}'"));
        return;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(raw);
    match state.session.push_file(field.key(), FileHandle::new(name, path)) {
        Ok(()) => {
            state.input.clear();
            state.cursor_pos = 0;
            state.error_message = None;
        }
        Err(err) => state.error_message = Some(err.to_string()),
    }
}

fn toggle_selected(state: &mut WizardState, field: &FieldDescriptor) {
    let Some(option) = field.kind().options().get(state.selected_option) else {
        return;
    };
    if let Err(err) = state.session.toggle_option(field.key(), option) {
        state.error_message = Some(err.to_string());
    }
}

fn remove_selected_file(state: &mut WizardState, field: &FieldDescriptor) {
    let count = attached_count(state, field);
    if count == 0 {
        return;
    }
    let index = state.attached_selected.min(count - 1);
    if let Err(err) = state.session.remove_file(field.key(), index) {
        state.error_message = Some(err.to_string());
        return;
    }
    state.attached_selected = state.attached_selected.min(count.saturating_sub(2));
}

fn attached_count(state: &WizardState, field: &FieldDescriptor) -> usize {
    state
        .session
        .answers()
        .get_file_list(field.key())
        .map(<[FileHandle]>::len)
        .unwrap_or(0)
}

fn move_selection(state: &mut WizardState, field: &FieldDescriptor, delta: isize) {
    let count = match field.kind() {
        FieldKind::Radio { options, .. } | FieldKind::Checkbox { options, .. } => options.len(),
        FieldKind::File => attached_count(state, field),
        _ => return,
    };
    if count == 0 {
        return;
    }
    let slot = if matches!(field.kind(), FieldKind::File) {
        &mut state.attached_selected
    } else {
        &mut state.selected_option
    };
    let next = slot.saturating_add_signed(delta);
    if next < count {
        *slot = next;
    }
}

fn go_back(state: &mut WizardState) {
    if !can_go_back(state) {
        return;
    }
    state.stop_capture();
    state.session.retreat();
    state.sync_from_session();
}

/// Previous is unavailable on the first step and while amending from
/// the preview.
fn can_go_back(state: &WizardState) -> bool {
    state.session.editing_key().is_none()
        && matches!(state.session.step_position(), Some((index, _)) if index > 0)
}

fn advance_flow(state: &mut WizardState) {
    state.stop_capture();
    match state.session.advance() {
        StepOutcome::Moved => state.sync_from_session(),
        StepOutcome::EnteredPreview => {
            state.sync_from_session();
            state.preview_selected = 0;
        }
        StepOutcome::ConfirmReturn => state.confirm_return = Some(0),
    }
}

fn handle_confirm_key(state: &mut WizardState, code: KeyCode) {
    let Some(selected) = state.confirm_return else {
        return;
    };
    match code {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            state.confirm_return = Some(1 - selected.min(1));
        }
        KeyCode::Enter => {
            state.confirm_return = None;
            if selected == 0 {
                close_edit(state);
            }
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.confirm_return = None;
            close_edit(state);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.confirm_return = None,
        _ => {}
    }
}

fn close_edit(state: &mut WizardState) {
    state.session.finish_edit();
    state.sync_from_session();
    state.preview_selected = 0;
}

fn draw(frame: &mut Frame, state: &WizardState, speech_available: bool) {
    if state.session.in_preview() {
        preview::draw_preview(frame, state);
    } else {
        draw_step(frame, state, speech_available);
    }
    if state.confirm_return.is_some() {
        draw_confirm(frame, state);
    }
}

fn draw_step(frame: &mut Frame, state: &WizardState, speech_available: bool) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(state.session.schema().title())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let progress = match (state.session.editing_key(), state.session.step_position()) {
        (Some(_), _) => Paragraph::new("Amending one answer; Enter returns to the preview.")
            .style(Style::default().fg(theme.highlight)),
        (None, Some((index, total))) => Paragraph::new(progress_line(index + 1, total, 24))
            .style(Style::default().fg(theme.secondary)),
        (None, None) => Paragraph::new(""),
    };
    frame.render_widget(progress, chunks[1]);

    let Some(field) = state.session.current_field() else {
        return;
    };
    draw_field(frame, chunks[2], state, field);

    let help = Paragraph::new(help_line(field.kind(), state, speech_available))
        .style(Style::default().fg(theme.secondary))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, chunks[3]);
}

fn draw_field(frame: &mut Frame, area: Rect, state: &WizardState, field: &FieldDescriptor) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(area);

    let section = field.section().unwrap_or("Question");
    let prompt = Paragraph::new(field.label())
        .style(
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {section} "))
                .title_style(Style::default().fg(theme.primary)),
        );
    frame.render_widget(prompt, chunks[0]);

    match field.kind() {
        kind if kind.is_textual() => draw_text_input(frame, chunks[1], state, field),
        FieldKind::Radio { options, .. } => {
            draw_options(frame, chunks[1], state, field, options, false);
        }
        FieldKind::Checkbox { options, .. } => {
            draw_options(frame, chunks[1], state, field, options, true);
        }
        FieldKind::File => draw_file_input(frame, chunks[1], state, field),
        _ => {}
    }

    if let Some(message) = &state.error_message {
        let error = Paragraph::new(message.as_str()).style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(error, chunks[2]);
    } else if let Some(notice) = &state.notice {
        let notice = Paragraph::new(notice.as_str()).style(Style::default().fg(theme.highlight));
        frame.render_widget(notice, chunks[2]);
    }
}

fn draw_text_input(frame: &mut Frame, area: Rect, state: &WizardState, field: &FieldDescriptor) {
    let theme = &state.theme;
    let listening = state.capture.is_some();
    let title = if listening {
        " Answer (listening) "
    } else {
        " Answer "
    };

    let hint = field.hint();
    let showing_example = state.input.is_empty() && hint.example.is_some();
    let text = if showing_example {
        hint.example.as_deref().unwrap_or_default()
    } else {
        state.input.as_str()
    };
    let style = if showing_example {
        Style::default().fg(theme.border)
    } else {
        Style::default().fg(theme.text)
    };
    let border = if listening {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.border)
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border),
    );
    frame.render_widget(input, area);
    frame.set_cursor_position((area.x + 1 + state.cursor_pos as u16, area.y + 1));
}

fn draw_options(
    frame: &mut Frame,
    area: Rect,
    state: &WizardState,
    field: &FieldDescriptor,
    options: &[String],
    multi: bool,
) {
    let theme = &state.theme;
    let answers = state.session.answers();
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let marked = display::option_selected(field, answers, option);
            let glyph = match (multi, marked) {
                (true, true) => "[✓]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let style = if index == state.selected_option {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else if marked {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("{glyph} {option}")).style(style)
        })
        .collect();

    let title = if multi {
        let count = display::selected_options(field, answers).len();
        format!(" Select all that apply ({count} selected) ")
    } else {
        " Select one ".to_string()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("► ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_option));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_file_input(frame: &mut Frame, area: Rect, state: &WizardState, field: &FieldDescriptor) {
    let theme = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(2)])
        .split(area);

    let input = Paragraph::new(state.input.as_str())
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Path to attach (Enter adds, empty Enter continues) "),
        );
    frame.render_widget(input, chunks[0]);
    frame.set_cursor_position((chunks[0].x + 1 + state.cursor_pos as u16, chunks[0].y + 1));

    let files = state
        .session
        .answers()
        .get_file_list(field.key())
        .unwrap_or(&[]);
    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let style = if index == state.attached_selected {
                Style::default().fg(theme.highlight)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(file.name.clone()).style(style)
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Attached "))
        .highlight_symbol("► ");
    let mut list_state = ListState::default();
    if !files.is_empty() {
        list_state.select(Some(state.attached_selected.min(files.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_confirm(frame: &mut Frame, state: &WizardState) {
    let theme = &state.theme;
    let selected = state.confirm_return.unwrap_or(0);
    let area = centered_rect(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Answer updated ")
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(theme.highlight));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(2)])
        .split(inner);
    let question =
        Paragraph::new("Return to the preview?").style(Style::default().fg(theme.text));
    frame.render_widget(question, chunks[0]);

    let items: Vec<ListItem> = ["Yes, back to the preview", "No, keep editing"]
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let style = if index == selected {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(label).style(style)
        })
        .collect();
    let list = List::new(items).highlight_symbol("► ");
    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn help_line(kind: &FieldKind, state: &WizardState, speech_available: bool) -> String {
    let editing = state.session.editing_key().is_some();
    let next = if editing {
        "Done"
    } else {
        next_label(state.session.is_last_step())
    };
    let mut parts: Vec<String> = Vec::new();
    match kind {
        k if k.is_textual() => {
            parts.push(format!("Enter: {next}"));
            if speech_available {
                parts.push("F2: Dictate".to_string());
            }
            if can_go_back(state) {
                parts.push("Backspace (empty): Back".to_string());
            }
        }
        FieldKind::Radio { .. } => {
            parts.push("↑/↓: Choose".to_string());
            parts.push(format!("Enter: {next}"));
            if can_go_back(state) {
                parts.push("←: Back".to_string());
            }
        }
        FieldKind::Checkbox { .. } => {
            parts.push("↑/↓: Choose".to_string());
            parts.push("Space: Toggle".to_string());
            parts.push(format!("Enter: {next}"));
            if can_go_back(state) {
                parts.push("←: Back".to_string());
            }
        }
        FieldKind::File => {
            parts.push(format!("Enter: Add / {next}"));
            parts.push("↑/↓: Pick attachment".to_string());
            parts.push("Del: Remove".to_string());
        }
        _ => {}
    }
    parts.push("Esc: Cancel".to_string());
    parts.join(" | ")
}

/// Label for the Enter action while stepping.
fn next_label(is_last_step: bool) -> &'static str {
    if is_last_step { "Preview" } else { "Next" }
}

/// `Step 3 of 9` plus a fill bar.
fn progress_line(step: usize, total: usize, bar_width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (step * bar_width / total).min(bar_width)
    };
    format!(
        "Step {step} of {total}  {}{}",
        "█".repeat(filled),
        "░".repeat(bar_width - filled),
    )
}

/// Space-join a finished transcript onto the typed text.
fn append_transcript(buffer: &mut String, transcript: &str) {
    if !buffer.is_empty() && !buffer.ends_with(' ') {
        buffer.push(' ');
    }
    buffer.push_str(transcript);
}

/// On-screen wording for a failed or unavailable capture. Dictation is
/// always optional, so these are notices, not errors.
fn capture_notice(err: &CaptureError) -> String {
    match err {
        CaptureError::Unsupported => {
            "Voice input is not available here. Please type the answer.".to_string()
        }
        CaptureError::NoPermission => {
            "Microphone access was denied. Type the answer, or press F2 to retry.".to_string()
        }
        CaptureError::Engine(detail) => {
            format!("Voice capture failed ({detail}). Press F2 to retry, or type the answer.")
        }
    }
}

/// Char-to-byte offset for cursor edits; answers can be Devanagari.
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// A `width` x `height` box centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
