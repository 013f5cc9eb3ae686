//! Registration screen — the institution program registration form.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    Field, FieldKind, FieldValue, LookupTable, RegistrationSession, SubmitOutcome, UgcPolicy,
};
use crate::storage::SubmissionSink;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Form, FormField, draw_form};

/// Shown while a submission is acknowledged.
const SUCCESS_MESSAGE: &str = "Form submitted successfully! Thank you for your submission.";

/// State for the registration screen.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    session: RegistrationSession,
    form: Form,
    general_error: Option<String>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new(LookupTable::builtin())
    }
}

impl RegistrationState {
    /// Creates an empty form backed by `table`.
    pub fn new(table: LookupTable) -> Self {
        Self {
            session: RegistrationSession::new(table),
            form: Form::new(Field::all().len()),
            general_error: None,
        }
    }

    pub fn session(&self) -> &RegistrationSession {
        &self.session
    }

    /// Returns the field that currently has focus.
    pub fn focused_field(&self) -> Field {
        Field::all()[self.form.focus()]
    }

    /// Returns the focus state for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the error not tied to any field (e.g. a failed delivery).
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Validates the form and delivers it to `sink`.
    ///
    /// When a required answer is missing, focus jumps to the first field with
    /// an error. Delivery failures are shown inline and the form is kept.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink, now: Instant) {
        self.general_error = None;
        match self.session.submit(sink, now) {
            Ok(SubmitOutcome::Accepted) => {}
            Ok(SubmitOutcome::Invalid) => {
                let first = self.session.errors().iter().next().map(|(field, _)| field);
                if let Some(field) = first {
                    self.focus_field(field);
                }
            }
            Err(e) => self.general_error = Some(format!("Submission failed: {e}")),
        }
    }

    /// Clears the form and returns focus to the first field.
    pub fn reset(&mut self) {
        self.session.reset();
        self.form.set_focus(0);
        self.general_error = None;
    }

    /// Fires the scheduled reset if it is due.
    pub fn tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            self.form.set_focus(0);
            self.general_error = None;
        }
    }

    fn focus_field(&mut self, field: Field) {
        if let Some(index) = Field::all().iter().position(|&f| f == field) {
            self.form.set_focus(index);
        }
    }

    /// Handles a key that edits the focused field.
    fn edit_focused(&mut self, key: KeyEvent) {
        let field = self.focused_field();
        match field.kind() {
            FieldKind::Choice => match key.code {
                KeyCode::Right => self.cycle_institution(true),
                KeyCode::Left => self.cycle_institution(false),
                KeyCode::Backspace | KeyCode::Delete => self.session.select_institution(""),
                _ => {}
            },
            FieldKind::YesNo => {
                let current = self.session.record().ugc_policy_followed;
                let choice = match key.code {
                    KeyCode::Char('y' | 'Y') => Some(UgcPolicy::Yes),
                    KeyCode::Char('n' | 'N') => Some(UgcPolicy::No),
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => match current {
                        Some(UgcPolicy::Yes) => Some(UgcPolicy::No),
                        Some(UgcPolicy::No) => Some(UgcPolicy::Yes),
                        None if key.code == KeyCode::Left => Some(UgcPolicy::No),
                        None => Some(UgcPolicy::Yes),
                    },
                    _ => None,
                };
                if let Some(choice) = choice {
                    self.session.update_field(field, choice);
                }
            }
            FieldKind::Count | FieldKind::Percentage | FieldKind::Text => match key.code {
                KeyCode::Char(ch) if accepts_char(field.kind(), ch) => {
                    let mut text = self.session.record().get(field).to_string();
                    text.push(ch);
                    self.session.update_field(field, text);
                }
                KeyCode::Backspace => {
                    let mut text = self.session.record().get(field).to_string();
                    text.pop();
                    self.session.update_field(field, text);
                }
                _ => {}
            },
        }
    }

    /// Steps the institution selector through "none" and the table entries.
    fn cycle_institution(&mut self, forward: bool) {
        let mut options: Vec<&str> = vec![""];
        options.extend(self.session.table().institutions());
        let current = self.session.record().institution.as_str();
        let next = cycle(&options, current, forward).to_string();
        self.session.select_institution(&next);
    }
}

impl ScreenState for RegistrationState {
    /// Handles a key event, returning an [`Action`] for the app to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => Action::Reset,
                _ => Action::None,
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return Action::None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::Quit,
            KeyCode::F(1) => Action::Navigate(Screen::Help),
            _ => {
                self.edit_focused(key);
                Action::None
            }
        }
    }
}

/// Numeric inputs take the characters a number can be written with; the
/// value is not checked beyond that.
fn accepts_char(kind: FieldKind, ch: char) -> bool {
    match kind {
        FieldKind::Count | FieldKind::Percentage => {
            ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')
        }
        FieldKind::Text => !ch.is_control(),
        FieldKind::Choice | FieldKind::YesNo => false,
    }
}

/// Finds the next or previous option, starting from the first when `current`
/// is not an option.
fn cycle<'a>(options: &[&'a str], current: &str, forward: bool) -> &'a str {
    let pos = options.iter().position(|&o| o == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % options.len()
    } else {
        (pos + options.len() - 1) % options.len()
    };
    options[next]
}

/// Text shown for `field` in the form.
fn display_value(session: &RegistrationSession, field: Field) -> String {
    match field.kind() {
        FieldKind::YesNo => {
            let mark = |policy| {
                if session.record().ugc_policy_followed == Some(policy) {
                    "(\u{2022})"
                } else {
                    "( )"
                }
            };
            format!("{} Yes   {} No", mark(UgcPolicy::Yes), mark(UgcPolicy::No))
        }
        FieldKind::Choice => {
            let name = &session.record().institution;
            if name.is_empty() {
                String::new()
            } else {
                format!("\u{25c2} {name} \u{25b8}")
            }
        }
        _ => session.record().get(field).to_string(),
    }
}

/// Builds render data for every field from the session.
fn form_fields(session: &RegistrationSession) -> Vec<FormField> {
    Field::all()
        .iter()
        .map(|&field| {
            FormField::new(field.label(), field.is_required())
                .with_value(display_value(session, field))
                .with_placeholder(field.placeholder())
                .with_error(session.errors().message(field))
        })
        .collect()
}

/// Renders the registration screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_registration(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Institution Program Registration Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let record = state.session().record();
    let card_height = if record.institution.is_empty() { 0 } else { 3 };

    let [title_area, banner_area, card_area, form_area, keys_area, footer_area] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(card_height),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "UGC College Program Registration System",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "University Grants Commission - Government of India",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    if state.session().is_acknowledged() {
        let banner = Paragraph::new(Span::styled(
            SUCCESS_MESSAGE,
            Style::default().fg(Color::Green),
        ));
        frame.render_widget(banner, banner_area);
    } else if let Some(err) = state.general_error() {
        let banner = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(banner, banner_area);
    }

    if card_height > 0 {
        let total = if record.total_programs.is_empty() {
            FieldValue::from("0")
        } else {
            record.total_programs.clone()
        };
        let card = Paragraph::new(Line::from(vec![
            Span::styled(
                total.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Total Number of Programs"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(card, card_area);
    }

    let fields = form_fields(state.session());
    draw_form(&fields, state.form().focus(), frame, form_area);

    let keys = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  \u{2190}/\u{2192}: choose  Enter: submit  Ctrl+R: reset  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(keys, keys_area);

    let footer = Paragraph::new(Line::from(
        "\u{a9} 2024 University Grants Commission, Government of India. Support: support@ugc.ac.in",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
