//! Page header — department branding and the sign-in / sign-up handles.

use std::fmt;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows taken by [`draw_header`].
pub const HEADER_HEIGHT: u16 = 5;

/// Externally supplied sign-in and sign-up handlers.
///
/// The header holds no state of its own; these are invoked as-is when the
/// user asks to sign in or sign up.
pub struct HeaderCallbacks {
    on_sign_in: Box<dyn FnMut()>,
    on_sign_up: Box<dyn FnMut()>,
}

impl HeaderCallbacks {
    pub fn new(on_sign_in: impl FnMut() + 'static, on_sign_up: impl FnMut() + 'static) -> Self {
        Self {
            on_sign_in: Box::new(on_sign_in),
            on_sign_up: Box::new(on_sign_up),
        }
    }

    /// Handlers that do nothing.
    pub fn noop() -> Self {
        Self::new(|| {}, || {})
    }

    pub fn sign_in(&mut self) {
        (self.on_sign_in)();
    }

    pub fn sign_up(&mut self) {
        (self.on_sign_up)();
    }
}

impl Default for HeaderCallbacks {
    fn default() -> Self {
        Self::noop()
    }
}

#[mutants::skip]
impl fmt::Debug for HeaderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCallbacks").finish_non_exhaustive()
    }
}

/// Renders the department header with sign-in / sign-up key hints.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [brand_area, auth_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(inner);

    let brand = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[GoH] ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "Government of Haryana",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "      Digital Education Management System",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "      Department of Higher Education",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(brand, brand_area);

    let auth = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Alt+i", Style::default().fg(Color::Yellow)),
            Span::raw(" Sign In  "),
            Span::styled("Alt+u", Style::default().fg(Color::Yellow)),
            Span::raw(" Sign Up"),
        ]),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(auth, auth_area);
}
