//! Status bar widget — one-line summary of the registration session.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::RegistrationSession;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Name of the screen being shown; omitted when empty.
    pub screen: &'static str,
    /// Selected institution; empty when none is selected.
    pub institution: String,
    /// Number of outstanding validation messages.
    pub error_count: usize,
    /// Time until the form clears itself after a submission.
    pub reset_in: Option<Duration>,
}

impl StatusBarContext {
    /// Captures the status of `session` at `now`.
    pub fn from_session(session: &RegistrationSession, now: Instant) -> Self {
        Self {
            screen: "",
            institution: session.record().institution.clone(),
            error_count: session.errors().len(),
            reset_in: session.reset_remaining(now),
        }
    }
}

/// Rounds up so a countdown never shows `0s` while still pending.
fn whole_seconds(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Renders a one-line status bar.
///
/// Display format, each prefixed by the screen name when set:
/// - No selection:   `No institution selected`
/// - Selected:       `[GJU]`
/// - With errors:    `[GJU]  1 error`
/// - After submit:   `[GJU]  Submitted, clearing in 3s` (in Green)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);
    let red = Style::default().fg(Color::Red);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span> = Vec::new();

    if !ctx.screen.is_empty() {
        spans.push(Span::styled(format!("{}  ", ctx.screen), dim));
    }

    if ctx.institution.is_empty() {
        spans.push(Span::styled("No institution selected", dim));
    } else {
        spans.push(Span::styled(format!("[{}]", ctx.institution), cyan));
    }

    if let Some(remaining) = ctx.reset_in {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Submitted, clearing in {}s", whole_seconds(remaining)),
            green,
        ));
    } else if ctx.error_count > 0 {
        let noun = if ctx.error_count == 1 { "error" } else { "errors" };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("{} {noun}", ctx.error_count), red));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
