//! Reusable form widget: focus management and scrolled field rendering.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Height of one rendered field, borders included.
const ROW_HEIGHT: u16 = 3;

/// Render data for one field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Display label shown in the field border.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Dimmed text shown while the value is empty.
    pub placeholder: Option<String>,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field is marked with `*`.
    pub required: bool,
}

impl FormField {
    /// Creates an empty field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: None,
            error: None,
            required,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<&str>) -> Self {
        self.placeholder = placeholder.map(String::from);
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

/// Focus position over a fixed number of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    len: usize,
    focus: usize,
}

impl Form {
    /// Creates focus state for `len` fields. Focus starts on the first field.
    pub fn new(len: usize) -> Self {
        Self { len, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = (self.focus + 1) % self.len;
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = (self.focus + self.len - 1) % self.len;
    }

    /// Moves focus to `index`; out-of-range indices are ignored.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.len {
            self.focus = index;
        }
    }
}

/// Returns the range of fields to draw so that `focus` is visible.
///
/// When everything fits the whole range is returned; otherwise the window is
/// centred on the focused field and clamped to the ends.
pub fn visible_range(focus: usize, len: usize, capacity: usize) -> Range<usize> {
    if capacity >= len {
        return 0..len;
    }
    let capacity = capacity.max(1);
    let start = focus
        .saturating_sub(capacity / 2)
        .min(len - capacity);
    start..start + capacity
}

/// Renders `fields` within `area`, scrolling to keep `focus` on screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(fields: &[FormField], focus: usize, frame: &mut Frame, area: Rect) {
    let capacity = usize::from(area.height / ROW_HEIGHT);
    let range = visible_range(focus, fields.len(), capacity);
    let constraints: Vec<Constraint> = range
        .clone()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (row, i) in range.enumerate() {
        let field = &fields[i];
        let is_focused = i == focus;

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(&field.value)];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        if field.value.is_empty()
            && let Some(ref placeholder) = field.placeholder
        {
            spans.push(Span::styled(
                format!(" {placeholder}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[row]);

        // Error overlaps the bottom border of its field.
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: rows[row].x + 2,
                y: rows[row].y + ROW_HEIGHT.saturating_sub(1),
                width: rows[row].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
