//! Reusable TUI widgets.

pub mod form;
pub mod header;
pub mod status_bar;

pub use form::{Form, FormField, draw_form, visible_range};
pub use header::{HEADER_HEIGHT, HeaderCallbacks, draw_header};
pub use status_bar::{StatusBarContext, draw_status_bar};
