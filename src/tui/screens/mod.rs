//! TUI screen implementations.

pub mod help;
pub mod registration;

pub use help::{HelpState, draw_help};
pub use registration::{RegistrationState, draw_registration};
