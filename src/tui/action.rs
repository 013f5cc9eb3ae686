//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` applies these to state it owns (the submission sink, the header
/// callbacks) and to navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Validate the form and hand it to the submission sink.
    Submit,
    /// Clear the form immediately.
    Reset,
    /// Invoke the header's sign-in handler.
    SignIn,
    /// Invoke the header's sign-up handler.
    SignUp,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
