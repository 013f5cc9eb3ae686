use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::config::Config;
use crate::model::LookupTable;
use crate::storage::SubmissionSink;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{HelpState, RegistrationState, draw_help, draw_registration};
use super::widgets::{
    HEADER_HEIGHT, HeaderCallbacks, StatusBarContext, draw_header, draw_status_bar,
};

/// How long to wait for input before checking the scheduled reset.
const TICK_RATE: Duration = Duration::from_millis(250);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Fill in and submit the registration form.
    Registration,
    /// Show keybinding help.
    Help,
}

impl Screen {
    /// Human-readable label shown in the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::Help => "Help",
        }
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    registration: RegistrationState,
    help: HelpState,
    sink: Box<dyn SubmissionSink>,
    header: HeaderCallbacks,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Registration`] screen.
    pub fn new(
        table: LookupTable,
        sink: Box<dyn SubmissionSink>,
        header: HeaderCallbacks,
    ) -> Self {
        Self {
            screen: Screen::Registration,
            registration: RegistrationState::new(table),
            help: HelpState::new(),
            sink,
            header,
            should_quit: false,
        }
    }

    /// Builds an `App` from resolved configuration.
    ///
    /// Fails if the institution file cannot be loaded or the sink cannot be
    /// prepared.
    pub fn from_config(config: &Config, header: HeaderCallbacks) -> Result<Self, AppError> {
        let data_dir = config.data_dir()?;
        let table = config.lookup_table()?;
        let sink = config.submission_sink(&data_dir)?;
        Ok(Self::new(table, sink, header))
    }

    /// Main event loop: tick → draw → poll event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.tick(Instant::now());
            terminal.draw(|frame| self.draw(frame, Instant::now()))?;
            if event::poll(TICK_RATE)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the header, the current screen and the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame, now: Instant) {
        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        draw_header(frame, header_area);
        match self.screen {
            Screen::Registration => draw_registration(&self.registration, frame, body_area),
            Screen::Help => draw_help(&self.help, frame, body_area),
        }
        draw_status_bar(&self.status(now), frame, status_area);
    }

    /// Builds the status bar contents for the current screen at `now`.
    pub fn status(&self, now: Instant) -> StatusBarContext {
        StatusBarContext {
            screen: self.screen.label(),
            ..StatusBarContext::from_session(self.registration.session(), now)
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let global = if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            }
        } else if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Char('i') => Some(Action::SignIn),
                KeyCode::Char('u') => Some(Action::SignUp),
                _ => None,
            }
        } else {
            None
        };

        let action = match global {
            Some(action) => action,
            None => match self.screen {
                Screen::Registration => self.registration.handle_key(key),
                Screen::Help => self.help.handle_key(key),
            },
        };
        self.apply(action, Instant::now());
    }

    fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Help {
                    self.help.reset();
                }
                self.screen = screen;
            }
            Action::Submit => {
                self.registration.submit(self.sink.as_mut(), now);
            }
            Action::Reset => self.registration.reset(),
            Action::SignIn => self.header.sign_in(),
            Action::SignUp => self.header.sign_up(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Fires the scheduled form reset if it is due.
    pub fn tick(&mut self, now: Instant) {
        self.registration.tick(now);
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the registration screen state.
    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }
}
