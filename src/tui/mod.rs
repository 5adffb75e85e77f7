//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Every interaction re-derives the whole screen from the catalog and the
//! navigation state; nothing is drawn incrementally. The loop sleeps up to
//! 500ms waiting for input and only redraws after an event or a resize.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, error, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::registry::{ContentRegistry, RegistryError};
use crate::core::router::{self, RouterError};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::ContentViewState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub content_view: ContentViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            content_view: ContentViewState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Resolve `app.nav.current_page` and run its handler.
///
/// Returns the action reporting the outcome, to be folded back through `update()`.
pub fn open_current_page(app: &App, registry: &ContentRegistry) -> Action {
    let (path, year) = match router::dispatch(&app.nav.current_page) {
        Ok(parts) => parts,
        Err(e @ RouterError::Dispatch { .. }) => {
            // The router builds every key itself, so this is a bug
            error!("Invariant violated: {}", e);
            return Action::ContentFailed(format!("Erreur interne : {e}"));
        }
        Err(e) => return Action::ContentFailed(e.to_string()),
    };

    match registry.load_handler(path, year) {
        Ok(content) => Action::ContentLoaded(content),
        Err(e @ RegistryError::Unresolved { .. }) => {
            warn!("{}", e);
            Action::ContentFailed(format!("Contenu indisponible pour {path} ({year})."))
        }
        Err(e) => {
            error!("{}", e);
            Action::ContentFailed(format!("Impossible d'ouvrir la page : {e}"))
        }
    }
}

/// Apply the effect of an update. Returns true if the app should quit.
fn perform(app: &mut App, registry: &ContentRegistry, effect: Effect) -> bool {
    match effect {
        Effect::Quit => true,
        Effect::Dispatch => {
            info!("Dispatching {}", app.nav.current_page);
            let outcome = open_current_page(app, registry);
            update(app, outcome) == Effect::Quit
        }
        Effect::None => false,
    }
}

pub fn run(mut app: App, registry: ContentRegistry) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => Action::Quit,
                TuiEvent::Escape => Action::Back,
                TuiEvent::Submit => Action::Confirm,
                TuiEvent::CursorLeft => Action::MoveLeft,
                TuiEvent::CursorRight => Action::MoveRight,
                // Up/Down scroll the page once one is open
                TuiEvent::CursorUp | TuiEvent::CursorDown
                    if app.phase != router::Phase::Dispatched =>
                {
                    if event == TuiEvent::CursorUp {
                        Action::MoveUp
                    } else {
                        Action::MoveDown
                    }
                }
                _ => {
                    tui.content_view.handle_event(&event);
                    continue;
                }
            };

            debug!("Event {:?} -> {:?}", event, action);
            let effect = update(&mut app, action);
            if perform(&mut app, &registry, effect) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Exiting on page {:?}", app.nav.current_page);
    ratatui::restore();
    Ok(())
}
