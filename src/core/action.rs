//! # Actions
//!
//! Everything that can happen in Prepa becomes an `Action`.
//! User presses Enter? That's `Action::Confirm`.
//! A page finished loading? That's `Action::ContentLoaded(content)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! it, and returns an `Effect` telling the adapter what I/O to perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Directional actions mean different things depending on the phase: Up/Down
//! moves the exam radio while choosing an exam, and the year buttons while
//! choosing a year.

use log::{debug, info};

use crate::core::registry::Content;
use crate::core::router::{self, EMPTY_SELECTION_WARNING, Phase};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Back,
    Quit,
    ContentLoaded(Content),
    ContentFailed(String),
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// `app.nav.current_page` was just set; resolve and open it.
    Dispatch,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: phase={:?} action={:?}", app.phase, action);

    match action {
        Action::Quit => return Effect::Quit,
        Action::ContentLoaded(content) => {
            app.status_message = content.title.clone();
            app.content = Some(content);
            app.error = None;
            return Effect::None;
        }
        Action::ContentFailed(message) => {
            app.error = Some(message);
            return Effect::None;
        }
        _ => {}
    }

    match app.phase {
        Phase::SelectingExam => selecting_exam(app, action),
        Phase::SelectingSubject => selecting_subject(app, action),
        Phase::SelectingYear => selecting_year(app, action),
        // Terminal: no way back to the selection screens.
        Phase::Dispatched => Effect::None,
    }
}

fn selecting_exam(app: &mut App, action: Action) -> Effect {
    match action {
        Action::MoveUp => move_exam(app, -1),
        Action::MoveDown => move_exam(app, 1),
        Action::Confirm => {
            if app.visible_subjects().is_ok() {
                app.phase = Phase::SelectingSubject;
            } else {
                app.status_message = EMPTY_SELECTION_WARNING.to_string();
            }
        }
        Action::Back => return Effect::Quit,
        _ => {}
    }
    Effect::None
}

fn selecting_subject(app: &mut App, action: Action) -> Effect {
    match action {
        Action::MoveLeft => move_tab(app, -1),
        Action::MoveRight => move_tab(app, 1),
        Action::MoveUp => move_exam(app, -1),
        Action::MoveDown => move_exam(app, 1),
        Action::Confirm => {
            let Some(subject) = app.current_subject() else {
                return Effect::None;
            };
            if subject.in_maintenance() {
                app.status_message = format!("{} est en maintenance", subject.name);
            } else if subject.years().is_empty() {
                app.status_message = format!("Aucune année disponible pour {}", subject.name);
            } else {
                app.selected_year = 0;
                app.phase = Phase::SelectingYear;
            }
        }
        Action::Back => app.phase = Phase::SelectingExam,
        _ => {}
    }
    Effect::None
}

fn selecting_year(app: &mut App, action: Action) -> Effect {
    match action {
        Action::MoveUp => {
            app.selected_year = app.selected_year.saturating_sub(1);
        }
        Action::MoveDown => {
            let count = app.current_subject().map_or(0, |s| s.years().len());
            if count > 0 {
                app.selected_year = (app.selected_year + 1).min(count - 1);
            }
        }
        Action::MoveLeft => {
            move_tab(app, -1);
            app.phase = Phase::SelectingSubject;
        }
        Action::MoveRight => {
            move_tab(app, 1);
            app.phase = Phase::SelectingSubject;
        }
        Action::Confirm => {
            let (Some(subject), Some(year)) = (app.current_subject(), app.current_year()) else {
                return Effect::None;
            };
            let key = router::select_year(&mut app.nav, &subject.path, year);
            info!("Year selected: {} -> {}", subject.name, key);
            app.phase = Phase::Dispatched;
            return Effect::Dispatch;
        }
        Action::Back => app.phase = Phase::SelectingSubject,
        _ => {}
    }
    Effect::None
}

/// Move the exam radio by `delta`, clamped. Resets the tab and year cursors.
fn move_exam(app: &mut App, delta: isize) {
    let count = app.catalog.exams.len();
    if count == 0 {
        return;
    }
    let next = app
        .selected_exam
        .saturating_add_signed(delta)
        .min(count - 1);
    if next == app.selected_exam {
        return;
    }
    app.selected_exam = next;
    app.selected_tab = 0;
    app.selected_year = 0;

    match app.visible_subjects() {
        Ok(_) => app.status_message.clear(),
        Err(_) => {
            app.status_message = EMPTY_SELECTION_WARNING.to_string();
            app.phase = Phase::SelectingExam;
        }
    }
}

/// Cycle the subject tabs by `delta`, wrapping around. Resets the year cursor.
fn move_tab(app: &mut App, delta: isize) {
    let count = app.visible_subjects().map_or(0, |s| s.len());
    if count == 0 {
        return;
    }
    app.selected_tab = (app.selected_tab as isize + delta).rem_euclid(count as isize) as usize;
    app.selected_year = 0;
}
