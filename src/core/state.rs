//! # Application State
//!
//! Core business state for Prepa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Catalog              // exam types and subjects, loaded once
//! ├── title: String                 // page title
//! ├── latest_year: i32              // newest year offered
//! ├── nav: NavigationState          // current_page ("" until dispatched)
//! ├── phase: Phase                  // where in the selection flow we are
//! ├── selected_exam: usize          // radio choice
//! ├── selected_tab: usize           // index into the visible subjects
//! ├── selected_year: usize          // index into the tab's year buttons
//! ├── status_message: String        // status bar text / warnings
//! ├── content: Option<Content>      // page produced by the dispatched handler
//! └── error: Option<String>         // dispatch failure shown instead of content
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Views (tabs, years) are never cached here: they're re-derived from the
//! catalog each time they're needed.

use crate::core::catalog::{Catalog, ExamType};
use crate::core::config::ResolvedConfig;
use crate::core::registry::Content;
use crate::core::router::{self, NavigationState, Phase, RouterError, VisibleSubject};

pub struct App {
    pub catalog: Catalog,
    pub title: String,
    pub latest_year: i32,
    pub nav: NavigationState,
    pub phase: Phase,
    pub selected_exam: usize,
    pub selected_tab: usize,
    pub selected_year: usize,
    pub status_message: String,
    pub content: Option<Content>,
    pub error: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, title: String, latest_year: i32) -> Self {
        Self {
            catalog,
            title,
            latest_year,
            nav: NavigationState::default(),
            phase: Phase::default(),
            selected_exam: 0,
            selected_tab: 0,
            selected_year: 0,
            status_message: String::new(),
            content: None,
            error: None,
        }
    }

    pub fn from_config(catalog: Catalog, config: &ResolvedConfig) -> Self {
        Self::new(catalog, config.title.clone(), config.latest_year)
    }

    pub fn current_exam(&self) -> Option<&ExamType> {
        self.catalog.exams.get(self.selected_exam)
    }

    /// Tabs for the selected exam type.
    pub fn visible_subjects(&self) -> Result<Vec<VisibleSubject>, RouterError> {
        match self.current_exam() {
            Some(exam) => router::select_exam_type(exam, self.latest_year),
            None => Err(RouterError::EmptySelection {
                exam: String::new(),
            }),
        }
    }

    pub fn current_subject(&self) -> Option<VisibleSubject> {
        self.visible_subjects()
            .ok()
            .and_then(|mut subjects| {
                if self.selected_tab < subjects.len() {
                    Some(subjects.swap_remove(self.selected_tab))
                } else {
                    None
                }
            })
    }

    pub fn current_year(&self) -> Option<i32> {
        self.current_subject()
            .and_then(|s| s.years().get(self.selected_year).copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::router::Phase;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase, Phase::SelectingExam);
        assert!(app.nav.current_page.is_empty());
        assert!(app.content.is_none());
        assert_eq!(app.latest_year, 2023);
    }

    #[test]
    fn test_current_subject_follows_selection() {
        let mut app = test_app();
        assert_eq!(app.current_exam().unwrap().name, "Brevet");
        assert_eq!(app.current_subject().unwrap().name, "Maths");
        assert_eq!(app.current_year(), Some(2023));

        app.selected_year = 2;
        assert_eq!(app.current_year(), Some(2020));

        app.selected_tab = 9;
        assert!(app.current_subject().is_none());
    }
}
