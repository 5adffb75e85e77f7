//! # Navigation Router
//!
//! Turns the catalog plus the user's choices into what should be on screen.
//!
//! ```text
//! SelectingExam ──Enter──▶ SelectingSubject ──Enter──▶ SelectingYear ──Enter──▶ Dispatched
//!       ▲                        │    ▲                      │
//!       └────────── Esc ─────────┘    └───────── Esc ────────┘
//! ```
//!
//! The only navigation state that survives between interactions is
//! `NavigationState::current_page`. Everything else (visible tabs, year
//! buttons) is re-derived from the catalog on every frame.

use log::debug;
use thiserror::Error;

use crate::core::catalog::{ExamType, Subject, SubjectConfig};

/// Joins a subject path and a year into a page key.
pub const KEY_DELIMITER: char = '_';

/// Most recent year with published content unless configured otherwise.
pub const DEFAULT_LATEST_YEAR: i32 = 2023;

/// Replaces a subject's emoji while it is under maintenance.
pub const WARNING_GLYPH: &str = "⚠️";

pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "⚠️ Cette matière est actuellement en maintenance. Veuillez revenir plus tard.";

pub const EMPTY_SELECTION_WARNING: &str =
    "⚠️ Aucune matière actuellement disponible. Merci de revenir plus tard.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    SelectingExam,
    SelectingSubject,
    SelectingYear,
    Dispatched,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Empty until a year is chosen, then `"<path>_<year>"`.
    pub current_page: String,
}

impl NavigationState {
    pub fn is_dispatched(&self) -> bool {
        !self.current_page.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("no subject available for {exam}")]
    EmptySelection { exam: String },
    #[error("page key {key:?} has no '_' delimiter")]
    Dispatch { key: String },
}

/// What a subject tab shows below its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectBody {
    /// Content hidden; only the message is shown.
    Maintenance { message: String },
    Available {
        notice: Option<String>,
        years: Vec<i32>,
    },
}

/// An active subject as it appears in the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSubject {
    pub name: String,
    pub indicator: String,
    pub path: String,
    pub body: SubjectBody,
}

impl VisibleSubject {
    pub fn tab_label(&self) -> String {
        if self.indicator.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.indicator, self.name)
        }
    }

    pub fn years(&self) -> &[i32] {
        match &self.body {
            SubjectBody::Available { years, .. } => years,
            SubjectBody::Maintenance { .. } => &[],
        }
    }

    pub fn in_maintenance(&self) -> bool {
        matches!(self.body, SubjectBody::Maintenance { .. })
    }
}

/// Active subjects of `exam`, in catalog order.
pub fn select_exam_type(
    exam: &ExamType,
    latest_year: i32,
) -> Result<Vec<VisibleSubject>, RouterError> {
    let visible: Vec<VisibleSubject> = exam
        .subjects
        .iter()
        .filter(|s| s.config.active)
        .map(|s| visible_subject(s, latest_year))
        .collect();

    if visible.is_empty() {
        debug!("No active subject for {}", exam.name);
        return Err(RouterError::EmptySelection {
            exam: exam.name.clone(),
        });
    }
    Ok(visible)
}

fn visible_subject(subject: &Subject, latest_year: i32) -> VisibleSubject {
    let config = &subject.config;
    let (indicator, body) = if config.maintenance {
        let message = config
            .message_content
            .clone()
            .unwrap_or_else(|| DEFAULT_MAINTENANCE_MESSAGE.to_string());
        (WARNING_GLYPH.to_string(), SubjectBody::Maintenance { message })
    } else {
        let notice = config.message.then(|| {
            config
                .message_content
                .clone()
                .unwrap_or_else(|| WARNING_GLYPH.to_string())
        });
        let years = render_subject(config, latest_year).collect();
        (config.emoji.clone(), SubjectBody::Available { notice, years })
    };

    VisibleSubject {
        name: subject.name.clone(),
        indicator,
        path: config.path.clone(),
        body,
    }
}

/// Descending years from `latest` down to `start_year`, skipping bypassed ones.
#[derive(Debug, Clone)]
pub struct Years<'a> {
    next: i32,
    start: i32,
    bypass: &'a [i32],
    done: bool,
}

impl Iterator for Years<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        while !self.done && self.next >= self.start {
            let year = self.next;
            match self.next.checked_sub(1) {
                Some(next) if next >= self.start => self.next = next,
                _ => self.done = true,
            }
            if !self.bypass.contains(&year) {
                return Some(year);
            }
        }
        None
    }
}

pub fn render_subject(config: &SubjectConfig, latest_year: i32) -> Years<'_> {
    Years {
        next: latest_year,
        start: config.start_year,
        bypass: &config.bypass_years,
        done: false,
    }
}

/// Record the chosen page and return its key.
pub fn select_year(state: &mut NavigationState, path: &str, year: i32) -> String {
    let key = format!("{path}{KEY_DELIMITER}{year}");
    debug!("current_page: {:?} -> {:?}", state.current_page, key);
    state.current_page = key.clone();
    key
}

/// Split a page key into `(path, year)` on the last delimiter.
pub fn dispatch(current_page: &str) -> Result<(&str, &str), RouterError> {
    current_page
        .rsplit_once(KEY_DELIMITER)
        .ok_or_else(|| RouterError::Dispatch {
            key: current_page.to_string(),
        })
}

pub fn year_button_label(year: i32) -> String {
    format!("Commencer l'entraînement pour l'année {year}")
}
