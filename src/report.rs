//! # Catalog Check Report
//!
//! Text summary printed by `prepa --check`: every exam, every subject with
//! its state and selectable years, and the pages missing from the content
//! directory.

use std::fmt::Write;

use crate::core::catalog::Catalog;
use crate::core::registry::ContentRegistry;
use crate::core::router::{self, SubjectBody};

pub struct CheckReport {
    pub text: String,
    pub missing: Vec<(String, i32)>,
}

impl CheckReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_report(catalog: &Catalog, registry: &ContentRegistry, latest_year: i32) -> CheckReport {
    let mut text = String::new();

    for exam in &catalog.exams {
        let _ = writeln!(text, "{}", exam.name);
        let visible = match router::select_exam_type(exam, latest_year) {
            Ok(visible) => visible,
            Err(e) => {
                let _ = writeln!(text, "  (warning) {e}");
                continue;
            }
        };
        for subject in visible {
            match &subject.body {
                SubjectBody::Maintenance { .. } => {
                    let _ = writeln!(text, "  {}  [maintenance]", subject.tab_label());
                }
                SubjectBody::Available { years, .. } => {
                    let listed: Vec<String> = years
                        .iter()
                        .map(|y| {
                            if registry.contains(&subject.path, *y) {
                                y.to_string()
                            } else {
                                format!("{y}!")
                            }
                        })
                        .collect();
                    let _ = writeln!(
                        text,
                        "  {}  ({})  {}",
                        subject.tab_label(),
                        subject.path,
                        listed.join(" ")
                    );
                }
            }
        }
    }

    let missing = registry.missing_pages(catalog, latest_year);
    if missing.is_empty() {
        let _ = writeln!(text, "\nAll {} pages present.", registry.len());
    } else {
        let _ = writeln!(text, "\n{} missing pages (marked !):", missing.len());
        for (path, year) in &missing {
            let _ = writeln!(text, "  {path}_{year}");
        }
    }

    CheckReport { text, missing }
}
