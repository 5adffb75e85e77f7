//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::catalog::{Catalog, ExamType, Subject, SubjectConfig, parse_catalog_at};
use crate::core::state::App;

/// Brevet has Maths (2020..=2023 minus 2021), an inactive Français and a
/// Physique-Chimie under maintenance. Bac has nothing active.
pub const TEST_CATALOG: &str = r#"{
    "Brevet": {
        "Maths": {"emoji":"🔢","active":true,"start_year":2020,"bypass_years":[2021],"path":"maths"},
        "Français": {"emoji":"📚","active":false,"Maintenance":true,"start_year":2019,"bypass_years":[],"path":"francais"},
        "Physique-Chimie": {"emoji":"🧪","active":true,"Maintenance":true,"start_year":2018,"bypass_years":[],"path":"brevet.physique_chimie"}
    },
    "Bac": {
        "Philosophie": {"emoji":"🤔","active":false,"start_year":2018,"bypass_years":[],"path":"bac.philo"}
    }
}"#;

/// An active, non-maintenance subject with no bypassed years.
pub fn subject(name: &str, path: &str, start_year: i32) -> Subject {
    Subject {
        name: name.to_string(),
        config: SubjectConfig {
            emoji: "📘".to_string(),
            active: true,
            maintenance: false,
            message: false,
            message_content: None,
            start_year,
            bypass_years: Vec::new(),
            path: path.to_string(),
        },
    }
}

pub fn test_catalog() -> Catalog {
    parse_catalog_at(TEST_CATALOG, 2024).unwrap()
}

pub fn single_exam(name: &str, subjects: Vec<Subject>) -> Catalog {
    Catalog {
        exams: vec![ExamType {
            name: name.to_string(),
            subjects,
        }],
    }
}

/// Creates a test App over `TEST_CATALOG` with 2023 as the newest year.
pub fn test_app() -> App {
    App::new(test_catalog(), "Préparation au Brevet et Bac".to_string(), 2023)
}
