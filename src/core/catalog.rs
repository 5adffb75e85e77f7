//! # Catalog Loader
//!
//! Reads the declarative catalog describing exam types and their subjects.
//!
//! ```json
//! {
//!   "Brevet": {
//!     "Maths": {
//!       "emoji": "🔢", "active": true, "Maintenance": false,
//!       "start_year": 2020, "bypass_years": [2021], "path": "brevet.maths"
//!     }
//!   }
//! }
//! ```
//!
//! Document order is preserved for both exam types and subjects, so the radio
//! choices and tabs appear in the order the author wrote them.

use std::fs;
use std::path::Path;

use chrono::Datelike;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

// ============================================================================
// Model
// ============================================================================

/// Per-subject settings as written in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectConfig {
    #[serde(default)]
    pub emoji: String,
    pub active: bool,
    #[serde(rename = "Maintenance", default)]
    pub maintenance: bool,
    #[serde(rename = "Message", default)]
    pub message: bool,
    #[serde(default)]
    pub message_content: Option<String>,
    pub start_year: i32,
    #[serde(default)]
    pub bypass_years: Vec<i32>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub config: SubjectConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamType {
    pub name: String,
    pub subjects: Vec<Subject>,
}

/// All exam types, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub exams: Vec<ExamType>,
}

impl Catalog {
    pub fn exam_names(&self) -> Vec<&str> {
        self.exams.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn exam(&self, name: &str) -> Option<&ExamType> {
        self.exams.iter().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog parse error at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog entry {location} is not an object")]
    NotAnObject { location: String },
    #[error("invalid subject {exam}/{subject}: {reason}")]
    Invalid {
        exam: String,
        subject: String,
        reason: String,
    },
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&contents)?;
    info!(
        "Loaded catalog from {} ({} exam types)",
        path.display(),
        catalog.exams.len()
    );
    Ok(catalog)
}

/// Parse a catalog document, validating every subject against the current year.
/// Oldest `start_year` accepted, counted back from the current year.
pub const MAX_YEAR_SPAN: i32 = 100;

pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    parse_catalog_at(json, chrono::Local::now().year())
}

/// Same as [`parse_catalog`] with an explicit "current year", so tests don't
/// depend on the clock.
pub fn parse_catalog_at(json: &str, current_year: i32) -> Result<Catalog, CatalogError> {
    let root: Map<String, Value> =
        serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            location: "<root>".to_string(),
            source,
        })?;

    let mut exams = Vec::with_capacity(root.len());
    for (exam_name, exam_value) in root {
        let Value::Object(subject_map) = exam_value else {
            return Err(CatalogError::NotAnObject { location: exam_name });
        };

        let mut subjects = Vec::with_capacity(subject_map.len());
        for (subject_name, subject_value) in subject_map {
            let config: SubjectConfig =
                serde_json::from_value(subject_value).map_err(|source| CatalogError::Parse {
                    location: format!("{exam_name}/{subject_name}"),
                    source,
                })?;
            validate(&exam_name, &subject_name, &config, current_year)?;
            debug!("Subject {}/{} -> {}", exam_name, subject_name, config.path);
            subjects.push(Subject {
                name: subject_name,
                config,
            });
        }

        exams.push(ExamType {
            name: exam_name,
            subjects,
        });
    }

    Ok(Catalog { exams })
}

fn validate(
    exam: &str,
    subject: &str,
    config: &SubjectConfig,
    current_year: i32,
) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::Invalid {
        exam: exam.to_string(),
        subject: subject.to_string(),
        reason,
    };

    if !is_module_reference(&config.path) {
        return Err(invalid(format!(
            "path {:?} is not a module reference",
            config.path
        )));
    }
    let earliest = current_year.saturating_sub(MAX_YEAR_SPAN);
    if config.start_year < earliest {
        return Err(invalid(format!(
            "start_year {} is before {earliest}",
            config.start_year
        )));
    }
    if config.start_year > current_year {
        return Err(invalid(format!(
            "start_year {} is after {current_year}",
            config.start_year
        )));
    }
    Ok(())
}

/// `a.b_c.d`: dot-separated identifiers, each `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_module_reference(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Brevet": {
            "Maths": {"emoji":"🔢","active":true,"start_year":2020,"bypass_years":[2021],"path":"maths"},
            "Français": {"emoji":"📚","active":false,"Maintenance":true,"start_year":2019,"bypass_years":[],"path":"brevet.francais"}
        },
        "Bac": {
            "Philosophie": {"emoji":"🤔","active":true,"Message":true,"message_content":"Sujets 2020 partiels","start_year":2018,"path":"bac.philo"}
        }
    }"#;

    #[test]
    fn test_parse_preserves_document_order() {
        let catalog = parse_catalog_at(SAMPLE, 2024).unwrap();
        assert_eq!(catalog.exam_names(), vec!["Brevet", "Bac"]);
        let brevet = catalog.exam("Brevet").unwrap();
        let names: Vec<&str> = brevet.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Maths", "Français"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let catalog = parse_catalog_at(SAMPLE, 2024).unwrap();
        let maths = &catalog.exam("Brevet").unwrap().subjects[0].config;
        assert!(!maths.maintenance);
        assert!(!maths.message);
        assert_eq!(maths.message_content, None);

        let philo = &catalog.exam("Bac").unwrap().subjects[0].config;
        assert!(philo.message);
        assert!(philo.bypass_years.is_empty());
        assert_eq!(philo.message_content.as_deref(), Some("Sujets 2020 partiels"));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let json = r#"{"Brevet": {"Maths": {"emoji":"🔢","active":true,"start_year":2020}}}"#;
        let err = parse_catalog_at(json, 2024).unwrap_err();
        match err {
            CatalogError::Parse { location, .. } => assert_eq!(location, "Brevet/Maths"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = parse_catalog_at("{\"Brevet\": ", 2024).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_exam_value_must_be_object() {
        let err = parse_catalog_at(r#"{"Brevet": []}"#, 2024).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { .. }));
    }

    #[test]
    fn test_future_start_year_rejected() {
        let json = r#"{"Bac": {"SVT": {"active":true,"start_year":2030,"path":"svt"}}}"#;
        let err = parse_catalog_at(json, 2024).unwrap_err();
        assert!(err.to_string().contains("start_year 2030"));
    }

    #[test]
    fn test_ancient_start_year_rejected() {
        let json = r#"{"Bac": {"SVT": {"active":true,"start_year":-2147483648,"path":"svt"}}}"#;
        let err = parse_catalog_at(json, 2024).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
        assert!(err.to_string().contains("is before 1924"));

        let json = r#"{"Bac": {"SVT": {"active":true,"start_year":1924,"path":"svt"}}}"#;
        assert!(parse_catalog_at(json, 2024).is_ok());
    }

    #[test]
    fn test_bad_path_rejected() {
        let json = r#"{"Bac": {"SVT": {"active":true,"start_year":2020,"path":"svt/2020"}}}"#;
        let err = parse_catalog_at(json, 2024).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_is_module_reference() {
        assert!(is_module_reference("maths"));
        assert!(is_module_reference("Brevet.Sciences_Physiques"));
        assert!(is_module_reference("_private.a1"));
        assert!(!is_module_reference(""));
        assert!(!is_module_reference("1maths"));
        assert!(!is_module_reference("maths."));
        assert!(!is_module_reference("ma-ths"));
    }
}
