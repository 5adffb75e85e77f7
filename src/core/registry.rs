//! # Content Registry
//!
//! Explicit `(path, year) → handler` table, filled once at startup and looked
//! up when a page key is dispatched. Nothing is resolved by computing module
//! names at runtime: a pair is either registered or it is unavailable.
//!
//! Pages on disk follow the layout
//!
//! ```text
//! <content_dir>/brevet/maths/Annee_2022.md   ← path "brevet.maths", year 2022
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::core::catalog::Catalog;
use crate::core::router::render_subject;

/// File stem prefix of a year page.
pub const PAGE_PREFIX: &str = "Annee_";

/// A rendered page, ready for the content view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub title: String,
    /// Markdown body.
    pub body: String,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no content for {path} ({year})")]
    Unresolved { path: String, year: String },
    #[error("content {path} ({year}) failed: {source}")]
    Handler {
        path: String,
        year: i32,
        #[source]
        source: HandlerError,
    },
}

/// Entry point of a year page. Takes no arguments and produces what to show.
pub trait ContentHandler: Send + Sync {
    fn entry(&self) -> Result<Content, HandlerError>;
}

/// Reads a markdown file each time it is opened, so edits show up without a restart.
pub struct MarkdownPage {
    pub title: String,
    pub file: PathBuf,
}

impl ContentHandler for MarkdownPage {
    fn entry(&self) -> Result<Content, HandlerError> {
        let body = fs::read_to_string(&self.file).map_err(|source| HandlerError::Io {
            path: self.file.display().to_string(),
            source,
        })?;
        Ok(Content {
            title: self.title.clone(),
            body,
        })
    }
}

impl<F> ContentHandler for F
where
    F: Fn() -> Result<Content, HandlerError> + Send + Sync,
{
    fn entry(&self) -> Result<Content, HandlerError> {
        self()
    }
}

#[derive(Default)]
pub struct ContentRegistry {
    handlers: HashMap<(String, i32), Box<dyn ContentHandler>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: &str, year: i32, handler: impl ContentHandler + 'static) {
        debug!("Registering content {} ({})", path, year);
        self.handlers
            .insert((path.to_string(), year), Box::new(handler));
    }

    pub fn contains(&self, path: &str, year: i32) -> bool {
        self.handlers.contains_key(&(path.to_string(), year))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Register a `MarkdownPage` for every selectable year whose file exists.
    pub fn discover(root: &Path, catalog: &Catalog, latest_year: i32) -> Self {
        let mut registry = Self::new();
        for exam in &catalog.exams {
            for subject in exam.subjects.iter().filter(|s| s.config.active) {
                let config = &subject.config;
                if config.maintenance {
                    continue;
                }
                for year in render_subject(config, latest_year) {
                    let file = page_file(root, &config.path, year);
                    if file.is_file() {
                        registry.register(
                            &config.path,
                            year,
                            MarkdownPage {
                                title: format!("{} · {} {}", exam.name, subject.name, year),
                                file,
                            },
                        );
                    } else {
                        warn!("Missing page for {} ({}): {}", config.path, year, file.display());
                    }
                }
            }
        }
        info!(
            "Discovered {} content pages under {}",
            registry.len(),
            root.display()
        );
        registry
    }

    /// Resolve `(path, year)` and run its entry point.
    pub fn load_handler(&self, path: &str, year: &str) -> Result<Content, RegistryError> {
        let unresolved = || RegistryError::Unresolved {
            path: path.to_string(),
            year: year.to_string(),
        };

        let year: i32 = year.parse().map_err(|_| unresolved())?;
        let handler = self
            .handlers
            .get(&(path.to_string(), year))
            .ok_or_else(unresolved)?;

        info!("Opening content {} ({})", path, year);
        handler.entry().map_err(|source| RegistryError::Handler {
            path: path.to_string(),
            year,
            source,
        })
    }

    /// Selectable `(path, year)` pairs with no registered handler.
    pub fn missing_pages(&self, catalog: &Catalog, latest_year: i32) -> Vec<(String, i32)> {
        let mut missing = Vec::new();
        for exam in &catalog.exams {
            for subject in exam.subjects.iter().filter(|s| s.config.active) {
                let config = &subject.config;
                if config.maintenance {
                    continue;
                }
                for year in render_subject(config, latest_year) {
                    if !self.contains(&config.path, year) {
                        missing.push((config.path.clone(), year));
                    }
                }
            }
        }
        missing
    }
}

/// `brevet.maths` + 2022 → `<root>/brevet/maths/Annee_2022.md`
pub fn page_file(root: &Path, path: &str, year: i32) -> PathBuf {
    let mut file = root.to_path_buf();
    for segment in path.split('.') {
        file.push(segment);
    }
    file.push(format!("{PAGE_PREFIX}{year}.md"));
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_catalog;

    fn static_page(body: &'static str) -> impl ContentHandler {
        move || -> Result<Content, HandlerError> {
            Ok(Content {
                title: "t".to_string(),
                body: body.to_string(),
            })
        }
    }

    #[test]
    fn test_load_registered_handler() {
        let mut registry = ContentRegistry::new();
        registry.register("maths", 2022, static_page("# Sujet 2022"));

        let content = registry.load_handler("maths", "2022").unwrap();
        assert_eq!(content.body, "# Sujet 2022");
    }

    #[test]
    fn test_unknown_pair_is_unresolved() {
        let mut registry = ContentRegistry::new();
        registry.register("maths", 2022, static_page(""));

        let err = registry.load_handler("maths", "2021").unwrap_err();
        assert!(matches!(err, RegistryError::Unresolved { .. }));
        let err = registry.load_handler("physique", "2022").unwrap_err();
        assert!(matches!(err, RegistryError::Unresolved { .. }));
    }

    #[test]
    fn test_non_numeric_year_is_unresolved() {
        let registry = ContentRegistry::new();
        let err = registry.load_handler("maths", "deux").unwrap_err();
        assert_eq!(err.to_string(), "no content for maths (deux)");
    }

    #[test]
    fn test_failing_entry_point() {
        let mut registry = ContentRegistry::new();
        registry.register("maths", 2020, || -> Result<Content, HandlerError> {
            Err(HandlerError::Failed("boom".to_string()))
        });
        let err = registry.load_handler("maths", "2020").unwrap_err();
        assert!(matches!(err, RegistryError::Handler { year: 2020, .. }));
    }

    #[test]
    fn test_markdown_page_missing_file() {
        let page = MarkdownPage {
            title: "x".to_string(),
            file: PathBuf::from("/nonexistent/prepa/Annee_2020.md"),
        };
        assert!(matches!(page.entry(), Err(HandlerError::Io { .. })));
    }

    #[test]
    fn test_discover_skips_maintenance_subjects() {
        let dir = tempfile::tempdir().unwrap();
        for (path, year) in [("maths", 2023), ("brevet.physique_chimie", 2023)] {
            let file = page_file(dir.path(), path, year);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(&file, "# Sujet").unwrap();
        }

        let registry = ContentRegistry::discover(dir.path(), &test_catalog(), 2023);
        assert!(registry.contains("maths", 2023));
        assert!(!registry.contains("brevet.physique_chimie", 2023));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_page_file_layout() {
        let file = page_file(Path::new("content"), "brevet.sciences_physiques", 2021);
        assert_eq!(
            file,
            Path::new("content/brevet/sciences_physiques/Annee_2021.md")
        );
    }
}
