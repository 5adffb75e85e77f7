use std::fs;
use std::path::Path;

use prepa::core::action::{Action, Effect, update};
use prepa::core::catalog::{CatalogError, load_catalog};
use prepa::core::registry::{ContentRegistry, RegistryError, page_file};
use prepa::core::router::{self, Phase, RouterError};
use prepa::core::state::App;
use prepa::report::check_report;
use prepa::tui::open_current_page;

// ============================================================================
// Helper Functions
// ============================================================================

const CATALOG: &str = r#"{
    "Brevet": {
        "Maths": {"emoji":"🔢","active":true,"start_year":2020,"bypass_years":[2021],"path":"maths"},
        "Sciences": {"emoji":"🔬","active":true,"Maintenance":true,"start_year":2019,"bypass_years":[],"path":"brevet.sciences_physiques"},
        "Anglais": {"emoji":"🇬🇧","active":false,"Maintenance":true,"start_year":2019,"bypass_years":[],"path":"brevet.anglais"}
    },
    "Bac": {
        "Philosophie": {"emoji":"🤔","active":true,"Message":true,"message_content":"Corrigés en cours de rédaction","start_year":2022,"bypass_years":[],"path":"bac.philo"}
    }
}"#;

/// Writes the catalog and the given pages into a fresh directory.
fn fixture(pages: &[(&str, i32, &str)]) -> (tempfile::TempDir, App, ContentRegistry) {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("matieres.json");
    fs::write(&catalog_path, CATALOG).unwrap();

    let content_dir = dir.path().join("content");
    for (path, year, body) in pages {
        let file = page_file(&content_dir, path, *year);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, body).unwrap();
    }

    let catalog = load_catalog(&catalog_path).unwrap();
    let registry = ContentRegistry::discover(&content_dir, &catalog, 2023);
    let app = App::new(catalog, "Prépa".to_string(), 2023);
    (dir, app, registry)
}

/// Folds actions through `update`, opening the page when one is dispatched.
fn drive(app: &mut App, registry: &ContentRegistry, actions: &[Action]) {
    for action in actions {
        if update(app, action.clone()) == Effect::Dispatch {
            let outcome = open_current_page(app, registry);
            update(app, outcome);
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_brevet_maths_tabs_and_years() {
    let (_dir, app, _registry) = fixture(&[]);
    let subjects = app.visible_subjects().unwrap();

    let labels: Vec<String> = subjects.iter().map(|s| s.tab_label()).collect();
    assert_eq!(labels, vec!["🔢 Maths", "⚠️ Sciences"]);
    assert_eq!(subjects[0].years(), &[2023, 2022, 2020]);
    assert!(subjects[1].years().is_empty());
}

#[test]
fn test_year_button_opens_page() {
    let (_dir, mut app, registry) = fixture(&[
        ("maths", 2022, "# Brevet 2022\n\n## Exercice 1\n\nCalculer $3 \\times 4$."),
        ("maths", 2023, "# Brevet 2023"),
    ]);

    drive(
        &mut app,
        &registry,
        &[Action::Confirm, Action::Confirm, Action::MoveDown, Action::Confirm],
    );

    assert_eq!(app.phase, Phase::Dispatched);
    assert_eq!(app.nav.current_page, "maths_2022");
    assert_eq!(router::dispatch(&app.nav.current_page).unwrap(), ("maths", "2022"));
    let content = app.content.as_ref().unwrap();
    assert_eq!(content.title, "Brevet · Maths 2022");
    assert!(content.body.contains("Exercice 1"));
    assert!(app.error.is_none());
}

#[test]
fn test_missing_page_reports_unavailable() {
    let (_dir, mut app, registry) = fixture(&[("maths", 2023, "# Brevet 2023")]);

    drive(
        &mut app,
        &registry,
        &[Action::Confirm, Action::Confirm, Action::MoveDown, Action::MoveDown, Action::Confirm],
    );

    assert_eq!(app.nav.current_page, "maths_2020");
    assert!(app.content.is_none());
    assert!(app.error.as_deref().unwrap().starts_with("Contenu indisponible"));
    assert!(matches!(
        registry.load_handler("maths", "2020"),
        Err(RegistryError::Unresolved { .. })
    ));
}

#[test]
fn test_maintenance_subject_never_dispatches() {
    let (_dir, mut app, registry) = fixture(&[("brevet.sciences_physiques", 2023, "# Sciences")]);

    drive(
        &mut app,
        &registry,
        &[Action::Confirm, Action::MoveRight, Action::Confirm, Action::Confirm],
    );

    assert_eq!(app.phase, Phase::SelectingSubject);
    assert!(app.nav.current_page.is_empty());
    assert!(!registry.contains("brevet.sciences_physiques", 2023));
    assert!(registry.is_empty());
}

#[test]
fn test_delimited_path_round_trips_through_registry() {
    let (_dir, _app, registry) = fixture(&[("bac.philo", 2022, "# Philo 2022")]);
    let mut nav = router::NavigationState::default();
    let key = router::select_year(&mut nav, "brevet.sciences_physiques", 2021);
    assert_eq!(router::dispatch(&key).unwrap(), ("brevet.sciences_physiques", "2021"));

    let key = router::select_year(&mut nav, "bac.philo", 2022);
    let (path, year) = router::dispatch(&key).unwrap();
    assert_eq!(registry.load_handler(path, year).unwrap().body, "# Philo 2022");
}

#[test]
fn test_bac_notice_and_empty_exam() {
    let (_dir, mut app, _registry) = fixture(&[]);
    update(&mut app, Action::MoveDown);
    let subjects = app.visible_subjects().unwrap();
    assert_eq!(subjects[0].years(), &[2023, 2022]);
    assert_eq!(
        subjects[0].body,
        router::SubjectBody::Available {
            notice: Some("Corrigés en cours de rédaction".to_string()),
            years: vec![2023, 2022],
        }
    );

    let mut only_inactive = app.catalog.clone();
    only_inactive.exams[0].subjects.retain(|s| !s.config.active);
    assert_eq!(
        router::select_exam_type(&only_inactive.exams[0], 2023),
        Err(RouterError::EmptySelection {
            exam: "Brevet".to_string()
        })
    );
}

#[test]
fn test_check_report_lists_missing_pages() {
    let (_dir, app, registry) = fixture(&[("maths", 2023, "a"), ("maths", 2020, "b")]);
    let report = check_report(&app.catalog, &registry, 2023);
    assert_eq!(
        report.missing,
        vec![
            ("maths".to_string(), 2022),
            ("bac.philo".to_string(), 2023),
            ("bac.philo".to_string(), 2022),
        ]
    );
}

#[test]
fn test_missing_catalog_file() {
    let err = load_catalog(Path::new("/nonexistent/prepa/matieres.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
