use crate::core::router::{EMPTY_SELECTION_WARNING, Phase};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::content_view::render_error_view;
use crate::tui::components::subject_tabs::render_empty_warning;
use crate::tui::components::{ContentView, ExamPicker, SubjectTabs, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.title.clone(), app.status_message.clone()).render(frame, title_area);

    if app.phase == Phase::Dispatched {
        draw_page(frame, main_area, app, tui);
    } else {
        draw_selection(frame, main_area, app);
    }

    let help = Paragraph::new(Line::from(help_text(app.phase)))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, help_area);
}

fn draw_selection(frame: &mut Frame, area: Rect, app: &App) {
    let mut picker = ExamPicker::new(
        app.catalog.exam_names(),
        app.selected_exam,
        app.phase == Phase::SelectingExam,
    );
    let [picker_area, tabs_area] =
        Layout::vertical([Constraint::Length(picker.required_height()), Constraint::Min(0)])
            .areas(area);
    picker.render(frame, picker_area);

    match app.visible_subjects() {
        Ok(subjects) => SubjectTabs {
            subjects: &subjects,
            selected_tab: app.selected_tab,
            selected_year: app.selected_year,
            tabs_focused: app.phase == Phase::SelectingSubject,
            years_focused: app.phase == Phase::SelectingYear,
        }
        .render(frame, tabs_area),
        Err(_) => render_empty_warning(frame, tabs_area, EMPTY_SELECTION_WARNING),
    }
}

fn draw_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    if let Some(error) = &app.error {
        render_error_view(frame, area, error);
    } else if let Some(content) = &app.content {
        ContentView::new(&mut tui.content_view, content).render(frame, area);
    } else {
        frame.render_widget(
            Paragraph::new("Chargement…").alignment(Alignment::Center),
            area,
        );
    }
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::SelectingExam => "↑↓ Examen  Enter Choisir  q Quitter",
        Phase::SelectingSubject => "←→ Matière  ↑↓ Examen  Enter Années  Esc Retour  q Quitter",
        Phase::SelectingYear => "↑↓ Année  ←→ Matière  Enter Commencer  Esc Retour  q Quitter",
        Phase::Dispatched => "↑↓ PgUp PgDn Défiler  q Quitter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::registry::Content;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_initial_screen_shows_picker_and_tabs() {
        let app = test_app();
        let text = screen(&app, &mut TuiState::new());
        assert!(text.contains("Préparation au Brevet et Bac"));
        assert!(text.contains("(●) Brevet"));
        assert!(text.contains("( ) Bac"));
        assert!(text.contains("Maths"));
        assert!(!text.contains("Français"));
    }

    #[test]
    fn test_empty_exam_shows_warning() {
        let mut app = test_app();
        update(&mut app, Action::MoveDown);
        let text = screen(&app, &mut TuiState::new());
        assert!(text.contains("Aucune matière actuellement disponible"));
    }

    #[test]
    fn test_dispatched_screen_shows_content_or_error() {
        let mut app = test_app();
        for action in [Action::Confirm, Action::Confirm, Action::Confirm] {
            update(&mut app, action);
        }
        let mut tui = TuiState::new();
        assert!(screen(&app, &mut tui).contains("Chargement"));

        update(
            &mut app,
            Action::ContentLoaded(Content {
                title: "Brevet · Maths 2023".to_string(),
                body: "## Exercice 1".to_string(),
            }),
        );
        let text = screen(&app, &mut tui);
        assert!(text.contains("Exercice 1"));
        assert!(!text.contains("Choisir le type"));

        update(&mut app, Action::ContentFailed("no content for maths (2023)".to_string()));
        assert!(screen(&app, &mut tui).contains("Contenu indisponible"));
    }
}
