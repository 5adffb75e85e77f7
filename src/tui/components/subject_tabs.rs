//! # Subject Tabs Component
//!
//! One tab per visible subject, and under the selected tab either the
//! maintenance message or the list of year buttons.
//!
//! ```text
//! ┌ 🔢 Maths │ ⚠️ Physique-Chimie ──────────────────────────┐
//! │ Maths                                                   │
//! │                                                         │
//! │ [ Commencer l'entraînement pour l'année 2023 ]          │
//! │ [ Commencer l'entraînement pour l'année 2022 ]          │
//! └─────────────────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap,
};
use unicode_width::UnicodeWidthStr;

use crate::core::router::{SubjectBody, VisibleSubject, year_button_label};
use crate::tui::component::Component;

pub struct SubjectTabs<'a> {
    pub subjects: &'a [VisibleSubject],
    pub selected_tab: usize,
    pub selected_year: usize,
    pub tabs_focused: bool,
    pub years_focused: bool,
}

impl Component for SubjectTabs<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let titles: Vec<Line> = self
            .subjects
            .iter()
            .map(|s| Line::from(fit_label(&s.tab_label(), tabs_area.width as usize)))
            .collect();
        let highlight = if self.tabs_focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let tabs = Tabs::new(titles)
            .select(self.selected_tab)
            .highlight_style(highlight)
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        let Some(subject) = self.subjects.get(self.selected_tab) else {
            return;
        };

        let border_style = if self.tabs_focused || self.years_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let inner = block.inner(body_area);
        frame.render_widget(block, body_area);

        let mut header = vec![
            Line::from(Span::styled(
                subject.name.clone(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::default(),
        ];

        let years = match &subject.body {
            SubjectBody::Maintenance { message } => {
                header.push(warning_line(message));
                frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: false }), inner);
                return;
            }
            SubjectBody::Available { notice, years } => {
                if let Some(notice) = notice {
                    header.push(warning_line(notice));
                    header.push(Line::default());
                }
                years
            }
        };

        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(header.len() as u16), Constraint::Min(0)])
                .areas(inner);
        frame.render_widget(Paragraph::new(header), header_area);

        let items: Vec<ListItem> = years
            .iter()
            .map(|year| {
                ListItem::new(format!("[ {} ]", year_button_label(*year)))
                    .style(Style::default().fg(Color::Gray))
            })
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        // The list scrolls so the selected button stays on screen.
        let mut list_state = ListState::default();
        if self.years_focused && !years.is_empty() {
            list_state.select(Some(self.selected_year.min(years.len() - 1)));
        }
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }
}

fn warning_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Yellow),
    ))
}

/// Shown instead of the tabs when the exam has no active subject.
pub fn render_empty_warning(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .padding(Padding::horizontal(1));
    let paragraph = Paragraph::new(warning_line(message))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Shorten a tab label so a handful of tabs still fit on narrow terminals.
fn fit_label(label: &str, total_width: usize) -> String {
    let max = (total_width / 3).max(8);
    if label.width() <= max {
        return label.to_string();
    }
    let mut out = String::new();
    for c in label.chars() {
        if out.width() + c.to_string().width() + 1 > max {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
