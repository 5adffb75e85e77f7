//! # Exam Picker Component
//!
//! Radio choice of exam type ("Brevet", "Bac", ...). Stateless: the selected
//! index lives in `App::selected_exam` and changes through `update()`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::tui::component::Component;

pub const PICKER_TITLE: &str = " Choisir le type d'examen ";

pub struct ExamPicker<'a> {
    pub exams: Vec<&'a str>,
    pub selected: usize,
    /// Highlighted while the user is choosing an exam.
    pub focused: bool,
}

impl<'a> ExamPicker<'a> {
    pub fn new(exams: Vec<&'a str>, selected: usize, focused: bool) -> Self {
        Self {
            exams,
            selected,
            focused,
        }
    }

    /// Rows needed: one per exam plus the borders.
    pub fn required_height(&self) -> u16 {
        self.exams.len() as u16 + 2
    }
}

impl Component for ExamPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines: Vec<Line> = self
            .exams
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == self.selected {
                    Line::from(vec![
                        Span::styled("(●) ", Style::default().fg(Color::Cyan)),
                        Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled("( ) ", Style::default().fg(Color::DarkGray)),
                        Span::raw(name.to_string()),
                    ])
                }
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(PICKER_TITLE)
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
