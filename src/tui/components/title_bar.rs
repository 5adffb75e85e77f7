//! # TitleBar Component
//!
//! Top line showing the application title and the current status message
//! (empty-selection warning, maintenance notice, opened page title).
//!
//! Purely presentational: every field is a prop copied from `App` each frame.
//!
//! 1. **Status**: `"Préparation au Brevet et Bac | Brevet · Maths 2022"`
//! 2. **Default**: `"Préparation au Brevet et Bac"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub title: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(title: String, status_message: String) -> Self {
        Self {
            title,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
