//! # Content View Component
//!
//! Scrollable rendering of the page opened by a year button.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContentViewState` lives in `TuiState` (scroll offset, parsed markdown)
//! - `ContentView` is created each frame with borrowed state
//!
//! The markdown is parsed once per page, not per frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::registry::Content;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub const BODY_FG: Color = Color::Gray;

#[derive(Default)]
pub struct ContentViewState {
    pub scroll_state: ScrollViewState,
    /// Title of the page `text` was parsed from.
    parsed_for: Option<String>,
    text: Text<'static>,
}

impl ContentViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` unless it's already the page on display.
    pub fn prepare(&mut self, content: &Content) {
        if self.parsed_for.as_deref() == Some(content.title.as_str()) {
            return;
        }
        self.text = markdown::render(&content.body, BODY_FG);
        self.parsed_for = Some(content.title.clone());
        self.scroll_state = ScrollViewState::default();
    }

    pub fn line_count(&self) -> usize {
        self.text.lines.len()
    }
}

impl EventHandler for ContentViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            TuiEvent::ScrollToBottom => self.scroll_state.scroll_to_bottom(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper for the opened page.
pub struct ContentView<'a> {
    state: &'a mut ContentViewState,
    content: &'a Content,
}

impl<'a> ContentView<'a> {
    pub fn new(state: &'a mut ContentViewState, content: &'a Content) -> Self {
        Self { state, content }
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.prepare(self.content);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.content.title))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Leave a column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.state.text.clone()).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

/// Full-area message shown when the dispatched page couldn't be opened.
pub fn render_error_view(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(message.to_string()),
        Line::default(),
        Line::from("q pour quitter").style(Style::default().fg(Color::DarkGray)),
    ])
    .block(
        Block::bordered()
            .title(" Contenu indisponible ")
            .border_style(Style::default().fg(Color::Red)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
