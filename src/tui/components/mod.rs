//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as fields, built fresh each frame from `App`:
//! - `TitleBar`: Top line with title and status message
//! - `ExamPicker`: Radio choice of exam type
//! - `SubjectTabs`: Subject tabs with year buttons or maintenance message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep presentation state in `TuiState` between frames:
//! - `ContentView`: Scrollable markdown page (`ContentViewState`)
//!
//! Each component file contains its state types, rendering, event handling
//! and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── exam_picker.rs   (Exam type radio)
//! ├── subject_tabs.rs  (Tabs, year buttons, empty-selection warning)
//! └── content_view.rs  (Opened page, error view)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod content_view;
pub mod exam_picker;
pub mod subject_tabs;
pub use content_view::{ContentView, ContentViewState};
pub use exam_picker::ExamPicker;
pub use subject_tabs::SubjectTabs;
