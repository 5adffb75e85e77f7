//! # Core Application Logic
//!
//! This module contains Prepa's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (exams)      │
//!                    │  • Router (navigation)  │
//!                    │  • Registry (pages)     │
//!                    │  • State + Action       │
//!                    │                         │
//!                    │  No UI. Pure reducer.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   --check  │      │    Web     │
//!     │  Adapter   │      │   report   │      │  (future)  │
//!     │ (ratatui)  │      │   (main)   │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Loads `matieres.json` into exam types and subjects
//! - [`router`]: Visible tabs, year buttons, page keys
//! - [`registry`]: `(path, year)` → content handler table
//! - [`config`]: Layered runtime settings
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod catalog;
pub mod config;
pub mod registry;
pub mod router;
pub mod state;
