//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal-based UI, transforming view models into
//! ANSI-styled output through composable rendering components. It provides theme
//! support, responsive layout, and keyword match highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod viewmodel;
pub mod renderer;
pub mod components;
pub mod helpers;
pub mod theme;

pub use viewmodel::{
    DetailsView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListView, ScreenView, SearchView, UIViewModel,
};
pub use renderer::render;
pub use theme::Theme;
