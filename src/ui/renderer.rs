//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components. It switches layouts per
//! screen (home, search, details).
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! # Example
//!
//! ```rust
//! use eventscout::api::Endpoints;
//! use eventscout::app::AppState;
//! use eventscout::ui::{render, Theme};
//!
//! let endpoints = Endpoints::new("http://localhost:8080", None)?;
//! let state = AppState::new(endpoints, Theme::default(), 10);
//! render(&state, 24, 80); // Render to stdout
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenView, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// layout of the active screen.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!`. Does not clear the
/// screen; the host redraws the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a view model with screen-specific layout.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.screen {
        ScreenView::Home(list) => components::render_home(vm, list, theme, cols, rows),
        ScreenView::Search(search) => components::render_search(vm, search, theme, cols, rows),
        ScreenView::Details(details) => components::render_details_screen(vm, details, theme, cols, rows),
    }
}
