//! Browser-side reading enhancements: a scroll-driven reading-progress bar
//! and a persisted light/dark theme toggle.
//!
//! The two components are independent. Each locates its DOM element by a
//! fixed id and degrades to a silent no-op for the lifetime of the page
//! when the element is missing.

use std::cell::OnceCell;

use wasm_bindgen::prelude::*;

mod dom;
mod progress;
mod theme;

pub use progress::{FrameGate, ProgressIndicator, ScrollMetrics};
pub use theme::{Theme, ThemeController};

thread_local! {
    /// Controller constructed once at startup; `toggle_theme` and the
    /// structure-ready hook borrow it from here.
    static THEME_CONTROLLER: OnceCell<ThemeController> = const { OnceCell::new() };
}

fn with_theme_controller(f: impl FnOnce(&ThemeController)) {
    THEME_CONTROLLER.with(|cell| f(cell.get_or_init(ThemeController::new)));
}

/// Entry point. Applies the stored theme immediately, before the document
/// finishes loading, so the page never flashes the wrong theme; everything
/// else is wired up once the structure is ready.
#[wasm_bindgen(start)]
pub fn start() {
    with_theme_controller(|controller| controller.prime());

    dom::on_structure_ready(|| {
        with_theme_controller(|controller| controller.finalize());
        ProgressIndicator::attach();
    });
}

/// Global toggle surface for surrounding markup to bind to the control's
/// activation event.
#[wasm_bindgen]
pub fn toggle_theme() {
    with_theme_controller(|controller| controller.toggle());
}
