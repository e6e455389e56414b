//! Scroll-based reading-progress indicator.
//!
//! Keeps the `#reading-progress-bar` element's width in sync with how far
//! the user has scrolled through the page. Recomputation is coalesced to
//! the rendering cadence: a burst of scroll events schedules at most one
//! update per animation frame, and the last position sampled before the
//! frame boundary wins.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom;

/// Element id of the bar this component drives. Pages without it opt out
/// of the indicator entirely.
pub const PROGRESS_BAR_ID: &str = "reading-progress-bar";

/// Viewport and document geometry sampled at update time. Transient by
/// contract: every update re-reads the environment, nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub document_height: f64,
    pub scroll_offset: f64,
}

impl ScrollMetrics {
    /// Maximum scrollable distance. Zero or negative on pages shorter than
    /// the viewport.
    pub fn max_scrollable(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Scroll progress in `[0, 1]`. Defined as 0 when nothing is
    /// scrollable, and clamped so elastic over-scroll never escapes the
    /// range.
    pub fn progress_fraction(&self) -> f64 {
        let max_scrollable = self.max_scrollable();
        if max_scrollable > 0.0 {
            (self.scroll_offset / max_scrollable).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Scroll progress as a display percentage in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.progress_fraction() * 100.0
    }
}

/// Single-slot pending flag coalescing event bursts to one recomputation
/// per rendering cycle.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should queue a frame callback,
    /// `false` while one is already queued.
    pub fn try_schedule(&self) -> bool {
        if self.pending.get() {
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Marks the queued frame callback as executed so the next event can
    /// schedule again.
    pub fn frame_ran(&self) {
        self.pending.set(false);
    }
}

pub struct ProgressIndicator;

impl ProgressIndicator {
    /// Locate the bar, paint it once, and wire the coalesced scroll and
    /// resize listeners. A page without the bar element stays untouched
    /// for its whole lifetime.
    pub fn attach() {
        let Some(bar) = dom::element_by_id(PROGRESS_BAR_ID) else {
            return;
        };
        update_bar(&bar);

        let Some(window) = web_sys::window() else { return };
        let gate = Rc::new(FrameGate::new());
        let frame_callback = Closure::<dyn FnMut()>::new({
            let gate = gate.clone();
            let bar = bar.clone();
            move || {
                update_bar(&bar);
                gate.frame_ran();
            }
        });
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new({
            let window = window.clone();
            move |_: web_sys::Event| {
                if gate.try_schedule() {
                    let frame_fn: &js_sys::Function = frame_callback.as_ref().unchecked_ref();
                    let _ = window.request_animation_frame(frame_fn);
                }
            }
        });
        let _ = window
            .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
        let _ = window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        listener.forget();
    }
}

fn sample_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let document_element = dom::document().and_then(|document| document.document_element())?;
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let scroll_offset = window
        .scroll_y()
        .ok()
        .unwrap_or_else(|| f64::from(document_element.scroll_top()));
    Some(ScrollMetrics {
        viewport_height,
        document_height: f64::from(document_element.scroll_height()),
        scroll_offset,
    })
}

/// Write the current clamped percentage as the bar's fill extent.
fn update_bar(bar: &web_sys::HtmlElement) {
    if let Some(metrics) = sample_metrics() {
        let _ = bar
            .style()
            .set_property("width", &format!("{}%", metrics.percentage()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(viewport: f64, document: f64, offset: f64) -> ScrollMetrics {
        ScrollMetrics {
            viewport_height: viewport,
            document_height: document,
            scroll_offset: offset,
        }
    }

    #[test]
    fn short_page_has_zero_progress() {
        // documentHeight <= viewportHeight must never divide.
        assert_eq!(metrics(800.0, 800.0, 0.0).progress_fraction(), 0.0);
        assert_eq!(metrics(800.0, 500.0, 120.0).progress_fraction(), 0.0);
        assert_eq!(metrics(800.0, 500.0, 120.0).percentage(), 0.0);
    }

    #[test]
    fn fraction_is_proportional_to_offset() {
        let halfway = metrics(800.0, 1800.0, 500.0);
        assert_eq!(halfway.max_scrollable(), 1000.0);
        assert_eq!(halfway.progress_fraction(), 0.5);
        assert_eq!(halfway.percentage(), 50.0);

        assert_eq!(metrics(800.0, 1800.0, 0.0).percentage(), 0.0);
        assert_eq!(metrics(800.0, 1800.0, 1000.0).percentage(), 100.0);
    }

    #[test]
    fn fraction_is_monotone_in_offset() {
        let mut previous = -1.0;
        for offset in 0..=20 {
            let fraction = metrics(600.0, 2600.0, f64::from(offset) * 100.0).progress_fraction();
            assert!(fraction >= previous);
            previous = fraction;
        }
    }

    #[test]
    fn overscroll_is_clamped() {
        // Elastic over-scroll can report offsets past the maximum, and
        // rubber-banding at the top can report negative ones.
        assert_eq!(metrics(800.0, 1800.0, 1500.0).percentage(), 100.0);
        assert_eq!(metrics(800.0, 1800.0, -50.0).percentage(), 0.0);
    }

    #[test]
    fn gate_grants_one_slot_per_frame() {
        let gate = FrameGate::new();

        assert!(gate.try_schedule());
        assert!(!gate.try_schedule());
        assert!(!gate.try_schedule());

        gate.frame_ran();
        assert!(gate.try_schedule());
        assert!(!gate.try_schedule());
    }
}
