//! Thin helpers over the browser environment shared by both components.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Look up an element by id, typed as `HtmlElement`. `None` when the page
/// does not carry the element.
pub fn element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    document()
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Run `callback` once the document structure is ready.
///
/// The wasm module may be instantiated after `DOMContentLoaded` already
/// fired, so `callback` runs immediately when the document has left the
/// `loading` state; otherwise it is deferred to the event.
pub fn on_structure_ready(callback: impl FnOnce() + 'static) {
    let Some(document) = document() else { return };
    if document.ready_state() != "loading" {
        callback();
        return;
    }
    let closure = Closure::once(move |_: web_sys::Event| callback());
    let _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
}
