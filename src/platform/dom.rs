//! Element helpers
//!
//! Missing elements are ignored so the same bundle works on pages that
//! only embed some of the games.

use chrono::{DateTime, Utc};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_visible(id: &str, visible: bool) {
    if let Some(el) = by_id(id) {
        let _ = el.toggle_attribute_with_force("hidden", !visible);
    }
}

pub fn set_enabled(id: &str, enabled: bool) {
    if let Some(el) = by_id(id) {
        let _ = el.toggle_attribute_with_force("disabled", !enabled);
    }
}

pub fn input_value(id: &str) -> Option<String> {
    Some(by_id(id)?.dyn_into::<HtmlInputElement>().ok()?.value())
}

pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
        input.set_value(value);
    }
}

/// Replace a list's children with one `<li>` per line (as text, never HTML)
pub fn fill_list(id: &str, lines: impl IntoIterator<Item = String>) {
    let (Some(doc), Some(list)) = (document(), by_id(id)) else {
        return;
    };
    list.set_text_content(None);
    for line in lines {
        if let Ok(li) = doc.create_element("li") {
            li.set_text_content(Some(&line));
            let _ = list.append_child(&li);
        }
    }
}

/// Attach a listener to an element for the page lifetime
pub fn on(id: &str, event: &str, mut handler: impl FnMut(web_sys::Event) + 'static) {
    let Some(el) = by_id(id) else {
        log::debug!("#{id} not on page, skipping {event} handler");
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |e: web_sys::Event| handler(e));
    let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
    on(id, "click", move |_| handler());
}

/// Wall clock from the browser
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}
