//! Pointer capability and hover-target checks

use gloo::utils::window;
use wasm_bindgen::JsValue;
use web_sys::Element;

/// What kind of pointer the device offers, decided once at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerCapability {
    /// Mouse or trackpad; the cursor effect runs
    #[default]
    Fine,
    /// Touch-capable device; the cursor effect stays inert
    Touch,
}

impl PointerCapability {
    /// Probe the browser for touch support
    pub fn detect() -> Self {
        let window = window();
        let has_touch_events =
            js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
        Self::from_touch_support(has_touch_events, window.navigator().max_touch_points())
    }

    pub const fn from_touch_support(has_touch_events: bool, max_touch_points: i32) -> Self {
        if has_touch_events || max_touch_points > 0 {
            Self::Touch
        } else {
            Self::Fine
        }
    }

    pub const fn is_touch(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Whether the element under the pointer is a link, a button, inside one,
/// or styled with a pointer cursor
pub fn is_interactive(element: &Element) -> bool {
    let inside_link_or_button = element.closest("a, button").ok().flatten().is_some();
    let cursor = window()
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("cursor").ok())
        .unwrap_or_default();

    interactive_hint(&element.tag_name(), inside_link_or_button, &cursor)
}

pub fn interactive_hint(tag_name: &str, inside_link_or_button: bool, cursor: &str) -> bool {
    tag_name.eq_ignore_ascii_case("a")
        || tag_name.eq_ignore_ascii_case("button")
        || inside_link_or_button
        || cursor == "pointer"
}
