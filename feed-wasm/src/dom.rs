use wasm_bindgen::JsValue;

use crate::region::Region;

pub(crate) fn element_region(element: &web_sys::Element) -> Region {
    let rect = element.get_bounding_client_rect();
    Region::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

// Высота подгоняется под содержимое: сбросить, затем выставить по scrollHeight.
pub(crate) fn autosize_textarea(textarea: &web_sys::HtmlTextAreaElement) {
    let style = textarea.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &format!("{}px", textarea.scroll_height()));
}

pub(crate) fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

pub(crate) fn now_iso() -> String {
    js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default()
}
