use wasm_bindgen::JsValue;
use web_sys::{
    Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use wayfinder_core::{AnchorLookup, Rect, Size};

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> Rect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> Rect {
        let rect = self.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

pub(crate) struct BrowserDom {
    window: Option<Window>,
    document: Option<Document>,
}

impl BrowserDom {
    pub(crate) fn new() -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(Window::document);
        Self { window, document }
    }

    pub(crate) fn element(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    pub(crate) fn scroll_into_view(&self, id: &str) {
        let Some(element) = self.element(id) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

impl AnchorLookup for BrowserDom {
    fn anchor_rect(&self, id: &str) -> Option<Rect> {
        self.element(id).map(|element| element.client_rect())
    }

    fn viewport(&self) -> Size {
        self.window
            .as_ref()
            .map(window_size)
            .unwrap_or_default()
    }
}

pub(crate) fn viewport_size() -> Size {
    web_sys::window()
        .as_ref()
        .map(window_size)
        .unwrap_or_default()
}

pub(crate) fn element_size(element: &Element) -> Size {
    element.client_rect().size()
}

fn window_size(window: &Window) -> Size {
    Size::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

fn dimension(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(id: &str, style: &str) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document");
        let element = document.create_element("div").expect("div");
        element.set_id(id);
        element.set_attribute("style", style).expect("style");
        document
            .body()
            .expect("body")
            .append_child(&element)
            .expect("append");
        element
    }

    #[wasm_bindgen_test]
    fn measures_mounted_anchor() {
        let element = mount("wf-test-anchor", "width: 120px; height: 30px;");
        let dom = BrowserDom::new();
        let rect = dom.anchor_rect("wf-test-anchor").expect("rect");
        assert_eq!(rect.width, 120.0);
        assert_eq!(rect.height, 30.0);
        assert!(dom.viewport().height > 0.0);
        element.remove();
    }

    #[wasm_bindgen_test]
    fn hidden_anchor_measures_zero_width() {
        let element = mount("wf-test-hidden", "display: none;");
        let dom = BrowserDom::new();
        assert_eq!(dom.anchor_rect("wf-test-hidden").map(|rect| rect.width), Some(0.0));
        assert_eq!(dom.anchor_rect("wf-test-missing"), None);
        element.remove();
    }
}
