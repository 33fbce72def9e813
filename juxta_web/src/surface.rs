//! `web-sys` implementation of [`Surface`].

use juxta_core::dom::Surface;
use juxta_core::geometry::{NaturalSize, PageBox};
use juxta_core::{JxError, JxResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

/// The live document of the current window
#[derive(Debug, Clone)]
pub struct WebSurface {
    window: Window,
    document: Document,
}

impl WebSurface {
    pub fn new() -> JxResult<Self> {
        let window = web_sys::window().ok_or_else(|| JxError::dom("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JxError::dom("document", "window has no document"))?;
        Ok(WebSurface { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

fn js_error(operation: &'static str) -> impl FnOnce(JsValue) -> JxError {
    move |value| {
        let reason = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        JxError::dom(operation, reason)
    }
}

/// Integer prefix of a CSS length such as "812.5px"
fn css_px(value: &str) -> Option<f64> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits.parse().ok()
}

impl Surface for WebSurface {
    type Node = HtmlElement;
    type Image = HtmlImageElement;

    fn create_element(&self, tag: &str) -> JxResult<HtmlElement> {
        self.document
            .create_element(tag)
            .map_err(js_error("create_element"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JxError::dom("create_element", format!("<{}> is not an HTML element", tag)))
    }

    fn create_image(&self, src: &str, alt: &str) -> JxResult<HtmlImageElement> {
        let image = HtmlImageElement::new().map_err(js_error("create_image"))?;
        image.set_alt(alt);
        image.set_src(src);
        Ok(image)
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> JxResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_error("append_child"))
    }

    fn append_image(&self, parent: &HtmlElement, image: &HtmlImageElement) -> JxResult<()> {
        parent.append_child(image).map(|_| ()).map_err(js_error("append_image"))
    }

    fn append_text(&self, parent: &HtmlElement, text: &str) -> JxResult<()> {
        let node = self.document.create_text_node(text);
        parent.append_child(&node).map(|_| ()).map_err(js_error("append_text"))
    }

    fn remove_child(&self, parent: &HtmlElement, child: &HtmlElement) -> JxResult<()> {
        parent.remove_child(child).map(|_| ()).map_err(js_error("remove_child"))
    }

    fn set_class_name(&self, node: &HtmlElement, classes: &str) {
        node.set_class_name(classes);
    }

    fn add_class(&self, node: &HtmlElement, class: &str) -> JxResult<()> {
        node.class_list().add_1(class).map_err(js_error("add_class"))
    }

    fn remove_class(&self, node: &HtmlElement, class: &str) -> JxResult<()> {
        node.class_list().remove_1(class).map_err(js_error("remove_class"))
    }

    fn set_attribute(&self, node: &HtmlElement, name: &str, value: &str) -> JxResult<()> {
        node.set_attribute(name, value).map_err(js_error("set_attribute"))
    }

    fn set_text(&self, node: &HtmlElement, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) -> JxResult<()> {
        node.style().set_property(property, value).map_err(js_error("set_style"))
    }

    fn rendered_size(&self, node: &HtmlElement) -> (f64, f64) {
        let computed = self.window.get_computed_style(node).ok().flatten().and_then(|style| {
            let width = css_px(&style.get_property_value("width").ok()?)?;
            let height = css_px(&style.get_property_value("height").ok()?)?;
            Some((width, height))
        });

        computed.unwrap_or_else(|| {
            let rect = node.get_bounding_client_rect();
            (rect.right() - rect.left(), rect.bottom() - rect.top())
        })
    }

    fn page_box(&self, node: &HtmlElement) -> PageBox {
        let rect = node.get_bounding_client_rect();
        let scroll_x = self.window.scroll_x().unwrap_or(0.0);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        PageBox::new(
            rect.left() + scroll_x,
            rect.top() + scroll_y,
            node.offset_width() as f64,
            node.offset_height() as f64,
        )
    }

    fn natural_size(&self, image: &HtmlImageElement) -> NaturalSize {
        NaturalSize::new(image.natural_width() as f64, image.natural_height() as f64)
    }
}
