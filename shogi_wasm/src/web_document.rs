use crate::rust_error;
use crate::web_error_handling::JsResult;


// The page document with lookups that fail loudly instead of returning `None`.
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn raw(&self) -> &web_sys::Document { &self.0 }

    pub fn body(&self) -> JsResult<web_sys::HtmlElement> {
        self.0.body().ok_or_else(|| rust_error!("Page has no body"))
    }

    // Every id the client looks up is created by `render_skeleton`.
    pub fn existing_element(&self, id: &str) -> JsResult<web_sys::Element> {
        self.0
            .get_element_by_id(id)
            .ok_or_else(|| rust_error!("Page skeleton is missing \"{}\"", id))
    }

    pub fn create_element(&self, local_name: &str) -> JsResult<web_sys::Element> {
        self.0.create_element(local_name)
    }

    // Returns the element with the given id, creating it under `parent` on first use.
    pub fn ensure_node(
        &self, local_name: &str, id: &str, parent: &web_sys::Element,
    ) -> JsResult<web_sys::Element> {
        if let Some(existing) = self.0.get_element_by_id(id) {
            return Ok(existing);
        }
        let node = self.create_element(local_name)?;
        node.set_id(id);
        parent.append_child(&node)?;
        Ok(node)
    }
}

pub fn web_window() -> JsResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| rust_error!("No window: not running in a browser"))
}

pub fn web_document() -> JsResult<WebDocument> {
    let document = web_window()?.document().ok_or_else(|| rust_error!("Window has no document"))?;
    Ok(WebDocument(document))
}
