use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;

use crate::web_document::web_document;
use crate::web_error_handling::JsResult;


pub trait WebElementExt {
    fn with_id(self, value: &str) -> web_sys::Element;
    fn with_text_content(self, text: &str) -> web_sys::Element;
    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element>;
    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element>;
    fn with_disabled(self, disabled: bool) -> JsResult<web_sys::Element>;

    fn add_event_listener_and_forget<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<()>;

    fn remove_all_children(&self);
    fn append_new_element(&self, local_name: &str) -> JsResult<web_sys::Element>;
    fn append_text(self, text: &str) -> JsResult<web_sys::Element>;
    fn append_text_span<'a>(&self, text: &str, classes: impl IntoIterator<Item = &'a str>)
    -> JsResult<()>;
}

impl WebElementExt for web_sys::Element {
    fn with_id(self, value: &str) -> web_sys::Element {
        self.set_id(value);
        self
    }

    fn with_text_content(self, text: &str) -> web_sys::Element {
        self.set_text_content(Some(text));
        self
    }

    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> JsResult<web_sys::Element> {
        for class in classes {
            self.class_list().add_1(class)?;
        }
        Ok(self)
    }

    fn with_disabled(self, disabled: bool) -> JsResult<web_sys::Element> {
        if disabled {
            self.set_attribute("disabled", "")?;
        } else {
            self.remove_attribute("disabled")?;
        }
        Ok(self)
    }

    // The closure lives as long as the page. Only use for elements that are never re-created or
    // for handlers that do not capture anything heavy.
    fn add_event_listener_and_forget<E: FromWasmAbi + 'static>(
        &self, event_type: &str, listener: impl FnMut(E) -> JsResult<()> + 'static,
    ) -> JsResult<()> {
        let closure = Closure::new(listener);
        self.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn remove_all_children(&self) { self.replace_children_with_node_0() }

    fn append_new_element(&self, local_name: &str) -> JsResult<web_sys::Element> {
        let node = web_document()?.create_element(local_name)?;
        self.append_child(&node)?;
        Ok(node)
    }

    fn append_text(self, text: &str) -> JsResult<web_sys::Element> {
        self.append_with_str_1(text)?;
        Ok(self)
    }

    fn append_text_span<'a>(
        &self, text: &str, classes: impl IntoIterator<Item = &'a str>,
    ) -> JsResult<()> {
        self.append_new_element("span")?.with_classes(classes)?.set_text_content(Some(text));
        Ok(())
    }
}
