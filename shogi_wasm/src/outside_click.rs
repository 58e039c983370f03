use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::web_document::web_document;
use crate::web_error_handling::{JsResult, report_js_error};


// Pointer-downs inside elements matching these selectors are not "outside".
const INSIDE_SELECTORS: &str = ".board, .hand-piece-chip";

// Document-level `mousedown` subscription. The listener is removed when the guard is dropped, so
// keeping the guard exactly as long as a hand piece is selected ties the two lifetimes together.
pub struct OutsideClickGuard {
    target: web_sys::EventTarget,
    closure: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl OutsideClickGuard {
    pub fn new(mut on_outside: impl FnMut() -> JsResult<()> + 'static) -> JsResult<Self> {
        let target: web_sys::EventTarget = web_document()?.raw().clone().into();
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
            move |event: web_sys::MouseEvent| {
                if is_inside(&event) {
                    return;
                }
                if let Err(err) = on_outside() {
                    report_js_error("Outside click handler failed", err);
                }
            },
        );
        target.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        Ok(OutsideClickGuard { target, closure })
    }
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        let result = self.target.remove_event_listener_with_callback(
            "mousedown",
            self.closure.as_ref().unchecked_ref(),
        );
        if let Err(err) = result {
            report_js_error("Cannot remove outside click listener", err);
        }
    }
}

fn is_inside(event: &web_sys::MouseEvent) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return false;
    };
    matches!(element.closest(INSIDE_SELECTORS), Ok(Some(_)))
}
