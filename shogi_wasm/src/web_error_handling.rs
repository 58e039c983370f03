use shogi_client::display;
use wasm_bindgen::prelude::*;

use crate::STATUS_LINES_ID;
use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;


pub type JsResult<T> = Result<T, JsValue>;

#[wasm_bindgen]
pub fn set_panic_hook() {
    use std::panic;
    use std::sync::Once;
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(|| {
        panic::set_hook(Box::new(|panic_info| {
            // Full message and stack go to the developer console.
            console_error_panic_hook::hook(panic_info);
            // The board is dead after a panic; say so instead of leaving it frozen.
            let _ = show_internal_error();
        }));
    });
}

pub fn show_internal_error() -> JsResult<()> {
    let lines = web_document()?.existing_element(STATUS_LINES_ID)?;
    lines.remove_all_children();
    lines
        .append_new_element("p")?
        .with_classes(display::StatusKind::Error.css_classes().iter().copied())?
        .set_text_content(Some(display::INTERNAL_ERROR));
    Ok(())
}

#[wasm_bindgen(getter_with_clone)]
pub struct RustError {
    pub message: String,
}

#[macro_export]
macro_rules! rust_error {
    ($($arg:tt)*) => {
        wasm_bindgen::JsValue::from(
            $crate::web_error_handling::RustError{ message: format!($($arg)*) }
        )
    };
}

// Event listeners cannot propagate errors anywhere, so they end up here.
pub fn report_js_error(context: &str, err: JsValue) { log::error!("{}: {:?}", context, err); }
