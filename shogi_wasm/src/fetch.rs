use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use shogi_client::{HttpReply, RemoteRequest};

use crate::web_document::web_window;
use crate::web_error_handling::JsResult;


// Performs the call. `Err` means the transport failed; any HTTP status is `Ok`.
pub async fn perform(api_base: &str, request: &RemoteRequest) -> Result<HttpReply, String> {
    try_perform(api_base, request).await.map_err(|err| format!("{:?}", err))
}

async fn try_perform(api_base: &str, request: &RemoteRequest) -> JsResult<HttpReply> {
    let init = web_sys::RequestInit::new();
    init.set_method(request.method().as_str());
    if let Some(body) = request.body() {
        let headers = web_sys::Headers::new()?;
        headers.set("Content-Type", "application/json")?;
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
    }
    let url = request_url(api_base, request.path());
    let fetch_request = web_sys::Request::new_with_str_and_init(&url, &init)?;
    let response: web_sys::Response =
        JsFuture::from(web_window()?.fetch_with_request(&fetch_request)).await?.dyn_into()?;
    let text = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    Ok(HttpReply::from_text(response.status(), &text))
}

pub fn request_url(api_base: &str, path: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), path)
}
