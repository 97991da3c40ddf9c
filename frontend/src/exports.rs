//! Helpers exported to other scripts on the page.
//!
//! ```js
//! import init, { formatTime, fetchJSON, escapeHTML, debounce } from "./archiver_frontend.js";
//! ```

use crate::debounce::{debounce, BrowserTimer};
use crate::{fetch, text};
use std::time::Duration;
use tracing::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;

/// Same range `setTimeout` accepts: negative and NaN mean no delay.
fn wait_from_js(wait_ms: f64) -> Duration {
    Duration::from_millis(wait_ms.max(0.0).min(f64::from(i32::MAX)) as u64)
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(seconds: f64) -> String {
    text::format_time(seconds)
}

#[wasm_bindgen(js_name = escapeHTML)]
pub fn escape_html(text: &str) -> String {
    text::escape_html(text)
}

/// Resolves to the parsed body, or `null` on any failure.
#[wasm_bindgen(js_name = fetchJSON)]
pub fn fetch_json(url: String) -> js_sys::Promise {
    future_to_promise(async move {
        let value = fetch::fetch_js_json(&url).await;
        Ok(value.unwrap_or(JsValue::NULL))
    })
}

/// Returns a function that calls `func` with its latest arguments once
/// `wait_ms` have passed without another call.
#[wasm_bindgen(js_name = debounce)]
pub fn debounce_js(func: js_sys::Function, wait_ms: f64) -> Result<js_sys::Function, JsValue> {
    let debounced = debounce(
        BrowserTimer,
        wait_from_js(wait_ms),
        move |args: js_sys::Array| {
            if let Err(error) = func.apply(&JsValue::UNDEFINED, &args) {
                error!(message = "debounced function threw", ?error);
            }
        },
    );
    let collect = Closure::wrap(
        Box::new(move |args: js_sys::Array| debounced.call(args)) as Box<dyn FnMut(js_sys::Array)>
    );
    // wasm-bindgen closures have a fixed arity; gather rest arguments on the JS side.
    let variadic =
        js_sys::Function::new_with_args("inner", "return function(...args) { inner(args); };");
    let wrapper = variadic.call1(&JsValue::UNDEFINED, &collect.into_js_value())?;
    Ok(wrapper.unchecked_into())
}
