use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network: {0}")]
    Network(#[source] gloo_net::Error),
    #[error("HTTP error status {0}")]
    Status(u16),
    #[error("decoding JSON: {0}")]
    Decode(#[source] gloo_net::Error),
    #[error("parsing JSON: {0}")]
    Parse(String),
}

/// Resolves `relative` against the page location and sets query `params`.
pub fn build_url(relative: &str, params: &[(&str, String)]) -> Result<String, JsValue> {
    let base_url = {
        let window = web_sys::window().expect("must have JS window");
        let document = window.document().expect("must have JS document");
        let location = document.location().expect("must have JS document.location");
        location.href()?
    };
    let url = web_sys::Url::new_with_base(relative, &base_url)?;
    if !params.is_empty() {
        let query = url.search_params();
        for (name, value) in params {
            query.set(name, value);
        }
        url.set_search(
            &query
                .to_string()
                .as_string()
                .expect("internal error: bad URL query stringification"),
        );
    }
    Ok(url
        .to_string()
        .as_string()
        .expect("internal error: bad URL stringification"))
}

fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Status(status))
    }
}

async fn send_checked(url: &str) -> Result<Response, FetchError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(FetchError::Network)?;
    check_status(response.status())?;
    Ok(response)
}

pub async fn try_fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = send_checked(url).await?;
    response.json::<T>().await.map_err(FetchError::Decode)
}

/// Like [`try_fetch_json`], but the browser parses the body, so objects
/// keep the server's key order and numbers stay JS numbers.
pub async fn try_fetch_js_json(url: &str) -> Result<JsValue, FetchError> {
    let response = send_checked(url).await?;
    let parse_error = |error: JsValue| FetchError::Parse(format!("{:?}", error));
    let promise = response.as_raw().json().map_err(parse_error)?;
    JsFuture::from(promise).await.map_err(parse_error)
}

/// GETs `url` and decodes the JSON body. Every failure is logged and
/// turned into `None`.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Option<T> {
    settle(url, try_fetch_json(url).await)
}

pub async fn fetch_js_json(url: &str) -> Option<JsValue> {
    settle(url, try_fetch_js_json(url).await)
}

fn settle<T>(url: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            error!(message = "fetch failed", url, %error);
            None
        }
    }
}
