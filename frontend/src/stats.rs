use crate::config::Config;
use crate::fetch::build_url;
use archiver_protocol as proto;
use gloo_net::http::Request;
use serde::Deserialize;
use tracing::{error, info};

fn stats_url(config: &Config) -> Result<String, wasm_bindgen::JsValue> {
    let query = proto::StreamsQuery {
        page: None,
        per_page: Some(config.stats_per_page),
    };
    build_url(&config.stats_path, &query.params())
}

/// Fetches one page of archived streams and logs it. Failures are logged,
/// never returned.
pub async fn load_stats(config: Config) {
    let url = match stats_url(&config) {
        Ok(url) => url,
        Err(error) => {
            error!(message = "bad stats URL", ?error);
            return;
        }
    };
    let result = match Request::get(&url).send().await {
        Ok(response) => response.json::<serde_json::Value>().await,
        Err(error) => Err(error),
    };
    report(result);
}

fn report(result: Result<serde_json::Value, gloo_net::Error>) {
    match result {
        Err(error) => {
            error!(message = "loading stats failed", ?error);
        }
        Ok(data) => {
            info!(message = "stats loaded", %data);
            if let Some(page) = archive_totals(&data) {
                info!(
                    message = "archive totals",
                    total_streams = page.total_streams,
                    total_messages = page.total_messages,
                    total_pages = page.total_pages
                );
            }
        }
    }
}

/// The body as a known archive page, if it is one.
fn archive_totals(data: &serde_json::Value) -> Option<proto::StreamsPage> {
    proto::StreamsPage::deserialize(data).ok()
}
