//! Progressive enhancements for the stream archive pages.
//!
//! The pages work without this module; once loaded it logs archive stats,
//! refuses blank searches, and adds keyboard shortcuts to the player.

use std::cell::RefCell;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod config;
pub mod debounce;
pub mod exports;
pub mod fetch;
pub mod search;
pub mod stats;
pub mod text;
pub mod video;

pub use config::Config;
pub use search::SearchGuard;
pub use video::VideoControls;

/// Listeners that stay attached for the life of the page.
struct Page {
    #[allow(dead_code)]
    search: Option<SearchGuard>,
    #[allow(dead_code)]
    video: Option<VideoControls>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

fn document() -> web_sys::Document {
    let window = web_sys::window().expect("must have JS window");
    window.document().expect("must have JS document")
}

fn attach(document: &web_sys::Document, config: &Config) -> Result<Page, JsValue> {
    let form = document.query_selector(&config.search_form)?;
    let search = SearchGuard::attach(form, &config.query_input)?;

    let video = document
        .get_element_by_id(&config.video_player)
        .and_then(|element| element.dyn_into::<web_sys::HtmlVideoElement>().ok());
    let video = VideoControls::attach(document, video, config.seek_step)?;

    Ok(Page { search, video })
}

fn init() {
    info!("archiver loaded");
    let document = document();
    let config = Config::from_document(&document);

    wasm_bindgen_futures::spawn_local(stats::load_stats(config.clone()));

    match attach(&document, &config) {
        Ok(page) => PAGE.with(|cell| *cell.borrow_mut() = Some(page)),
        Err(error) => {
            error!(message = "attaching page enhancements failed", ?error);
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    tracing_wasm::set_as_global_default();

    let document = document();
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(Box::new(init) as Box<dyn FnOnce()>);
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        // fires once, then the page owns it
        on_ready.forget();
    } else {
        init();
    }
    Ok(())
}
