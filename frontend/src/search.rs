use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// A search query that is worth submitting.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` for blank input.
    pub fn from_input(raw: &str) -> Option<SearchQuery> {
        // JS trim() also strips the byte order mark
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() {
            None
        } else {
            Some(SearchQuery(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cancels submission of the search form while its query input is blank.
pub struct SearchGuard {
    form: web_sys::Element,

    // Saved here so the listener lives exactly as long as the guard.
    on_submit: Closure<dyn FnMut(web_sys::Event)>,
}

impl SearchGuard {
    pub fn attach(
        form: Option<web_sys::Element>,
        input_name: &str,
    ) -> Result<Option<SearchGuard>, JsValue> {
        let form = match form {
            None => return Ok(None),
            Some(form) => form,
        };
        let selector = format!("input[name=\"{}\"]", input_name);
        let on_submit = {
            let form = form.clone();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                let input = form
                    .query_selector(&selector)
                    .ok()
                    .flatten()
                    .and_then(|element| element.dyn_into::<web_sys::HtmlInputElement>().ok());
                match input {
                    None => {
                        warn!(message = "search form has no query input", selector = %selector);
                    }
                    Some(input) => {
                        if SearchQuery::from_input(&input.value()).is_none() {
                            debug!("blocked empty search");
                            event.prevent_default();
                        }
                    }
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        Ok(Some(SearchGuard { form, on_submit }))
    }
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        let _ignore = self
            .form
            .remove_event_listener_with_callback("submit", self.on_submit.as_ref().unchecked_ref());
    }
}
