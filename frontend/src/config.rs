use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Page wiring, overridable from an inline
/// `<script type="application/ron" id="archiver-config">` element.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename = "ArchiverConfig", default)]
pub struct Config {
    pub stats_path: String,
    pub stats_per_page: u32,
    pub search_form: String,
    pub query_input: String,
    pub video_player: String,
    /// Seconds moved by the arrow keys.
    pub seek_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_path: archiver_protocol::StreamsQuery::PATH.to_string(),
            stats_per_page: 1,
            search_form: ".search-form".to_string(),
            query_input: "q".to_string(),
            video_player: "video-player".to_string(),
            seek_step: 5.0,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error parsing: {source}")]
    Parse {
        #[from]
        source: ron::Error,
    },
}

impl Config {
    pub const ELEMENT_ID: &'static str = "archiver-config";

    pub fn parse(text: &str) -> Result<Config, ConfigError> {
        let config: Config = ron::de::from_str(text)?;
        Ok(config)
    }

    /// Never fails; a broken config block is logged and ignored.
    pub fn from_document(document: &web_sys::Document) -> Config {
        let text = match document.get_element_by_id(Self::ELEMENT_ID) {
            None => return Config::default(),
            Some(element) => element.text_content().unwrap_or_default(),
        };
        match Config::parse(&text) {
            Ok(config) => {
                debug!(message = "loaded page config", ?config);
                config
            }
            Err(error) => {
                warn!(message = "ignoring page config", %error);
                Config::default()
            }
        }
    }
}
