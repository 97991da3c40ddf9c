use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct StreamSummary {
    pub id: u64,
    pub title: String,
    pub channel: String,
    /// ISO 8601, as formatted by the archive.
    pub date: String,
    pub duration: Option<String>,
    pub messages: u64,
    pub is_downloaded: bool,
}

/// One page of `/api/streams`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamsPage {
    pub streams: Vec<StreamSummary>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_streams: u64,
    pub total_messages: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StreamsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl StreamsQuery {
    pub const PATH: &'static str = "/api/streams";

    // Unset fields are left to the archive's defaults.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_skip_unset() {
        let query = StreamsQuery {
            page: None,
            per_page: Some(1),
        };
        assert_eq!(query.params(), vec![("per_page", "1".to_string())]);
        assert!(StreamsQuery::default().params().is_empty());
    }

    #[test]
    fn page_from_archive() {
        let body = r#"{
            "streams": [{
                "id": 7,
                "title": "late night",
                "channel": "goodoq",
                "date": "2025-01-02T03:04:05",
                "duration": null,
                "messages": 120,
                "is_downloaded": true
            }],
            "total_pages": 3,
            "current_page": 1,
            "total_streams": 3,
            "total_messages": 360
        }"#;
        let page: StreamsPage = serde_json::from_str(body).expect("must parse");
        assert_eq!(page.total_streams, 3);
        assert_eq!(page.streams[0].title, "late night");
        assert!(page.streams[0].duration.is_none());
    }
}
