//! Raw content records as served by the content repository

use serde::{Deserialize, Serialize};

use super::richtext::{self, Block};

/// One article, exactly as the content API ships it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Stable identifier, doubles as the route slug
    #[serde(default)]
    pub uid: Option<String>,

    /// ISO-8601 publication timestamp, absent for unpublished previews
    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RecordData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecordData {
    pub title: Title,
    pub subtitle: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<Section>,
}

/// A record title is either a plain string or structured rich text,
/// depending on how the field was modeled CMS-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Plain(String),
    Rich(Vec<Block>),
}

impl Title {
    /// Flatten to plain text: strings pass through, rich titles concatenate
    /// their spans in order.
    pub fn as_text(&self) -> String {
        match self {
            Title::Plain(s) => s.clone(),
            Title::Rich(blocks) => richtext::as_text(blocks),
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Title::Plain(String::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Banner {
    pub url: String,
}

/// One body section: a heading plus a rich-text body
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Section {
    pub heading: String,
    pub body: Vec<Block>,
}

/// The page envelope returned by type queries and by pagination-cursor
/// fetches alike. `next_page` is an opaque URL; `None` means the listing
/// is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub results: Vec<ContentRecord>,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_deserializes() {
        let json = r#"{"uid": "my-post", "data": {"title": "Hello"}}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.data.title.as_text(), "Hello");
    }

    #[test]
    fn test_rich_title_deserializes_and_flattens() {
        let json = r#"{
            "uid": "my-post",
            "data": {
                "title": [
                    {"type": "heading1", "text": "Hel", "spans": []},
                    {"type": "heading1", "text": "lo", "spans": []}
                ]
            }
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.data.title.as_text(), "Hello");
    }

    #[test]
    fn test_page_envelope_with_cursor() {
        let json = r#"{
            "results": [{"uid": "a", "data": {}}],
            "next_page": "https://cms.example.com/page/2"
        }"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://cms.example.com/page/2")
        );
    }

    #[test]
    fn test_page_envelope_without_cursor() {
        let json = r#"{"results": [], "next_page": null}"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert!(page.results.is_empty());
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_full_record_shape() {
        let json = r#"{
            "uid": "como-utilizar-hooks",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização",
                "author": "Joseph Oliveira",
                "banner": {"url": "https://images.example.com/banner.png"},
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [{"type": "paragraph", "text": "Lorem ipsum", "spans": []}]
                    }
                ]
            }
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.uid.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(record.data.content.len(), 1);
        assert_eq!(record.data.banner.url, "https://images.example.com/banner.png");
    }
}
