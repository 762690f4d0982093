use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a novel as the API reports it: either a JSON string or a
/// JSON integer. Persisted ids are always strings, so comparisons go through
/// [`NovelId::matches`], which compares string forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NovelId {
    Number(i64),
    Text(String),
}

impl NovelId {
    /// String-coerced equality against a persisted or user-supplied id.
    pub fn matches(&self, other: &str) -> bool {
        match self {
            Self::Text(s) => s == other,
            Self::Number(n) => n.to_string() == other,
        }
    }

    /// String-coerced equality between two ids of possibly different kinds.
    pub fn same_as(&self, other: &NovelId) -> bool {
        self.matches(&other.to_string())
    }
}

impl fmt::Display for NovelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NovelId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for NovelId {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<String> for NovelId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for NovelId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A novel project. Only `id` and `title` are interpreted; the remaining
/// fields are carried through untouched whatever their JSON shape, including
/// ones this client does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    pub id: NovelId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<serde_json::Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Novel {
    pub fn new(id: impl Into<NovelId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            cover: None,
            updated_at: None,
            outline: None,
            kind: None,
            extra: serde_json::Map::new(),
        }
    }

    /// `description` when the server sent it as a string.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref().and_then(serde_json::Value::as_str)
    }

    /// `type` when the server sent it as a string.
    pub fn kind_text(&self) -> Option<&str> {
        self.kind.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Body of `POST /novels`. `id` is provisional; the server's answer wins.
#[derive(Debug, Clone, Serialize)]
pub struct CreateNovel {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateNovelResponse {
    pub novel: Novel,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn numeric_and_text_ids_compare_as_strings() {
        assert!(NovelId::Number(42).matches("42"));
        assert!(NovelId::from("42").matches("42"));
        assert!(!NovelId::Number(42).matches("042"));
        assert!(NovelId::Number(7).same_as(&NovelId::from("7")));
        assert_ne!(NovelId::Number(7), NovelId::from("7"));
    }

    #[test]
    fn deserializes_mixed_id_kinds() {
        let list: Vec<Novel> = serde_json::from_value(json!([
            {"id": 42, "title": "A"},
            {"id": "b-7", "title": "B", "type": "short", "description": null}
        ]))
        .unwrap();
        assert_eq!(list[0].id, NovelId::Number(42));
        assert_eq!(list[1].id, NovelId::Text("b-7".into()));
        assert_eq!(list[1].kind_text(), Some("short"));
        assert!(list[1].description.is_none());
    }

    #[test]
    fn opaque_fields_accept_any_json_shape() {
        let raw = json!({
            "id": 3,
            "title": "C",
            "updated_at": 1_700_000_000,
            "outline": {"acts": 3},
            "type": ["serial"],
            "description": "D"
        });
        let novel: Novel = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(novel.updated_at, Some(json!(1_700_000_000)));
        assert_eq!(novel.outline, Some(json!({"acts": 3})));
        assert_eq!(novel.kind_text(), None);
        assert_eq!(novel.description_text(), Some("D"));
        assert_eq!(serde_json::to_value(&novel).unwrap(), raw);
    }

    #[test]
    fn unknown_fields_survive_reserialization() {
        let raw = json!({"id": "1", "title": "T", "cover": "c.png", "word_count": 1200});
        let novel: Novel = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(novel.extra.get("word_count"), Some(&json!(1200)));
        assert_eq!(serde_json::to_value(&novel).unwrap(), raw);
    }

    #[test]
    fn create_body_omits_missing_type() {
        let body = CreateNovel {
            id: "1700000000000".into(),
            title: "T".into(),
            description: "D".into(),
            kind: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"id": "1700000000000", "title": "T", "description": "D"})
        );
    }
}
