use serde::{Deserialize, Serialize};

use crate::document::RichText;
use crate::utils;

const DEFAULT_SCHEMA: &str = "slate";
const DEFAULT_VERSION: u32 = 1;

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

/// A versioned wrapper for persisting rich text documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextValue {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_version")]
    pub version: u32,
    pub document: RichText,
}

impl RichTextValue {
    pub fn from_document(document: RichText) -> Self {
        Self {
            schema: default_schema(),
            version: default_version(),
            document,
        }
    }

    pub fn into_document(self) -> RichText {
        self.document
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Accepts a wrapped value, a bare node array, or falls back to treating
    /// `content` as plain text. The flag is `true` when the fallback was used.
    pub fn parse_lenient(content: &str) -> (Self, bool) {
        if let Ok(value) = Self::from_json_str(content) {
            return (value, false);
        }

        if let Ok(nodes) = serde_json::from_str::<RichText>(content) {
            if !nodes.is_empty() {
                return (Self::from_document(nodes), false);
            }
        }

        (Self::from_document(utils::from_string(content)), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;

    #[test]
    fn missing_schema_and_version_get_defaults() {
        let value =
            RichTextValue::from_json_str(r#"{"document":[{"type":"paragraph","children":[{"text":"x"}]}]}"#)
                .expect("parse");
        assert_eq!(value.schema, "slate");
        assert_eq!(value.version, 1);
        assert_eq!(value.document, vec![Node::paragraph("x")]);
    }

    #[test]
    fn lenient_parse_accepts_bare_arrays_and_plain_text() {
        let (value, fallback) =
            RichTextValue::parse_lenient(r#"[{"type":"paragraph","children":[{"text":"hi"}]}]"#);
        assert!(!fallback);
        assert_eq!(value.into_document(), vec![Node::paragraph("hi")]);

        let (value, fallback) = RichTextValue::parse_lenient("just words");
        assert!(fallback);
        assert_eq!(value.into_document(), vec![Node::paragraph("just words")]);
    }
}
