//! Data model types for the page generator.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One page description from the input data file.
///
/// Only `title`, `description` and `path` are required; they are checked by
/// [`Document::validate`] rather than by serde so that a missing or `null`
/// field yields a message naming it instead of a generic parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Page title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Meta description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// SPA route, e.g. `/docs/install`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
    /// Visible body content for the article body mode and `{{content}}`.
    #[serde(default)]
    pub content: Option<String>,
    /// Keywords, joined with `", "` in the output.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Overrides the configured default image.
    #[serde(default)]
    pub image: Option<String>,
    /// Overrides the configured language code.
    #[serde(default)]
    pub language: Option<String>,
    /// Merged on top of the generated JSON-LD object.
    #[serde(default)]
    pub structured_data: Option<Map<String, Value>>,
    /// Last modification date; today when absent.
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Unrecognized keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Checks the required fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the first empty field.
    pub fn validate(&self, index: usize) -> crate::Result<()> {
        let required = [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Path", &self.path),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(crate::Error::Validation { index, field });
            }
        }
        Ok(())
    }

    /// Keywords joined with `", "`, or an empty string.
    pub fn keywords_joined(&self) -> String {
        self.keywords
            .as_deref()
            .map(|k| k.join(", "))
            .unwrap_or_default()
    }

    /// Key under which this document's rendered HTML is memoized.
    pub fn cache_key(&self) -> String {
        format!("{}::{}", self.path, self.title)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A rendered page awaiting materialization.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Position of the source document in the input array.
    pub index: usize,
    /// The source document's path.
    pub path: String,
    /// Complete HTML document.
    pub html: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn camel_case_fields_and_extras() {
        let d = doc(
            r#"{"title":"T","description":"D","path":"/p","lastUpdated":"2024-01-02",
                "structuredData":{"@type":"Article"},"category":"guides"}"#,
        );
        assert_eq!(d.last_updated.as_deref(), Some("2024-01-02"));
        assert_eq!(
            d.structured_data.unwrap().get("@type"),
            Some(&Value::from("Article"))
        );
        assert_eq!(d.extra.get("category"), Some(&Value::from("guides")));
    }

    #[test]
    fn validation_reports_first_missing_field() {
        let d = doc(r#"{"description":"D"}"#);
        let err = d.validate(0).unwrap_err();
        assert!(err.to_string().contains("Title is required"));

        let d = doc(r#"{"title":"T","description":"D"}"#);
        let err = d.validate(4).unwrap_err();
        assert_eq!(err.to_string(), "Document 4: Path is required in document data");
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let d = doc(r#"{"title":null,"description":"D","path":"/p"}"#);
        assert_eq!(d.title, "");
        let err = d.validate(0).unwrap_err();
        assert_eq!(err.to_string(), "Document 0: Title is required in document data");
    }

    #[test]
    fn keywords_join() {
        assert_eq!(doc(r#"{"keywords":["a","b"]}"#).keywords_joined(), "a, b");
        assert_eq!(doc("{}").keywords_joined(), "");
    }
}
