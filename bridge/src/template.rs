//! User-supplied HTML templates with literal `{{name}}` placeholders.

use std::path::Path;

use crate::config::SeoConfig;
use crate::model::Document;
use crate::{Error, Result};

/// Placeholders every external template must contain, in canonical order.
pub const PLACEHOLDERS: [&str; 7] = [
    "title",
    "description",
    "content",
    "keywords",
    "path",
    "baseUrl",
    "lastUpdated",
];

/// A verified external template.
#[derive(Debug, Clone)]
pub struct ExternalTemplate {
    source: String,
}

impl ExternalTemplate {
    /// Reads and verifies the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Template`] if placeholders are missing.
    pub async fn load(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io("Cannot read template", path.to_path_buf(), e))?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "template loaded");
        Self::parse(source)
    }

    /// Verifies that `source` contains every placeholder at least once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] listing every missing placeholder.
    pub fn parse(source: String) -> Result<Self> {
        let missing: Vec<&'static str> = PLACEHOLDERS
            .iter()
            .copied()
            .filter(|name| !source.contains(&token(name)))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Template { missing });
        }
        Ok(Self { source })
    }

    /// Substitutes every placeholder occurrence with the document's values.
    ///
    /// Values are inserted verbatim; unknown `{{...}}` tokens stay in place.
    pub fn render(&self, doc: &Document, config: &SeoConfig, today: &str) -> String {
        let keywords = doc.keywords_joined();
        let values: [(&str, &str); 7] = [
            ("title", doc.title.as_str()),
            ("description", doc.description.as_str()),
            ("content", doc.content.as_deref().unwrap_or_default()),
            ("keywords", keywords.as_str()),
            ("path", doc.path.as_str()),
            ("baseUrl", config.base_url()),
            ("lastUpdated", doc.last_updated.as_deref().unwrap_or(today)),
        ];
        substitute(&self.source, &values)
    }
}

fn token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Single left-to-right pass, so inserted values are never rescanned.
fn substitute(source: &str, values: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(source.len());
    let mut remaining = source;

    while let Some(start) = remaining.find("{{") {
        result.push_str(&remaining[..start]);
        remaining = &remaining[start..];

        let replaced = values.iter().find_map(|(name, value)| {
            let tok = token(name);
            remaining.starts_with(&tok).then(|| (tok.len(), *value))
        });
        match replaced {
            Some((len, value)) => {
                result.push_str(value);
                remaining = &remaining[len..];
            }
            None => {
                result.push_str("{{");
                remaining = &remaining[2..];
            }
        }
    }

    result.push_str(remaining);
    result
}
