//! Immutable per-run configuration and its builder.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Default site root used when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "https://your-domain.com";
/// Default author meta value.
pub const DEFAULT_AUTHOR: &str = "Your Name";
/// Default Open Graph / Twitter image.
pub const DEFAULT_IMAGE: &str = "https://your-domain.com/images/banner.jpg";
/// Default `<html lang>` value.
pub const DEFAULT_LANGUAGE: &str = "en";

/// What the `<body>` of a built-in page contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyMode {
    /// A script that forwards browsers to `base_url + path`.
    #[default]
    Redirect,
    /// Visible title, description, content and last-updated footer.
    Article,
}

/// Where each page file lands below the output root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// `<root>/<path>/index.html`.
    #[default]
    Nested,
    /// `<root>/page-<index>.html`.
    Flat,
}

/// Configuration for one generation run.
///
/// Built once with [`SeoConfig::builder`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SeoConfig {
    base_url: String,
    author: String,
    default_image: String,
    language: String,
    ga_id: Option<String>,
    template: Option<PathBuf>,
    structured_data: Option<Map<String, Value>>,
    twitter_handle: Option<String>,
    site_name: Option<String>,
    body: BodyMode,
    layout: OutputLayout,
    robots: bool,
    sitemap: bool,
    cache: bool,
    parallel: bool,
}

impl SeoConfig {
    /// Starts a builder with every field at its default.
    pub fn builder() -> SeoConfigBuilder {
        SeoConfigBuilder::default()
    }

    /// Checks the fields every page depends on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL or author is empty.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("Base URL is required".to_string()));
        }
        if self.author.is_empty() {
            return Err(Error::Config("Author is required".to_string()));
        }
        Ok(())
    }

    /// Site root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Author meta value.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Image used when a document has none.
    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Language used when a document has none.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Google Analytics measurement id.
    pub fn ga_id(&self) -> Option<&str> {
        self.ga_id.as_deref()
    }

    /// External template path.
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Site-wide JSON-LD keys.
    pub fn structured_data(&self) -> Option<&Map<String, Value>> {
        self.structured_data.as_ref()
    }

    /// Twitter handle for `twitter:site` / `twitter:creator`.
    pub fn twitter_handle(&self) -> Option<&str> {
        self.twitter_handle.as_deref()
    }

    /// `og:site_name` value.
    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    /// Body strategy for built-in pages.
    pub fn body(&self) -> BodyMode {
        self.body
    }

    /// Output file layout.
    pub fn layout(&self) -> OutputLayout {
        self.layout
    }

    /// Whether `robots.txt` is written.
    pub fn robots(&self) -> bool {
        self.robots
    }

    /// Whether `sitemap.xml` is written.
    pub fn sitemap(&self) -> bool {
        self.sitemap
    }

    /// Whether rendered pages are memoized for the run.
    pub fn cache(&self) -> bool {
        self.cache
    }

    /// Whether pages are rendered and written concurrently.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Absolute URL of a document path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for SeoConfig {
    fn default() -> Self {
        SeoConfigBuilder::default().build()
    }
}

/// Field-by-field builder for [`SeoConfig`].
#[derive(Debug, Clone, Default)]
pub struct SeoConfigBuilder {
    base_url: Option<String>,
    author: Option<String>,
    default_image: Option<String>,
    language: Option<String>,
    ga_id: Option<String>,
    template: Option<PathBuf>,
    structured_data: Option<Map<String, Value>>,
    twitter_handle: Option<String>,
    site_name: Option<String>,
    body: Option<BodyMode>,
    layout: Option<OutputLayout>,
    robots: Option<bool>,
    sitemap: Option<bool>,
    cache: Option<bool>,
    parallel: Option<bool>,
}

impl SeoConfigBuilder {
    /// Site root; a trailing slash is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Author meta value.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Default image.
    pub fn default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = Some(image.into());
        self
    }

    /// Default language code.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Google Analytics id.
    pub fn ga_id(mut self, id: Option<String>) -> Self {
        self.ga_id = id;
        self
    }

    /// External template file.
    pub fn template(mut self, path: Option<PathBuf>) -> Self {
        self.template = path;
        self
    }

    /// Site-wide JSON-LD keys.
    pub fn structured_data(mut self, data: Option<Map<String, Value>>) -> Self {
        self.structured_data = data;
        self
    }

    /// Twitter handle.
    pub fn twitter_handle(mut self, handle: Option<String>) -> Self {
        self.twitter_handle = handle;
        self
    }

    /// Open Graph site name.
    pub fn site_name(mut self, name: Option<String>) -> Self {
        self.site_name = name;
        self
    }

    /// Body strategy.
    pub fn body(mut self, body: BodyMode) -> Self {
        self.body = Some(body);
        self
    }

    /// Output layout.
    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Toggle `robots.txt`.
    pub fn robots(mut self, enabled: bool) -> Self {
        self.robots = Some(enabled);
        self
    }

    /// Toggle `sitemap.xml`.
    pub fn sitemap(mut self, enabled: bool) -> Self {
        self.sitemap = Some(enabled);
        self
    }

    /// Toggle the render cache.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = Some(enabled);
        self
    }

    /// Toggle parallel rendering and writing.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = Some(enabled);
        self
    }

    /// Applies defaults to every unset field.
    pub fn build(self) -> SeoConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        SeoConfig {
            base_url,
            author: self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            default_image: self
                .default_image
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            language: self
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            ga_id: self.ga_id.filter(|id| !id.is_empty()),
            template: self.template,
            structured_data: self.structured_data,
            twitter_handle: self.twitter_handle.filter(|h| !h.is_empty()),
            site_name: self.site_name.filter(|n| !n.is_empty()),
            body: self.body.unwrap_or_default(),
            layout: self.layout.unwrap_or_default(),
            robots: self.robots.unwrap_or(true),
            sitemap: self.sitemap.unwrap_or(true),
            cache: self.cache.unwrap_or(true),
            parallel: self.parallel.unwrap_or(true),
        }
    }
}
