//! Renders one document into a complete HTML page.
//!
//! Pages come either from the configured external template (see
//! [`crate::template`]) or from the built-in generator below. Neither path
//! escapes interpolated values: documents are trusted input and their text
//! lands in the page exactly as written.

use serde_json::{json, Map, Value};

use crate::cache::RenderCache;
use crate::config::{BodyMode, SeoConfig};
use crate::model::Document;
use crate::template::ExternalTemplate;
use crate::Result;

/// Renders documents for one run.
///
/// Holds the run's configuration, the external template (read at most once)
/// and, when caching is enabled, the render cache.
#[derive(Debug)]
pub struct Renderer {
    config: SeoConfig,
    template: Option<ExternalTemplate>,
    cache: Option<RenderCache>,
    today: String,
}

impl Renderer {
    /// Creates a renderer, loading and verifying the external template if one
    /// is configured and present on disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the template location cannot be
    /// inspected or the file cannot be read, and [`crate::Error::Template`] if
    /// it lacks placeholders.
    pub async fn new(config: SeoConfig) -> Result<Self> {
        let template = match config.template() {
            Some(path) => {
                let path = crate::store::absolute(path)?;
                let exists = tokio::fs::try_exists(&path)
                    .await
                    .map_err(|e| crate::Error::io("Cannot access template", path.clone(), e))?;
                if exists {
                    Some(ExternalTemplate::load(&path).await?)
                } else {
                    tracing::warn!(
                        path = %path.display(),
                        "template not found, using the built-in page"
                    );
                    None
                }
            }
            None => None,
        };
        Ok(Self::with_template(config, template))
    }

    /// Creates a renderer around an already verified template.
    pub fn with_template(config: SeoConfig, template: Option<ExternalTemplate>) -> Self {
        let cache = config.cache().then(RenderCache::new);
        Self {
            config,
            template,
            cache,
            today: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// The run configuration.
    pub fn config(&self) -> &SeoConfig {
        &self.config
    }

    /// Renders `doc`, returning the memoized page on a cache hit.
    pub fn render(&self, doc: &Document) -> String {
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(&doc.cache_key(), || self.render_uncached(doc)),
            None => self.render_uncached(doc),
        }
    }

    fn render_uncached(&self, doc: &Document) -> String {
        match &self.template {
            Some(template) => template.render(doc, &self.config, &self.today),
            None => self.render_builtin(doc),
        }
    }

    fn render_builtin(&self, doc: &Document) -> String {
        let config = &self.config;
        let title = &doc.title;
        let description = &doc.description;
        let author = config.author();
        let keywords = doc.keywords_joined();
        let canonical = config.url_for(&doc.path);
        let image = doc.image.as_deref().unwrap_or(config.default_image());
        let language = doc.language.as_deref().unwrap_or(config.language());

        let social = render_social_tags(doc, config, &canonical, image);
        let structured = render_structured_data(doc, config, &canonical, image);
        let analytics = config.ga_id().map(render_analytics).unwrap_or_default();
        let body = match config.body() {
            BodyMode::Redirect => render_redirect_body(title, &canonical),
            BodyMode::Article => render_article_body(doc, &self.today),
        };

        format!(
            r##"<!DOCTYPE html>
<html lang="{language}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="X-UA-Compatible" content="ie=edge">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <meta name="keywords" content="{keywords}">
  <meta name="author" content="{author}">
  <meta name="robots" content="index, follow">
  <link rel="canonical" href="{canonical}">
{social}{structured}{analytics}</head>
<body>
{body}</body>
</html>
"##
        )
    }
}

/// Open Graph and Twitter card tags.
fn render_social_tags(doc: &Document, config: &SeoConfig, canonical: &str, image: &str) -> String {
    let title = &doc.title;
    let description = &doc.description;
    let mut tags = format!(
        r#"  <meta property="og:type" content="website">
  <meta property="og:title" content="{title}">
  <meta property="og:description" content="{description}">
  <meta property="og:image" content="{image}">
  <meta property="og:image:alt" content="{title}">
  <meta property="og:url" content="{canonical}">
"#
    );
    if let Some(site_name) = config.site_name() {
        tags.push_str(&format!(
            "  <meta property=\"og:site_name\" content=\"{site_name}\">\n"
        ));
    }
    tags.push_str(&format!(
        r#"  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="{title}">
  <meta name="twitter:description" content="{description}">
  <meta name="twitter:image" content="{image}">
"#
    ));
    if let Some(handle) = config.twitter_handle() {
        tags.push_str(&format!(
            "  <meta name=\"twitter:site\" content=\"{handle}\">\n  <meta name=\"twitter:creator\" content=\"{handle}\">\n"
        ));
    }
    tags
}

/// JSON-LD block, or an empty string when neither the site nor the document
/// supplies structured data.
///
/// Keys are layered: generated `WebPage` object, then site-wide keys, then
/// the document's own keys.
fn render_structured_data(
    doc: &Document,
    config: &SeoConfig,
    canonical: &str,
    image: &str,
) -> String {
    if config.structured_data().is_none() && doc.structured_data.is_none() {
        return String::new();
    }

    let mut data = Map::new();
    data.insert("@context".into(), json!("https://schema.org"));
    data.insert("@type".into(), json!("WebPage"));
    data.insert("name".into(), json!(doc.title));
    data.insert("description".into(), json!(doc.description));
    data.insert("url".into(), json!(canonical));
    data.insert(
        "author".into(),
        json!({ "@type": "Person", "name": config.author() }),
    );
    data.insert("image".into(), json!(image));
    for layer in [config.structured_data(), doc.structured_data.as_ref()]
        .into_iter()
        .flatten()
    {
        data.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    format!(
        "  <script type=\"application/ld+json\">\n{:#}\n  </script>\n",
        Value::Object(data)
    )
}

/// Google Analytics gtag loader and config call.
fn render_analytics(ga_id: &str) -> String {
    format!(
        r#"  <script async src="https://www.googletagmanager.com/gtag/js?id={ga_id}"></script>
  <script>
    window.dataLayer = window.dataLayer || [];
    function gtag(){{dataLayer.push(arguments);}}
    gtag('js', new Date());
    gtag('config', '{ga_id}');
  </script>
"#
    )
}

/// Body that forwards browsers into the SPA route.
fn render_redirect_body(title: &str, target: &str) -> String {
    format!(
        r#"  <noscript><a href="{target}">{title}</a></noscript>
  <script>
    window.location.href = '{target}';
  </script>
"#
    )
}

/// Body that shows the document itself.
fn render_article_body(doc: &Document, today: &str) -> String {
    let title = &doc.title;
    let description = &doc.description;
    let content = doc.content.as_deref().unwrap_or_default();
    let last_updated = doc.last_updated.as_deref().unwrap_or(today);
    format!(
        r#"  <header>
    <h1>{title}</h1>
    <p>{description}</p>
  </header>
  <main>
    <article>
      {content}
    </article>
  </main>
  <footer>
    <p>Last updated: {last_updated}</p>
  </footer>
"#
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    fn sample() -> Document {
        doc(r#"{"title":"T","description":"D","path":"/p","keywords":["x","y"]}"#)
    }

    fn config() -> SeoConfig {
        SeoConfig::builder()
            .base_url("https://e.com")
            .author("A")
            .default_image("https://e.com/i.jpg")
            .build()
    }

    fn renderer(config: SeoConfig) -> Renderer {
        Renderer::with_template(config, None)
    }

    #[test]
    fn builtin_page_carries_core_metadata() {
        let html = renderer(config()).render(&sample());
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains(r#"<meta name="description" content="D">"#));
        assert!(html.contains(r#"<meta name="keywords" content="x, y">"#));
        assert!(html.contains(r#"<meta name="author" content="A">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://e.com/p">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://e.com/i.jpg">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(!html.contains("twitter:site"));
        assert!(!html.contains("og:site_name"));
    }

    #[test]
    fn missing_keywords_render_empty() {
        let html = renderer(config()).render(&doc(r#"{"title":"T","description":"D","path":"/p"}"#));
        assert!(html.contains(r#"<meta name="keywords" content="">"#));
    }

    #[test]
    fn analytics_only_with_ga_id() {
        let without = renderer(config()).render(&sample());
        assert!(!without.contains("googletagmanager"));

        let with = SeoConfig::builder().ga_id(Some("G-XYZ".to_string())).build();
        let html = renderer(with).render(&sample());
        assert!(html.contains("https://www.googletagmanager.com/gtag/js?id=G-XYZ"));
        assert!(html.contains("gtag('config', 'G-XYZ');"));
    }

    #[test]
    fn document_overrides_image_and_language() {
        let d = doc(
            r#"{"title":"T","description":"D","path":"/p","image":"https://e.com/own.png","language":"fr"}"#,
        );
        let html = renderer(config()).render(&d);
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains(r#"<meta property="og:image" content="https://e.com/own.png">"#));
    }

    #[test]
    fn structured_data_only_when_supplied() {
        let html = renderer(config()).render(&sample());
        assert!(!html.contains("application/ld+json"));

        let mut site = Map::new();
        site.insert("@type".into(), json!("TechArticle"));
        site.insert("publisher".into(), json!("Site"));
        let cfg = SeoConfig::builder()
            .base_url("https://e.com")
            .structured_data(Some(site))
            .build();
        let d = doc(
            r#"{"title":"T","description":"D","path":"/p","structuredData":{"@type":"APIReference"}}"#,
        );
        let html = renderer(cfg).render(&d);
        assert!(html.contains("<script type=\"application/ld+json\">"));
        assert!(html.contains(r#""@type": "APIReference""#));
        assert!(html.contains(r#""publisher": "Site""#));
        assert!(html.contains(r#""url": "https://e.com/p""#));
        assert!(!html.contains("TechArticle"));
    }

    #[test]
    fn redirect_body_targets_spa_route() {
        let html = renderer(config()).render(&sample());
        assert!(html.contains("window.location.href = 'https://e.com/p';"));
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn article_body_shows_content() {
        let cfg = SeoConfig::builder().body(BodyMode::Article).build();
        let d = doc(
            r#"{"title":"T","description":"D","path":"/p","content":"<p>Body</p>","lastUpdated":"2024-05-06"}"#,
        );
        let html = renderer(cfg).render(&d);
        assert!(html.contains("<h1>T</h1>"));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("Last updated: 2024-05-06"));
        assert!(!html.contains("window.location"));
    }

    #[test]
    fn optional_social_tags() {
        let cfg = SeoConfig::builder()
            .twitter_handle(Some("@site".to_string()))
            .site_name(Some("Docs".to_string()))
            .build();
        let html = renderer(cfg).render(&sample());
        assert!(html.contains(r#"<meta name="twitter:site" content="@site">"#));
        assert!(html.contains(r#"<meta name="twitter:creator" content="@site">"#));
        assert!(html.contains(r#"<meta property="og:site_name" content="Docs">"#));
    }

    #[test]
    fn values_are_not_escaped() {
        let d = doc(r#"{"title":"A &amp; B <i>","description":"\"q\"","path":"/p"}"#);
        let html = renderer(config()).render(&d);
        assert!(html.contains("<title>A &amp; B <i></title>"));
        assert!(html.contains(r#"content=""q"""#));
    }

    #[test]
    fn cached_and_uncached_output_match() {
        let cached = renderer(config());
        let uncached = renderer(
            SeoConfig::builder()
                .base_url("https://e.com")
                .author("A")
                .default_image("https://e.com/i.jpg")
                .cache(false)
                .build(),
        );
        let first = cached.render(&sample());
        assert_eq!(first, cached.render(&sample()));
        assert_eq!(first, uncached.render(&sample()));
    }

    #[tokio::test]
    async fn template_is_read_once_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(
            &path,
            "<title>{{title}}</title>{{description}}{{content}}{{keywords}}{{baseUrl}}{{path}}{{lastUpdated}}",
        )
        .unwrap();
        let cfg = SeoConfig::builder().template(Some(path.clone())).build();
        let renderer = Renderer::new(cfg).await.unwrap();

        let first = renderer.render(&sample());
        std::fs::remove_file(&path).unwrap();
        let second = renderer.render(&sample());
        assert_eq!(first, second);
        assert!(first.starts_with("<title>T</title>D"));
    }

    #[tokio::test]
    async fn invalid_template_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "{{title}}{{description}}{{content}}{{keywords}}{{path}}").unwrap();
        let cfg = SeoConfig::builder().template(Some(path)).build();
        let err = Renderer::new(cfg).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid template: missing required variables: baseUrl, lastUpdated"
        );
    }

    #[tokio::test]
    async fn absent_template_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SeoConfig::builder()
            .template(Some(dir.path().join("missing.html")))
            .build();
        let html = Renderer::new(cfg).await.unwrap().render(&sample());
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn inaccessible_template_location_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("taken"), "file").unwrap();
        let cfg = SeoConfig::builder()
            .template(Some(dir.path().join("taken").join("template.html")))
            .build();
        let err = Renderer::new(cfg).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
        assert!(err.to_string().starts_with("Cannot access template: "));
    }
}
