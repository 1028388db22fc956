//! `seo-spa-bridge` — Generates static SEO pages for a single-page application.
//!
//! **Outputs (`<output>/`):**
//! - `<path>/index.html` — One page per document (or `page-<n>.html` with `--flat`)
//! - `sitemap.xml` — Sitemap for crawlers (disable with `--no-sitemap`)
//! - `robots.txt` — Allow-all robots file (disable with `--no-robots`)
//!
//! **Usage:**
//! ```
//! seo-spa-bridge --data <path> [--output <path>] [--base-url <url>] [--author <name>]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use seo_spa_bridge::{config, generate, BodyMode, OutputLayout, SeoConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate SEO-friendly static HTML pages for single-page applications.
#[derive(Parser)]
#[command(
    name = "seo-spa-bridge",
    version,
    about = "Generate SEO-friendly static HTML pages for single-page applications"
)]
struct Args {
    /// Path to the docs JSON file (array or `{ "items": [...] }`).
    #[arg(short, long)]
    data: PathBuf,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "public/link")]
    output: PathBuf,

    /// Base URL of the site.
    #[arg(short, long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Author name.
    #[arg(short, long, default_value = config::DEFAULT_AUTHOR)]
    author: String,

    /// Default image URL.
    #[arg(short, long, default_value = config::DEFAULT_IMAGE)]
    image: String,

    /// Google Analytics ID.
    #[arg(short, long)]
    ga_id: Option<String>,

    /// Default language code.
    #[arg(short, long, default_value = config::DEFAULT_LANGUAGE)]
    language: String,

    /// Path to an HTML template with `{{title}}`-style placeholders.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Path to a JSON object merged into every page's structured data.
    #[arg(long)]
    structured_data: Option<PathBuf>,

    /// Twitter handle for `twitter:site` and `twitter:creator`.
    #[arg(long)]
    twitter: Option<String>,

    /// Open Graph site name.
    #[arg(long)]
    site_name: Option<String>,

    /// What the page body contains.
    #[arg(long, value_enum, default_value_t = Body::Redirect)]
    body: Body,

    /// Write `page-<n>.html` files instead of `<path>/index.html`.
    #[arg(long)]
    flat: bool,

    /// Skip `robots.txt`.
    #[arg(long)]
    no_robots: bool,

    /// Skip `sitemap.xml`.
    #[arg(long)]
    no_sitemap: bool,

    /// Render every document even if it was rendered before in this run.
    #[arg(long)]
    no_cache: bool,

    /// Render and write pages one at a time, in input order.
    #[arg(long)]
    no_parallel: bool,
}

/// Page body strategy.
#[derive(Clone, Copy, ValueEnum)]
enum Body {
    /// Forward browsers to the SPA route.
    Redirect,
    /// Show title, description and content.
    Article,
}

impl From<Body> for BodyMode {
    fn from(body: Body) -> Self {
        match body {
            Body::Redirect => BodyMode::Redirect,
            Body::Article => BodyMode::Article,
        }
    }
}

impl Args {
    async fn into_config(self) -> Result<SeoConfig> {
        let structured_data = match self.structured_data.as_deref() {
            Some(path) => Some(read_structured_data(path).await?),
            None => None,
        };
        let layout = if self.flat {
            OutputLayout::Flat
        } else {
            OutputLayout::Nested
        };
        Ok(SeoConfig::builder()
            .base_url(self.base_url)
            .author(self.author)
            .default_image(self.image)
            .language(self.language)
            .ga_id(self.ga_id)
            .template(self.template)
            .structured_data(structured_data)
            .twitter_handle(self.twitter)
            .site_name(self.site_name)
            .body(self.body.into())
            .layout(layout)
            .robots(!self.no_robots)
            .sitemap(!self.no_sitemap)
            .cache(!self.no_cache)
            .parallel(!self.no_parallel)
            .build())
    }
}

/// Reads a JSON object of site-wide structured data.
async fn read_structured_data(path: &Path) -> Result<Map<String, Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read structured data: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Structured data must be a JSON object: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let data = args.data.clone();
    let output = args.output.clone();
    let config = args.into_config().await?;
    let base_url = config.base_url().to_string();
    let ga_id = config.ga_id().map(str::to_string);

    let report = generate(&data, &output, config)
        .await
        .context("SEO page generation failed")?;

    println!("SEO pages generated successfully.");
    println!("  Output: {}", report.root.display());
    println!("  Pages: {}", report.pages.len());
    println!("  Base URL: {base_url}");
    if let Some(ga_id) = ga_id {
        println!("  Google Analytics ID: {ga_id}");
    }
    if let Some(sitemap) = &report.sitemap {
        println!("  Sitemap: {}", sitemap.display());
    }
    if let Some(robots) = &report.robots {
        println!("  Robots: {}", robots.display());
    }

    Ok(())
}
