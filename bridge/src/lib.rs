//! Static SEO landing pages for single-page applications.
//!
//! Reads a JSON data file describing each SPA route and writes one crawlable
//! HTML page per route (title, description, Open Graph and Twitter tags,
//! canonical URL, optional JSON-LD and Google Analytics), plus `sitemap.xml`
//! and `robots.txt`.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use seo_spa_bridge::{generate, SeoConfig};
//!
//! # async fn run() -> seo_spa_bridge::Result<()> {
//! let config = SeoConfig::builder()
//!     .base_url("https://example.com")
//!     .author("Docs Team")
//!     .build();
//! generate(Path::new("docs.json"), Path::new("public/link"), config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Output Structure
//!
//! ```text
//! public/link/
//!   <path>/index.html   (one per document, or page-<n>.html with the flat layout)
//!   sitemap.xml
//!   robots.txt
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod renderer;
pub mod sitemap;
pub mod store;
pub mod template;
pub mod writer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use config::{BodyMode, OutputLayout, SeoConfig, SeoConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use model::{Document, RenderedPage};

use executor::BatchExecutor;
use renderer::Renderer;
use writer::SiteWriter;

/// Phase of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing started yet.
    Idle,
    /// Checking configuration and paths.
    Validating,
    /// Reading and validating the data file.
    Loading,
    /// Loading the template and rendering every document.
    Rendering,
    /// Writing pages, sitemap and robots file.
    Writing,
    /// Finished successfully.
    Done,
    /// Aborted by an error.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Loading => "loading",
            Self::Rendering => "rendering",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Files produced by a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Absolute output root.
    pub root: PathBuf,
    /// One file per document, in input order.
    pub pages: Vec<PathBuf>,
    /// `sitemap.xml`, if enabled.
    pub sitemap: Option<PathBuf>,
    /// `robots.txt`, if enabled.
    pub robots: Option<PathBuf>,
}

/// Generates every page for the documents in `data_path` under `output_path`.
///
/// Stages run strictly in order (validate, load, render, write) and the first
/// failure aborts the run. Files written before a failure stay on disk.
///
/// # Errors
///
/// Returns the first [`Error`] raised by any stage.
pub async fn generate(
    data_path: &Path,
    output_path: &Path,
    config: SeoConfig,
) -> Result<GenerationReport> {
    let mut stage = Stage::Idle;
    let result = run(data_path, output_path, config, &mut stage).await;
    match &result {
        Ok(report) => {
            tracing::info!(
                pages = report.pages.len(),
                root = %report.root.display(),
                "generation complete"
            );
        }
        Err(e) => {
            let failed_in = fail(&mut stage);
            tracing::error!(stage = %failed_in, error = %e, "generation {stage}");
        }
    }
    result
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!(from = %stage, to = %next, "stage");
    *stage = next;
}

/// Moves to [`Stage::Failed`], returning the stage that was running.
fn fail(stage: &mut Stage) -> Stage {
    let running = *stage;
    advance(stage, Stage::Failed);
    running
}

async fn run(
    data_path: &Path,
    output_path: &Path,
    config: SeoConfig,
    stage: &mut Stage,
) -> Result<GenerationReport> {
    advance(stage, Stage::Validating);
    if data_path.as_os_str().is_empty() {
        return Err(Error::Config("Data file path is required".to_string()));
    }
    if output_path.as_os_str().is_empty() {
        return Err(Error::Config("Output directory is required".to_string()));
    }
    config.validate()?;
    let executor = BatchExecutor::new(config.parallel());

    advance(stage, Stage::Loading);
    let docs: Arc<[Document]> = store::load(data_path).await?.into();
    tracing::info!(documents = docs.len(), ?executor, "documents loaded");

    advance(stage, Stage::Rendering);
    let renderer = Arc::new(Renderer::new(config).await?);
    let pages: Arc<[RenderedPage]> = executor
        .run(docs.len(), |index| {
            let renderer = Arc::clone(&renderer);
            let docs = Arc::clone(&docs);
            async move {
                let doc = &docs[index];
                Ok(RenderedPage {
                    index,
                    path: doc.path.clone(),
                    html: renderer.render(doc),
                })
            }
        })
        .await?
        .into();

    advance(stage, Stage::Writing);
    let writer = Arc::new(SiteWriter::prepare(output_path, renderer.config().layout()).await?);
    let written = executor
        .run(pages.len(), |index| {
            let writer = Arc::clone(&writer);
            let pages = Arc::clone(&pages);
            async move { writer.write_page(&pages[index]).await }
        })
        .await?;

    let config = renderer.config();
    let sitemap = if config.sitemap() {
        Some(writer.write_sitemap(&docs, config).await?)
    } else {
        None
    };
    let robots = if config.robots() {
        Some(writer.write_robots(config).await?)
    } else {
        None
    };

    advance(stage, Stage::Done);
    Ok(GenerationReport {
        root: writer.root().to_path_buf(),
        pages: written,
        sitemap,
        robots,
    })
}
