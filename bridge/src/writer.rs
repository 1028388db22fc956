//! Writes pages, `sitemap.xml` and `robots.txt` below the output root.

use std::path::{Path, PathBuf};

use crate::config::{OutputLayout, SeoConfig};
use crate::model::{Document, RenderedPage};
use crate::sitemap::{lastmod_now, render_robots, render_sitemap};
use crate::{Error, Result};

/// Materializes one run's artifacts under an absolute output root.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    root: PathBuf,
    layout: OutputLayout,
}

impl SiteWriter {
    /// Resolves `output` to an absolute path and creates it with its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created.
    pub async fn prepare(output: &Path, layout: OutputLayout) -> Result<Self> {
        let root = crate::store::absolute(output)?;
        create_dir_all(&root).await?;
        Ok(Self { root, layout })
    }

    /// The absolute output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File location for the document at `index` with route `path`.
    pub fn page_path(&self, path: &str, index: usize) -> PathBuf {
        match self.layout {
            OutputLayout::Nested => self
                .root
                .join(path.trim_start_matches('/'))
                .join("index.html"),
            OutputLayout::Flat => self.root.join(format!("page-{index}.html")),
        }
    }

    /// Writes one page, creating its directory first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory or file cannot be written.
    pub async fn write_page(&self, page: &RenderedPage) -> Result<PathBuf> {
        let path = self.page_path(&page.path, page.index);
        write(&path, &page.html).await?;
        tracing::debug!(path = %path.display(), "page written");
        Ok(path)
    }

    /// Writes `sitemap.xml` listing every document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub async fn write_sitemap(&self, docs: &[Document], config: &SeoConfig) -> Result<PathBuf> {
        let path = self.root.join("sitemap.xml");
        write(&path, &render_sitemap(docs, config, &lastmod_now())).await?;
        tracing::info!(path = %path.display(), urls = docs.len(), "sitemap written");
        Ok(path)
    }

    /// Writes `robots.txt`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub async fn write_robots(&self, config: &SeoConfig) -> Result<PathBuf> {
        let path = self.root.join("robots.txt");
        write(&path, &render_robots(config)).await?;
        tracing::info!(path = %path.display(), "robots.txt written");
        Ok(path)
    }
}

/// Writes content to a file, creating parent directories as needed.
async fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::io("Cannot write file", path.to_path_buf(), e))
}

/// Existing directories, including ones created concurrently by sibling
/// pages, are not an error.
async fn create_dir_all(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io("Cannot create directory", dir.to_path_buf(), e))
}
