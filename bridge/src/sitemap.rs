//! Text of `sitemap.xml` and `robots.txt`.

use crate::config::SeoConfig;
use crate::model::Document;

/// Renders a sitemap with one `<url>` per document.
///
/// `lastmod` is shared by every entry; `changefreq` and `priority` are fixed.
pub fn render_sitemap(docs: &[Document], config: &SeoConfig, lastmod: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for doc in docs {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
             <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            config.url_for(&doc.path)
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Renders a robots file allowing every crawler and pointing at the sitemap.
pub fn render_robots(config: &SeoConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        config.base_url()
    )
}

/// Current UTC time as used for `lastmod`, e.g. `2024-05-06T07:08:09.123Z`.
pub fn lastmod_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        serde_json::from_str(
            r#"[{"title":"A","description":"D","path":"/a"},
                {"title":"B","description":"D","path":"/b/c"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn sitemap_lists_every_document() {
        let config = SeoConfig::builder().base_url("https://e.com").build();
        let xml = render_sitemap(&docs(), &config, "2024-05-06T07:08:09.123Z");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://e.com/a</loc>"));
        assert!(xml.contains("<loc>https://e.com/b/c</loc>"));
        assert!(xml.contains("<lastmod>2024-05-06T07:08:09.123Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let config = SeoConfig::builder().base_url("https://e.com/").build();
        assert_eq!(
            render_robots(&config),
            "User-agent: *\nAllow: /\n\nSitemap: https://e.com/sitemap.xml\n"
        );
    }

    #[test]
    fn lastmod_is_rfc3339_utc() {
        let stamp = lastmod_now();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
