//! Built-in templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Autoescaping stays
//! on: the only raw-HTML value, a section body rendered by
//! `cms::richtext`, is marked `| safe` in post.html explicitly.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{DisplayRecord, PostDetail};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("caravel/layout.html")),
            ("index.html", include_str!("caravel/index.html")),
            ("post.html", include_str!("caravel/post.html")),
            ("loading.html", include_str!("caravel/loading.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render the post list
    pub fn render_index(
        &self,
        site: &SiteData,
        posts: &[DisplayRecord],
        has_more: bool,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", posts);
        context.insert("has_more", &has_more);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a post detail page
    pub fn render_post(
        &self,
        site: &SiteData,
        post: &PostDetail,
        is_fallback: bool,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        context.insert("is_fallback", &is_fallback);
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the fallback shell shown while a not-yet-generated post
    /// resolves
    pub fn render_loading(&self, site: &SiteData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        Ok(self.tera.render("loading.html", &context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Site-level template context
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            root: config.root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{PostDetail, SectionHtml};

    fn site() -> SiteData {
        let mut config = SiteConfig::default();
        config.title = "spacetraveling".to_string();
        SiteData::from_config(&config)
    }

    fn post(uid: &str, title: &str) -> DisplayRecord {
        DisplayRecord {
            uid: uid.to_string(),
            first_publication_date: "15 mar 2021".to_string(),
            title: title.to_string(),
            subtitle: "sub".to_string(),
            author: "Ana".to_string(),
        }
    }

    #[test]
    fn test_index_lists_posts_and_load_more() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![post("a", "First post"), post("b", "Second post")];

        let html = renderer.render_index(&site(), &posts, true).unwrap();
        assert!(html.contains("First post"));
        assert!(html.contains("Carregar mais posts"));
        // path segments must reach the page verbatim, not entity-escaped
        assert!(html.contains(r#"href="/post/a/""#));
        assert!(!html.contains("&#x2F;"));
    }

    #[test]
    fn test_index_without_cursor_hides_load_more() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_index(&site(), &[post("a", "Only post")], false)
            .unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_index_escapes_titles() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_index(&site(), &[post("a", "<script>alert(1)</script>")], false)
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_post_page_renders_header_and_sections() {
        let renderer = TemplateRenderer::new().unwrap();
        let detail = PostDetail {
            uid: "my-post".to_string(),
            title: "Como utilizar Hooks".to_string(),
            formatted_date: "15 mar 2021".to_string(),
            author: "Joseph Oliveira".to_string(),
            banner_url: "https://images.example.com/banner.png".to_string(),
            reading_minutes: 4,
            sections: vec![SectionHtml {
                heading: "Proin et varius".to_string(),
                html: "<p>Lorem <strong>ipsum</strong></p>".to_string(),
            }],
        };

        let html = renderer.render_post(&site(), &detail, false).unwrap();
        assert!(html.contains("Como utilizar Hooks"));
        assert!(html.contains("15 mar 2021"));
        assert!(html.contains("4 min"));
        // section html flows through unescaped, it is our renderer's output
        assert!(html.contains("<p>Lorem <strong>ipsum</strong></p>"));
        assert!(!html.contains("Carregando..."));
    }

    #[test]
    fn test_fallback_flag_shows_loading_indicator() {
        let renderer = TemplateRenderer::new().unwrap();
        let detail = PostDetail {
            uid: "x".to_string(),
            title: "t".to_string(),
            formatted_date: "d".to_string(),
            author: "a".to_string(),
            banner_url: String::new(),
            reading_minutes: 0,
            sections: Vec::new(),
        };
        let html = renderer.render_post(&site(), &detail, true).unwrap();
        assert!(html.contains("Carregando..."));
    }

    #[test]
    fn test_loading_shell() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_loading(&site()).unwrap();
        assert!(html.contains("Carregando..."));
    }
}
