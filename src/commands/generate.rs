//! Generate static files from the content repository

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cms::{ContentRecord, FetchPage};
use crate::content::{normalize, resolve_detail, DisplayRecord};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Caravel;

/// Generate the static site.
///
/// Every listing page is walked up front, so the generated index lists the
/// complete set of records and carries no load-more control - incremental
/// pagination needs the live `serve` command, which hosts the route behind
/// it. Each record gets a pre-rendered detail page, plus a fallback shell
/// for slugs published after this build.
pub async fn run(app: &Caravel) -> Result<()> {
    let start = std::time::Instant::now();

    let client = app.content_client()?;
    let config = &app.config;

    let first_page = client
        .get_by_type(&config.content_type, config.page_size)
        .await
        .context("failed to fetch the first listing page")?;

    // walk every cursor so the index and all detail routes are complete
    let mut records: Vec<ContentRecord> = first_page.results;
    let mut cursor = first_page.next_page;
    while let Some(url) = cursor {
        let page = client
            .fetch_page(&url)
            .await
            .with_context(|| format!("failed to fetch listing page {}", url))?;
        records.extend(page.results);
        cursor = page.next_page;
    }

    tracing::info!("fetched {} records", records.len());

    let renderer = TemplateRenderer::new()?;
    let site = SiteData::from_config(config);
    let generated = write_site(
        &app.public_dir,
        &renderer,
        &site,
        &records,
        &config.date_fallback,
    )?;

    tracing::info!(
        "Generated index + {} posts in {:.2}s",
        generated,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Render and write all pages below `public_dir`. Returns the number of
/// generated post pages.
pub fn write_site(
    public_dir: &Path,
    renderer: &TemplateRenderer,
    site: &SiteData,
    records: &[ContentRecord],
    date_fallback: &str,
) -> Result<usize> {
    fs::create_dir_all(public_dir)?;

    let posts: Vec<DisplayRecord> = records
        .iter()
        .map(|record| normalize(record, date_fallback))
        .collect();
    let index_html = renderer.render_index(site, &posts, false)?;
    fs::write(public_dir.join("index.html"), index_html)?;

    let mut generated = 0;
    for record in records {
        let Some(uid) = record.uid.as_deref() else {
            tracing::warn!("skipping record without uid");
            continue;
        };
        let detail = resolve_detail(record, date_fallback);
        let html = renderer.render_post(site, &detail, false)?;
        let dir = public_dir.join("post").join(uid);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), html)?;
        generated += 1;
    }

    // shell served for slugs that did not exist at build time
    let loading = renderer.render_loading(site)?;
    let fallback_dir = public_dir.join("post").join("_fallback");
    fs::create_dir_all(&fallback_dir)?;
    fs::write(fallback_dir.join("index.html"), loading)?;

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::record::RecordData;
    use crate::cms::Title;
    use crate::config::SiteConfig;

    fn record(uid: &str) -> ContentRecord {
        ContentRecord {
            uid: Some(uid.to_string()),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            data: RecordData {
                title: Title::Plain(format!("title {uid}")),
                ..RecordData::default()
            },
        }
    }

    #[test]
    fn test_write_site_lays_out_public_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteData::from_config(&SiteConfig::default());

        let records = vec![record("first-post"), record("second-post")];
        let generated =
            write_site(tmp.path(), &renderer, &site, &records, "data inválida").unwrap();

        assert_eq!(generated, 2);
        assert!(tmp.path().join("index.html").exists());
        assert!(tmp.path().join("post/first-post/index.html").exists());
        assert!(tmp.path().join("post/second-post/index.html").exists());
        assert!(tmp.path().join("post/_fallback/index.html").exists());
    }

    #[test]
    fn test_generated_index_is_complete_and_static() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteData::from_config(&SiteConfig::default());

        // records spanning several listing pages all land on the index
        let records = vec![record("a"), record("b"), record("c")];
        write_site(tmp.path(), &renderer, &site, &records, "data inválida").unwrap();

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("title a"));
        assert!(index.contains("title b"));
        assert!(index.contains("title c"));
        // no load-more wiring: the route behind it only exists when serving
        assert!(!index.contains("Carregar mais posts"));
        assert!(!index.contains("api/load-more"));
    }

    #[test]
    fn test_records_without_uid_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteData::from_config(&SiteConfig::default());

        let mut anonymous = record("x");
        anonymous.uid = None;
        let generated =
            write_site(tmp.path(), &renderer, &site, &[anonymous], "data inválida").unwrap();

        assert_eq!(generated, 0);
        assert!(tmp.path().join("index.html").exists());
    }
}
