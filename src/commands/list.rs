//! List published posts

use anyhow::Result;

use crate::content::normalize;
use crate::Caravel;

/// Print the first listing page to stdout
pub async fn run(app: &Caravel) -> Result<()> {
    let client = app.content_client()?;
    let page = client
        .get_by_type(&app.config.content_type, app.config.page_size)
        .await?;

    println!("Posts ({}):", page.results.len());
    for record in &page.results {
        let post = normalize(record, &app.config.date_fallback);
        println!("  {} - {} [{}]", post.first_publication_date, post.title, post.uid);
    }
    if page.next_page.is_some() {
        println!("  ... more pages available");
    }

    Ok(())
}
