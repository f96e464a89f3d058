//! Detail resolution: reading time and section rendering for one record

use serde::Serialize;

use crate::cms::{richtext, ContentRecord};
use crate::helpers::display_date;

/// Reading-speed constant used for the estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// A fully resolved post, ready for the detail template
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub uid: String,
    pub title: String,
    pub formatted_date: String,
    pub author: String,
    pub banner_url: String,
    pub reading_minutes: usize,
    pub sections: Vec<SectionHtml>,
}

/// One rendered section. The heading doubles as the section anchor and is
/// assumed unique within a record; duplicate headings collide.
#[derive(Debug, Clone, Serialize)]
pub struct SectionHtml {
    pub heading: String,
    pub html: String,
}

/// Compute derived display fields for one fully resolved record.
pub fn resolve_detail(raw: &ContentRecord, date_fallback: &str) -> PostDetail {
    let sections = raw
        .data
        .content
        .iter()
        .map(|section| SectionHtml {
            heading: section.heading.clone(),
            html: richtext::as_html(&section.body),
        })
        .collect();

    PostDetail {
        uid: raw.uid.clone().unwrap_or_default(),
        title: raw.data.title.as_text(),
        formatted_date: display_date(raw.first_publication_date.as_deref(), date_fallback),
        author: raw.data.author.clone(),
        banner_url: raw.data.banner.url.clone(),
        reading_minutes: reading_minutes(raw),
        sections,
    }
}

/// Estimated reading time: total body word count over all sections,
/// divided by [`WORDS_PER_MINUTE`], rounded up. A record with no body
/// words reads in zero minutes.
///
/// Words are what remains after splitting block text on spaces, carriage
/// returns and newlines.
pub fn reading_minutes(raw: &ContentRecord) -> usize {
    let words: usize = raw
        .data
        .content
        .iter()
        .flat_map(|section| section.body.iter())
        .map(|block| count_words(&block.text))
        .sum();
    words.div_ceil(WORDS_PER_MINUTE)
}

fn count_words(text: &str) -> usize {
    text.split([' ', '\r', '\n'])
        .filter(|fragment| !fragment.is_empty())
        .count()
}
