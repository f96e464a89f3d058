//! Record normalization: raw content records into display-ready view models

use serde::Serialize;

use crate::cms::ContentRecord;
use crate::helpers::display_date;

/// The render-ready projection of a content record, as shown in the post
/// list. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub uid: String,
    /// Already formatted for display: "dd MMM yyyy" in pt-BR
    pub first_publication_date: String,
    /// Plain text, rich titles flattened
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// Convert a raw record into its display projection.
///
/// Pure: no I/O, no hidden state, same input gives the same output.
/// Malformed input never errors - an absent or unparseable publication
/// date renders as `date_fallback`.
pub fn normalize(raw: &ContentRecord, date_fallback: &str) -> DisplayRecord {
    DisplayRecord {
        uid: raw.uid.clone().unwrap_or_default(),
        first_publication_date: display_date(raw.first_publication_date.as_deref(), date_fallback),
        title: raw.data.title.as_text(),
        subtitle: raw.data.subtitle.clone(),
        author: raw.data.author.clone(),
    }
}
