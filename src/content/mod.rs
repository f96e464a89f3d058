//! Content module - normalization, pagination and detail resolution

mod detail;
mod normalize;
mod pagination;

pub use detail::{reading_minutes, resolve_detail, PostDetail, SectionHtml, WORDS_PER_MINUTE};
pub use normalize::{normalize, DisplayRecord};
pub use pagination::{LoadOutcome, Paginator};
