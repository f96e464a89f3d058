//! CMS module - remote content repository access and payload models

mod client;
mod error;
pub mod record;
pub mod richtext;

pub use client::{ContentClient, FetchPage};
pub use error::FetchError;
pub use record::{ContentRecord, PageResponse, Title};
