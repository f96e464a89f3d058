//! Helper functions shared by normalization, rendering and templates

mod date;
mod html;

pub use date::*;
pub use html::*;
