//! Configuration module

mod site;

pub use site::api_token;
pub use site::SiteConfig;
