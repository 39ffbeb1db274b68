// src/config/mod.rs
// Configuration: environment tunables and site content

pub mod env;
pub mod site;

pub use env::{ApiKeys, ChatSettings, ConfigValidation, EnvConfig};
pub use site::{Section, SiteConfig};
