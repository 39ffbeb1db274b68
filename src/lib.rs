// src/lib.rs
// Folio - interactive core for a personal portfolio site

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod chat;
pub mod config;
pub mod error;
pub mod scroll;
pub mod theme;
pub mod timing;

pub use error::{ChatError, Result};
