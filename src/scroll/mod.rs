// src/scroll/mod.rs
// Scroll-driven page state: active section, motion, jump targets

pub mod activity;
pub mod tracker;
pub mod viewport;

pub use activity::ScrollActivity;
pub use tracker::{MOBILE_BREAKPOINT, SectionTracker, Sensitivity};
pub use viewport::{NAV_HEIGHT, ScrollSample, SectionRect, ViewportProbe, scroll_target};
