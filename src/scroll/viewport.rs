// src/scroll/viewport.rs
// Geometry seam between the tracker and the rendering surface

/// Height of the fixed navigation bar, subtracted from jump targets so
/// a section's heading is not hidden underneath it.
pub const NAV_HEIGHT: f64 = 64.0;

/// Snapshot of the viewport taken at one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// A section's bounding box in viewport-relative coordinates, with top
/// and bottom measured from the viewport's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    /// Vertical midpoint of the section, still viewport-relative.
    pub fn middle(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Read side of the rendering surface. The tracker asks it for the
/// current viewport state and for per-section geometry.
pub trait ViewportProbe {
    fn sample(&self) -> ScrollSample;

    /// Geometry for one section, `None` when it is not mounted.
    fn section_rect(&self, id: &str) -> Option<SectionRect>;
}

/// Absolute scroll offset that places `rect`'s top edge just below the
/// fixed navigation bar.
pub fn scroll_target(rect: &SectionRect, sample: &ScrollSample, nav_height: f64) -> f64 {
    rect.top + sample.scroll_y - nav_height
}
