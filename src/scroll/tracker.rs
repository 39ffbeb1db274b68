// src/scroll/tracker.rs
// Scroll-driven selection of the active page section

use std::time::{Duration, Instant};

use tracing::debug;

use crate::timing::ThrottleGate;

use super::viewport::ViewportProbe;

/// Viewports narrower than this are treated as mobile; tracking is
/// suspended there because sections stack full-height and the nav
/// highlights nothing.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Scroll events are processed at most once per this interval.
const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Width of the activation band as a divisor of the viewport height: a
/// section counts as in view when its rect middle sits within
/// `viewport_height / divisor` of the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    /// Standard band, `viewport_height / 2`.
    #[default]
    Wide,
    /// Tighter band, `viewport_height / 2.5`, for layouts with tall
    /// sections where the wide band flickers between neighbours.
    Narrow,
}

impl Sensitivity {
    fn divisor(self) -> f64 {
        match self {
            Self::Wide => 2.0,
            Self::Narrow => 2.5,
        }
    }
}

/// Keeps the "active" section in sync with scroll position. Sections
/// are checked in document order and the first one inside the
/// activation band wins, so the earliest visible section is highlighted
/// even when two overlap the band.
#[derive(Debug)]
pub struct SectionTracker {
    sections: Vec<String>,
    active: usize,
    gate: ThrottleGate,
    sensitivity: Sensitivity,
}

impl SectionTracker {
    pub fn new(sections: Vec<String>) -> Self {
        Self::with_sensitivity(sections, Sensitivity::default())
    }

    pub fn with_sensitivity(sections: Vec<String>, sensitivity: Sensitivity) -> Self {
        Self {
            sections,
            active: 0,
            gate: ThrottleGate::new(SCROLL_THROTTLE),
            sensitivity,
        }
    }

    /// Currently highlighted section, defaulting to the first one.
    pub fn active_section(&self) -> Option<&str> {
        self.sections.get(self.active).map(String::as_str)
    }

    /// Feed one scroll event. Returns `true` when the active section
    /// changed. Events inside the throttle interval are dropped, and
    /// mobile-width viewports are ignored entirely.
    pub fn handle_scroll(&mut self, probe: &dyn ViewportProbe, now: Instant) -> bool {
        if self.sections.is_empty() || !self.gate.fire(now) {
            return false;
        }

        let sample = probe.sample();
        if sample.viewport_width < MOBILE_BREAKPOINT {
            return false;
        }

        let band = sample.viewport_height / self.sensitivity.divisor();
        for (idx, id) in self.sections.iter().enumerate() {
            // Unmounted sections are skipped, not treated as a miss
            let Some(rect) = probe.section_rect(id) else {
                continue;
            };
            if rect.middle().abs() < band {
                if idx == self.active {
                    return false;
                }
                debug!(section = %id, "active section changed");
                self.active = idx;
                return true;
            }
        }

        // Nothing in band: keep the previous selection
        false
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::scroll::viewport::{ScrollSample, SectionRect};

    struct FakeViewport {
        sample: ScrollSample,
        rects: HashMap<String, SectionRect>,
    }

    impl FakeViewport {
        fn new(width: f64, height: f64) -> Self {
            Self {
                sample: ScrollSample {
                    scroll_y: 0.0,
                    viewport_width: width,
                    viewport_height: height,
                },
                rects: HashMap::new(),
            }
        }

        fn set_middle(&mut self, id: &str, middle: f64) {
            self.rects.insert(
                id.to_string(),
                SectionRect {
                    top: middle - 50.0,
                    bottom: middle + 50.0,
                },
            );
        }
    }

    impl ViewportProbe for FakeViewport {
        fn sample(&self) -> ScrollSample {
            self.sample
        }

        fn section_rect(&self, id: &str) -> Option<SectionRect> {
            self.rects.get(id).copied()
        }
    }

    fn tracker() -> SectionTracker {
        SectionTracker::new(vec![
            "home".to_string(),
            "about".to_string(),
            "skills".to_string(),
        ])
    }

    #[test]
    fn test_defaults_to_first_section() {
        assert_eq!(tracker().active_section(), Some("home"));
    }

    #[test]
    fn test_selects_section_inside_band() {
        // Band for a 800px viewport at default sensitivity is 400px
        let mut probe = FakeViewport::new(1280.0, 800.0);
        probe.set_middle("home", -500.0);
        probe.set_middle("about", 100.0);
        probe.set_middle("skills", 900.0);

        let mut t = tracker();
        assert!(t.handle_scroll(&probe, Instant::now()));
        assert_eq!(t.active_section(), Some("about"));
    }

    #[test]
    fn test_first_section_in_band_wins() {
        let mut probe = FakeViewport::new(1280.0, 800.0);
        // "home" (10) and "about" (300) are both within the 400px band;
        // "about" is irrelevant because "home" comes first
        probe.set_middle("home", -10.0);
        probe.set_middle("about", 300.0);
        probe.set_middle("skills", 800.0);

        let t0 = Instant::now();
        let mut t = tracker();

        // Move away from the default first
        let mut far = FakeViewport::new(1280.0, 800.0);
        far.set_middle("home", -900.0);
        far.set_middle("about", 100.0);
        assert!(t.handle_scroll(&far, t0));
        assert_eq!(t.active_section(), Some("about"));

        assert!(t.handle_scroll(&probe, t0 + Duration::from_millis(100)));
        assert_eq!(t.active_section(), Some("home"));
    }

    #[test]
    fn test_retains_selection_when_nothing_in_band() {
        let mut probe = FakeViewport::new(1280.0, 800.0);
        probe.set_middle("home", -900.0);
        probe.set_middle("about", 100.0);

        let t0 = Instant::now();
        let mut t = tracker();
        assert!(t.handle_scroll(&probe, t0));
        assert_eq!(t.active_section(), Some("about"));

        // Mid-jump frame where every section is far out of band
        let mut between = FakeViewport::new(1280.0, 800.0);
        between.set_middle("home", -2000.0);
        between.set_middle("about", -1000.0);
        between.set_middle("skills", 1500.0);
        assert!(!t.handle_scroll(&between, t0 + Duration::from_millis(100)));
        assert_eq!(t.active_section(), Some("about"));
    }

    #[test]
    fn test_skips_unmounted_sections() {
        // "home" has no rect at all; selection falls through to "about"
        let mut probe = FakeViewport::new(1280.0, 800.0);
        probe.set_middle("about", 50.0);

        let mut t = tracker();
        assert!(t.handle_scroll(&probe, Instant::now()));
        assert_eq!(t.active_section(), Some("about"));
    }

    #[test]
    fn test_mobile_viewport_suspends_tracking() {
        let mut probe = FakeViewport::new(500.0, 800.0);
        probe.set_middle("home", -900.0);
        probe.set_middle("about", 0.0);

        let mut t = tracker();
        assert!(!t.handle_scroll(&probe, Instant::now()));
        assert_eq!(t.active_section(), Some("home"));
    }

    #[test]
    fn test_throttle_drops_rapid_events() {
        let mut probe = FakeViewport::new(1280.0, 800.0);
        probe.set_middle("home", -900.0);
        probe.set_middle("about", 0.0);

        let t0 = Instant::now();
        let mut t = tracker();
        assert!(t.handle_scroll(&probe, t0));

        // Back at the top 10ms later, but the gate is still closed
        let mut top = FakeViewport::new(1280.0, 800.0);
        top.set_middle("home", 0.0);
        top.set_middle("about", 900.0);
        assert!(!t.handle_scroll(&top, t0 + Duration::from_millis(10)));
        assert_eq!(t.active_section(), Some("about"));

        assert!(t.handle_scroll(&top, t0 + Duration::from_millis(110)));
        assert_eq!(t.active_section(), Some("home"));
    }

    #[test]
    fn test_narrow_sensitivity_tightens_band() {
        // Middle at 350px: inside the default band (400px) but outside
        // the Narrow band (320px) for a 800px viewport
        let mut probe = FakeViewport::new(1280.0, 800.0);
        probe.set_middle("home", -900.0);
        probe.set_middle("about", 350.0);

        let sections = vec!["home".to_string(), "about".to_string()];
        let mut wide = SectionTracker::with_sensitivity(sections.clone(), Sensitivity::Wide);
        assert!(wide.handle_scroll(&probe, Instant::now()));
        assert_eq!(wide.active_section(), Some("about"));

        let mut narrow = SectionTracker::with_sensitivity(sections, Sensitivity::Narrow);
        assert!(!narrow.handle_scroll(&probe, Instant::now()));
        assert_eq!(narrow.active_section(), Some("home"));
    }

    #[test]
    fn test_empty_section_list() {
        let probe = FakeViewport::new(1280.0, 800.0);
        let mut t = SectionTracker::new(Vec::new());
        assert_eq!(t.active_section(), None);
        assert!(!t.handle_scroll(&probe, Instant::now()));
    }
}
