use crate::config::SiteConfig;

pub const NAVBAR_SHADOW: &str = "0 4px 20px -2px rgba(15, 23, 42, 0.1)";
pub const NAVBAR_NO_SHADOW: &str = "none";
pub const BACK_TO_TOP_VISIBLE_CLASS: &str = "visible";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThresholds {
    pub nav_shadow: f64,
    pub back_to_top: f64,
}

impl ScrollThresholds {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            nav_shadow: config.nav_shadow_offset,
            back_to_top: config.back_to_top_offset,
        }
    }

    /// Both flags are strict `>` comparisons against the current offset only.
    pub fn evaluate(&self, offset: f64) -> ScrollFrame {
        ScrollFrame {
            navbar_shadow: offset > self.nav_shadow,
            back_to_top_visible: offset > self.back_to_top,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollFrame {
    pub navbar_shadow: bool,
    pub back_to_top_visible: bool,
}

impl ScrollFrame {
    pub fn navbar_shadow_value(self) -> &'static str {
        if self.navbar_shadow {
            NAVBAR_SHADOW
        } else {
            NAVBAR_NO_SHADOW
        }
    }
}

/// Coalesces scroll bursts into one update per animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameGate {
    #[default]
    Idle,
    Pending,
}

impl FrameGate {
    /// True when the caller should request a frame; false while one is queued.
    pub fn request(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Pending;
                true
            }
            Self::Pending => false,
        }
    }

    pub fn release(&mut self) {
        *self = Self::Idle;
    }
}

#[derive(Debug)]
pub struct ScrollEffects {
    thresholds: ScrollThresholds,
    gate: FrameGate,
    applied: Option<ScrollFrame>,
}

impl ScrollEffects {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        Self {
            thresholds,
            gate: FrameGate::Idle,
            applied: None,
        }
    }

    pub fn on_scroll(&mut self) -> bool {
        self.gate.request()
    }

    /// `None` when nothing changed since the last applied frame.
    pub fn on_frame(&mut self, offset: f64) -> Option<ScrollFrame> {
        self.gate.release();
        let frame = self.thresholds.evaluate(offset);
        if self.applied == Some(frame) {
            return None;
        }

        self.applied = Some(frame);
        Some(frame)
    }
}

/// Extracts the element id from an in-page link. A bare `#` has no target.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset that puts `target_top` just below a fixed navbar.
pub fn scroll_destination(target_top: f64, page_offset: f64, navbar_height: f64) -> f64 {
    target_top + page_offset - navbar_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ScrollThresholds {
        ScrollThresholds {
            nav_shadow: 100.0,
            back_to_top: 500.0,
        }
    }

    #[test]
    fn thresholds_are_independent_and_strict() {
        let thresholds = thresholds();

        assert_eq!(
            thresholds.evaluate(100.0),
            ScrollFrame {
                navbar_shadow: false,
                back_to_top_visible: false
            }
        );
        assert_eq!(
            thresholds.evaluate(101.0),
            ScrollFrame {
                navbar_shadow: true,
                back_to_top_visible: false
            }
        );
        assert_eq!(
            thresholds.evaluate(501.0),
            ScrollFrame {
                navbar_shadow: true,
                back_to_top_visible: true
            }
        );
    }

    #[test]
    fn burst_of_scroll_events_requests_one_frame() {
        let mut effects = ScrollEffects::new(thresholds());

        assert!(effects.on_scroll());
        assert!(!effects.on_scroll());
        assert!(!effects.on_scroll());

        effects.on_frame(0.0);
        assert!(effects.on_scroll());
    }

    #[test]
    fn unchanged_frames_are_not_reapplied() {
        let mut effects = ScrollEffects::new(thresholds());

        assert!(effects.on_frame(0.0).is_some());
        assert!(effects.on_frame(50.0).is_none());

        let frame = effects.on_frame(150.0).expect("shadow flips on");
        assert_eq!(frame.navbar_shadow_value(), NAVBAR_SHADOW);

        let frame = effects.on_frame(10.0).expect("shadow flips off");
        assert_eq!(frame.navbar_shadow_value(), NAVBAR_NO_SHADOW);
    }

    #[test]
    fn anchors_resolve_to_ids() {
        assert_eq!(anchor_target_id("#contact"), Some("contact"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("/about"), None);
    }

    #[test]
    fn destination_accounts_for_navbar() {
        assert_eq!(scroll_destination(240.0, 1_000.0, 72.0), 1_168.0);
    }
}
