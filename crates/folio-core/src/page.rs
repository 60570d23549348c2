//! Rules behind the small page interactions: navbar tint, anchor links and
//! scroll reveal options.

use crate::constants::{
    NAVBAR_BG_SCROLLED, NAVBAR_BG_TOP, NAVBAR_SCROLL_THRESHOLD_PX, REVEAL_ROOT_MARGIN,
    REVEAL_THRESHOLD,
};

/// Elements faded in as they scroll into view.
pub const REVEAL_SELECTOR: &str = ".skill-card, .strength-card, .project-card, .contact-link";

#[inline]
pub fn navbar_background(scroll_y: f64) -> &'static str {
    if scroll_y > NAVBAR_SCROLL_THRESHOLD_PX {
        NAVBAR_BG_SCROLLED
    } else {
        NAVBAR_BG_TOP
    }
}

/// Element id referenced by an in-page link (`#about` → `about`).
/// A bare `#` or a non-fragment href has no target.
#[inline]
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_darkens_past_threshold() {
        assert_eq!(navbar_background(0.0), NAVBAR_BG_TOP);
        assert_eq!(navbar_background(100.0), NAVBAR_BG_TOP);
        assert_eq!(navbar_background(100.5), NAVBAR_BG_SCROLLED);
    }

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target_id("#projects"), Some("projects"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("/about"), None);
    }
}
