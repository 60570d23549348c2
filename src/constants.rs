// DOM anchors and render-target settings for the web front end.
// A missing anchor disables the component that needs it.

// Hero scene
pub const HERO_CANVAS_ID: &str = "hero-canvas";

// Carousel
pub const SLIDER_SELECTOR: &str = ".projects-slider";
pub const TRACK_SELECTOR: &str = ".slider-track";
pub const SLIDE_SELECTOR: &str = ".slide";
pub const PREV_BUTTON_SELECTOR: &str = ".slider-prev";
pub const NEXT_BUTTON_SELECTOR: &str = ".slider-next";
pub const PAGINATION_SELECTOR: &str = ".slider-pagination";
pub const DOT_CLASS: &str = "pagination-dot";
pub const ACTIVE_CLASS: &str = "active";

// Page effects
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const ANCHOR_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const REVEAL_CLASS: &str = "reveal";
pub const VISIBLE_CLASS: &str = "visible";

// Render targets
pub const BLOOM_DOWNSCALE: u32 = 2; // bloom runs at 1/N resolution
