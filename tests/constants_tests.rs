// Host-side tests for the web front end's constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn selectors_are_class_selectors() {
    for sel in [
        SLIDER_SELECTOR,
        TRACK_SELECTOR,
        SLIDE_SELECTOR,
        PREV_BUTTON_SELECTOR,
        NEXT_BUTTON_SELECTOR,
        PAGINATION_SELECTOR,
        NAVBAR_SELECTOR,
    ] {
        assert!(sel.starts_with('.'), "{sel} should be a class selector");
        assert!(!sel.contains(' '), "{sel} should not be a descendant selector");
    }
}

#[test]
fn class_names_have_no_selector_syntax() {
    for class in [DOT_CLASS, ACTIVE_CLASS, REVEAL_CLASS, VISIBLE_CLASS] {
        assert!(!class.is_empty());
        assert!(!class.starts_with('.'));
        assert!(!class.contains(' '));
    }
}

#[test]
fn anchor_selector_matches_fragment_links_only() {
    assert_eq!(ANCHOR_LINK_SELECTOR, "a[href^=\"#\"]");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_downscale_is_a_reduction() {
    assert!(BLOOM_DOWNSCALE >= 1);
    assert!(BLOOM_DOWNSCALE.is_power_of_two());
}

#[test]
fn hero_canvas_id_is_bare() {
    assert!(!HERO_CANVAS_ID.starts_with('#'));
}
