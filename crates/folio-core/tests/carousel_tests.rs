// Host-side tests for the carousel state machine.

use folio_core::constants::AUTOPLAY_PERIOD_MS;
use folio_core::{classify_swipe, slides_to_show, Carousel, Direction, IntervalTimer, ManualInterval};

fn make_carousel(slides: usize) -> Carousel<ManualInterval> {
    let mut c = Carousel::new(slides, 1280.0, ManualInterval::new()).expect("slides present");
    c.start();
    c
}

#[test]
fn go_to_wraps_like_euclidean_modulo() {
    for n in 1..=7usize {
        let mut c = make_carousel(n);
        for i in -20i64..=20 {
            c.go_to(i);
            let n_i = n as i64;
            let expected = ((i % n_i) + n_i) % n_i;
            assert_eq!(c.current_index() as i64, expected, "n={n} i={i}");
        }
    }
}

#[test]
fn exactly_one_indicator_is_active() {
    let mut c = make_carousel(5);
    let check = |c: &Carousel<ManualInterval>| {
        let states: Vec<bool> = c.indicator_states().collect();
        assert_eq!(states.len(), 5);
        assert_eq!(states.iter().filter(|s| **s).count(), 1);
        assert!(states[c.current_index()]);
    };
    check(&c);
    for step in [1, 1, -1, 7, -3] {
        if step > 0 {
            for _ in 0..step {
                c.next();
            }
        } else {
            for _ in 0..-step {
                c.previous();
            }
        }
        check(&c);
    }
    c.elapse(3 * AUTOPLAY_PERIOD_MS as u64);
    check(&c);
}

#[test]
fn autoplay_advances_every_period() {
    let mut c = make_carousel(3);
    let fired = c.elapse(15_000);
    assert_eq!(fired, vec![5_000, 10_000, 15_000]);
    assert_eq!(c.current_index(), 0);
}

#[test]
fn manual_navigation_resets_autoplay() {
    let mut c = make_carousel(4);
    assert!(c.elapse(4_900).is_empty());
    c.next();
    assert_eq!(c.current_index(), 1);
    // The first 5 s deadline has passed; nothing may fire until 5 s after the click.
    assert!(c.elapse(4_999).is_empty());
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.elapse(1), vec![9_900]);
    assert_eq!(c.current_index(), 2);
}

#[test]
fn rapid_manual_navigation_keeps_a_single_timer() {
    let mut c = make_carousel(4);
    for _ in 0..10 {
        c.elapse(1_000);
        c.navigate(Direction::Previous);
    }
    let timer = c.timer();
    assert!(timer.is_running());
    assert_eq!(timer.starts() - timer.cancels(), 1);
    assert_eq!(timer.next_due_ms(), Some(15_000));
}

#[test]
fn hover_suspends_and_leave_resumes() {
    let mut c = make_carousel(3);
    c.elapse(2_000);
    c.pointer_enter();
    assert!(!c.autoplay_active());
    assert!(c.elapse(60_000).is_empty());
    c.pointer_leave();
    assert!(c.autoplay_active());
    assert_eq!(c.elapse(5_000).len(), 1);
}

#[test]
fn navigation_while_hovered_does_not_rearm() {
    let mut c = make_carousel(3);
    c.pointer_enter();
    c.next();
    assert_eq!(c.current_index(), 1);
    assert!(!c.timer().is_running());
    assert!(c.elapse(20_000).is_empty());
}

#[test]
fn hidden_page_suspends_autoplay() {
    let mut c = make_carousel(3);
    c.set_page_hidden(true);
    assert!(c.elapse(20_000).is_empty());
    c.set_page_hidden(false);
    assert_eq!(c.elapse(5_000).len(), 1);
}

#[test]
fn swipe_threshold_is_strict() {
    assert_eq!(classify_swipe(100.0, 51.0), None); // 49 px
    assert_eq!(classify_swipe(100.0, 50.0), None); // 50 px
    assert_eq!(classify_swipe(100.0, 49.0), Some(Direction::Next)); // 51 px left
    assert_eq!(classify_swipe(49.0, 100.0), Some(Direction::Previous)); // 51 px right
    assert_eq!(classify_swipe(100.0, 149.0), None);
}

#[test]
fn swipe_navigates_exactly_once() {
    let mut c = make_carousel(5);
    if let Some(dir) = classify_swipe(300.0, 249.0) {
        c.navigate(dir);
    }
    assert_eq!(c.current_index(), 1);
    if let Some(dir) = classify_swipe(300.0, 251.0) {
        c.navigate(dir);
    }
    assert_eq!(c.current_index(), 1);
}

#[test]
fn viewport_tiers() {
    // 1023 falls in the 768..1024 tier.
    assert_eq!(slides_to_show(1023.0), 2);
    assert_eq!(slides_to_show(1024.0), 3);
    assert_eq!(slides_to_show(767.0), 1);
    assert_eq!(slides_to_show(768.0), 2);
}

#[test]
fn relayout_keeps_index() {
    let mut c = make_carousel(6);
    c.go_to(4);
    assert!(c.relayout(800.0));
    assert_eq!(c.slides_to_show(), 2);
    assert_eq!(c.current_index(), 4);
    assert_eq!(c.track_offset_percent(), 200.0);
    assert!(!c.relayout(900.0));
}
