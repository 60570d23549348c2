//! Index, layout and auto-play state for the projects carousel.
//!
//! The controller never touches the DOM. The web front end reads
//! [`Carousel::track_transform`] and [`Carousel::indicator_states`] after each
//! mutation and applies them to the page.

use crate::constants::{
    AUTOPLAY_PERIOD_MS, MEDIUM_VIEWPORT_PX, SWIPE_THRESHOLD_PX, WIDE_VIEWPORT_PX,
};
use crate::timer::{IntervalTimer, ManualInterval};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    #[inline]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Previous),
            "ArrowRight" => Some(Direction::Next),
            _ => None,
        }
    }

    #[inline]
    fn step(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Number of slides visible side by side at a given viewport width.
#[inline]
pub fn slides_to_show(viewport_width: f64) -> usize {
    if viewport_width >= WIDE_VIEWPORT_PX {
        3
    } else if viewport_width >= MEDIUM_VIEWPORT_PX {
        2
    } else {
        1
    }
}

#[inline]
pub fn wrap_index(index: i64, slide_count: usize) -> usize {
    index.rem_euclid(slide_count.max(1) as i64) as usize
}

/// Swipe direction for a touch that started at `start_x` and ended at `end_x`.
/// Swiping left (finger moves towards smaller x) goes to the next slide.
#[inline]
pub fn classify_swipe(start_x: f32, end_x: f32) -> Option<Direction> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD_PX {
        return None;
    }
    Some(if diff > 0.0 {
        Direction::Next
    } else {
        Direction::Previous
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Completes the gesture. A touch end without a matching start is ignored.
    pub fn finish(&mut self, x: f32) -> Option<Direction> {
        self.start_x.take().and_then(|start| classify_swipe(start, x))
    }
}

pub struct Carousel<T: IntervalTimer> {
    current: usize,
    slide_count: usize,
    slides_to_show: usize,
    hovered: bool,
    page_hidden: bool,
    period_ms: u32,
    timer: T,
}

impl<T: IntervalTimer> Carousel<T> {
    /// Returns `None` when there is nothing to slide.
    pub fn new(slide_count: usize, viewport_width: f64, timer: T) -> Option<Self> {
        if slide_count == 0 {
            return None;
        }
        Some(Self {
            current: 0,
            slide_count,
            slides_to_show: slides_to_show(viewport_width),
            hovered: false,
            page_hidden: false,
            period_ms: AUTOPLAY_PERIOD_MS,
            timer,
        })
    }

    pub fn with_period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn slides_to_show(&self) -> usize {
        self.slides_to_show
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Auto-play runs unless the pointer is over the carousel or the page is hidden.
    pub fn autoplay_active(&self) -> bool {
        !self.hovered && !self.page_hidden
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn start(&mut self) {
        self.rearm();
        log::info!(
            "[carousel] started: slides={} visible={}",
            self.slide_count,
            self.slides_to_show
        );
    }

    pub fn go_to(&mut self, index: i64) {
        self.current = wrap_index(index, self.slide_count);
        log::debug!("[carousel] slide {}", self.current);
        self.rearm();
    }

    pub fn next(&mut self) {
        self.go_to(self.current as i64 + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.current as i64 - 1);
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.go_to(self.current as i64 + direction.step());
    }

    /// Auto-play tick.
    pub fn advance(&mut self) {
        self.next();
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.timer.cancel();
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.rearm();
    }

    pub fn set_page_hidden(&mut self, hidden: bool) {
        if self.page_hidden == hidden {
            return;
        }
        self.page_hidden = hidden;
        self.rearm();
    }

    /// Recompute the visible slide count. Returns true if it changed.
    pub fn relayout(&mut self, viewport_width: f64) -> bool {
        let visible = slides_to_show(viewport_width);
        let changed = visible != self.slides_to_show;
        self.slides_to_show = visible;
        if changed {
            log::debug!("[carousel] relayout: visible={}", visible);
        }
        changed
    }

    pub fn track_offset_percent(&self) -> f64 {
        self.current as f64 * 100.0 / self.slides_to_show as f64
    }

    /// CSS transform for the sliding track.
    pub fn track_transform(&self) -> String {
        format!("translateX(-{}%)", self.track_offset_percent())
    }

    /// One flag per pagination indicator; exactly one is set.
    pub fn indicator_states(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.slide_count).map(move |i| i == self.current)
    }

    fn rearm(&mut self) {
        self.timer.cancel();
        if self.autoplay_active() {
            self.timer.start(self.period_ms);
        }
    }
}

impl Carousel<ManualInterval> {
    /// Let `ms` milliseconds pass, running auto-play ticks as they fall due.
    /// Returns the times at which ticks fired.
    pub fn elapse(&mut self, ms: u64) -> Vec<u64> {
        let until = self.timer.now_ms() + ms;
        let mut fired = Vec::new();
        while let Some(at) = self.timer.take_due(until) {
            fired.push(at);
            self.advance();
        }
        self.timer.set_now(until);
        fired
    }
}

/// Accessible label for the pagination dot of slide `index` (0-based).
#[inline]
pub fn indicator_label(index: usize) -> String {
    format!("Go to slide {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel<ManualInterval> {
        Carousel::new(n, 1280.0, ManualInterval::new()).unwrap()
    }

    #[test]
    fn empty_carousel_is_not_constructed() {
        assert!(Carousel::new(0, 1280.0, ManualInterval::new()).is_none());
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut c = carousel(4);
        c.previous();
        assert_eq!(c.current_index(), 3);
        c.next();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn transform_uses_visible_width() {
        let mut c = carousel(5);
        c.go_to(2);
        assert_eq!(c.track_transform(), "translateX(-66.66666666666667%)");
        c.relayout(500.0);
        assert_eq!(c.track_transform(), "translateX(-200%)");
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Previous));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Next));
        assert_eq!(Direction::from_key("ArrowUp"), None);
    }

    #[test]
    fn swipe_end_without_start_is_ignored() {
        let mut s = SwipeTracker::default();
        assert_eq!(s.finish(10.0), None);
        s.begin(200.0);
        assert_eq!(s.finish(100.0), Some(Direction::Next));
        assert_eq!(s.finish(0.0), None);
    }

    #[test]
    fn indicator_labels_are_one_based() {
        assert_eq!(indicator_label(0), "Go to slide 1");
    }
}
