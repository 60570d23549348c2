//! DOM side of the projects carousel: finds the slider, builds pagination,
//! backs the auto-play timer with `setInterval` and mirrors controller state
//! into the page.

use crate::constants::*;
use crate::dom;
use crate::events;
use folio_core::{indicator_label, Carousel, IntervalTimer};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`IntervalTimer`] backed by `setInterval`/`clearInterval`.
pub struct DomInterval {
    window: web::Window,
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl DomInterval {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            handle: None,
            callback: None,
        }
    }

    /// Install the function run on every firing. Must happen before `start`.
    pub fn bind(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl IntervalTimer for DomInterval {
    fn start(&mut self, period_ms: u32) {
        self.cancel();
        let Some(cb) = &self.callback else {
            log::warn!("[carousel] interval started before a callback was bound");
            return;
        };
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(h) => self.handle = Some(h),
            Err(e) => log::warn!("[carousel] setInterval failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(h) = self.handle.take() {
            self.window.clear_interval_with_handle(h);
        }
    }

    fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for DomInterval {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct CarouselView {
    pub state: Carousel<DomInterval>,
    track: web::HtmlElement,
    dots: Vec<web::Element>,
}

impl CarouselView {
    pub fn track(&self) -> &web::HtmlElement {
        &self.track
    }

    pub fn dots(&self) -> &[web::Element] {
        &self.dots
    }

    /// Apply the controller's offset and active dot to the DOM.
    pub fn render(&self) {
        _ = self
            .track
            .style()
            .set_property("transform", &self.state.track_transform());
        for (dot, active) in self.dots.iter().zip(self.state.indicator_states()) {
            _ = dot
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

pub type SharedCarousel = Rc<RefCell<CarouselView>>;

/// Run `f` against the view if it is still alive and not already borrowed.
pub fn with_view(view: &Weak<RefCell<CarouselView>>, f: impl FnOnce(&mut CarouselView)) {
    if let Some(view) = view.upgrade() {
        if let Ok(mut v) = view.try_borrow_mut() {
            f(&mut v);
        }
    }
}

/// Mount the carousel if the page has one. Returns `Ok(None)` when the
/// required anchors are missing.
///
/// A mounted carousel lives for the rest of the page: its handlers only hold
/// weak references, so one strong handle is leaked here and callers may drop
/// the returned one.
pub fn mount(
    window: &web::Window,
    document: &web::Document,
) -> anyhow::Result<Option<SharedCarousel>> {
    let Some(slider) = document.query_selector(SLIDER_SELECTOR).ok().flatten() else {
        log::debug!("[carousel] no slider on this page");
        return Ok(None);
    };
    let Some(track) = slider
        .query_selector(TRACK_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        log::debug!("[carousel] slider has no track");
        return Ok(None);
    };
    let slide_count = dom::query_all(&slider, SLIDE_SELECTOR).len();
    let (viewport_w, _) = dom::viewport_size(window);
    let Some(state) = Carousel::new(slide_count, viewport_w, DomInterval::new(window.clone()))
    else {
        log::debug!("[carousel] slider has no slides");
        return Ok(None);
    };

    let dots = match document.query_selector(PAGINATION_SELECTOR).ok().flatten() {
        Some(pagination) => build_dots(document, &pagination, slide_count)?,
        None => Vec::new(),
    };

    let view = Rc::new(RefCell::new(CarouselView { state, track, dots }));
    let weak = Rc::downgrade(&view);

    let tick_view = weak.clone();
    let tick = Closure::wrap(Box::new(move || {
        with_view(&tick_view, |v| {
            v.state.advance();
            v.render();
        });
    }) as Box<dyn FnMut()>);
    view.borrow_mut().state.timer_mut().bind(tick);

    events::carousel::wire(events::carousel::CarouselWiring {
        window: window.clone(),
        document: document.clone(),
        slider,
        view: weak,
    });

    {
        let mut v = view.borrow_mut();
        v.render();
        v.state.start();
    }
    std::mem::forget(Rc::clone(&view));
    Ok(Some(view))
}

fn build_dots(
    document: &web::Document,
    pagination: &web::Element,
    slide_count: usize,
) -> anyhow::Result<Vec<web::Element>> {
    let mut dots = Vec::with_capacity(slide_count);
    for i in 0..slide_count {
        let dot = document.create_element("button").map_err(dom::js_err)?;
        _ = dot.class_list().add_1(DOT_CLASS);
        _ = dot.set_attribute("aria-label", &indicator_label(i));
        pagination.append_child(&dot).map_err(dom::js_err)?;
        dots.push(dot);
    }
    Ok(dots)
}
