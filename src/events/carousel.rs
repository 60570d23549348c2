use crate::carousel::{with_view, CarouselView};
use crate::constants::{NEXT_BUTTON_SELECTOR, PREV_BUTTON_SELECTOR};
use crate::dom;
use folio_core::constants::RESIZE_DEBOUNCE_MS;
use folio_core::{Debouncer, Direction, SwipeTracker};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct CarouselWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub slider: web::Element,
    pub view: Weak<RefCell<CarouselView>>,
}

pub fn wire(w: CarouselWiring) {
    wire_buttons(&w);
    wire_dots(&w);
    wire_keyboard(&w);
    wire_hover(&w);
    wire_touch(&w);
    wire_resize(&w);
    wire_visibility(&w);
}

fn navigate(view: &Weak<RefCell<CarouselView>>, direction: Direction) {
    with_view(view, |v| {
        v.state.navigate(direction);
        v.render();
    });
}

fn wire_buttons(w: &CarouselWiring) {
    for (selector, direction) in [
        (PREV_BUTTON_SELECTOR, Direction::Previous),
        (NEXT_BUTTON_SELECTOR, Direction::Next),
    ] {
        if let Some(button) = w.slider.query_selector(selector).ok().flatten() {
            let view = w.view.clone();
            dom::listen(&button, "click", move |_| navigate(&view, direction));
        }
    }
}

fn wire_dots(w: &CarouselWiring) {
    let dots: Vec<web::Element> = match w.view.upgrade() {
        Some(v) => v.borrow().dots().to_vec(),
        None => return,
    };
    for (i, dot) in dots.iter().enumerate() {
        let view = w.view.clone();
        dom::listen(dot, "click", move |_| {
            with_view(&view, |v| {
                v.state.go_to(i as i64);
                v.render();
            });
        });
    }
}

fn wire_keyboard(w: &CarouselWiring) {
    _ = w.slider.set_attribute("tabindex", "0");
    let view = w.view.clone();
    dom::listen(&w.slider, "keydown", move |ev| {
        let Some(key_ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if let Some(direction) = Direction::from_key(&key_ev.key()) {
            navigate(&view, direction);
        }
    });
}

fn wire_hover(w: &CarouselWiring) {
    let view = w.view.clone();
    dom::listen(&w.slider, "mouseenter", move |_| {
        with_view(&view, |v| v.state.pointer_enter());
    });
    let view = w.view.clone();
    dom::listen(&w.slider, "mouseleave", move |_| {
        with_view(&view, |v| v.state.pointer_leave());
    });
}

fn first_touch_screen_x(ev: &web::Event) -> Option<f32> {
    let touch_ev = ev.dyn_ref::<web::TouchEvent>()?;
    let touch = touch_ev.changed_touches().get(0)?;
    Some(touch.screen_x() as f32)
}

fn wire_touch(w: &CarouselWiring) {
    let Some(view) = w.view.upgrade() else {
        return;
    };
    let track = view.borrow().track().clone();
    let swipe = Rc::new(RefCell::new(SwipeTracker::default()));

    let start = swipe.clone();
    dom::listen_passive(&track, "touchstart", move |ev| {
        if let Some(x) = first_touch_screen_x(&ev) {
            start.borrow_mut().begin(x);
        }
    });

    let view = w.view.clone();
    dom::listen_passive(&track, "touchend", move |ev| {
        let Some(x) = first_touch_screen_x(&ev) else {
            return;
        };
        let gesture = swipe.borrow_mut().finish(x);
        if let Some(direction) = gesture {
            navigate(&view, direction);
        }
    });
}

struct ResizeDebounce {
    debouncer: Debouncer,
    pending: Option<i32>,
}

fn wire_resize(w: &CarouselWiring) {
    let state = Rc::new(RefCell::new(ResizeDebounce {
        debouncer: Debouncer::new(RESIZE_DEBOUNCE_MS),
        pending: None,
    }));

    let settle_state = state.clone();
    let settle_window = w.window.clone();
    let view = w.view.clone();
    let settle = Closure::wrap(Box::new(move || {
        let mut s = settle_state.borrow_mut();
        s.pending = None;
        if !s.debouncer.flush() {
            return;
        }
        drop(s);
        let (width, _) = dom::viewport_size(&settle_window);
        with_view(&view, |v| {
            v.state.relayout(width);
            v.render();
        });
    }) as Box<dyn FnMut()>);

    let window = w.window.clone();
    dom::listen(&w.window, "resize", move |_| {
        let mut s = state.borrow_mut();
        s.debouncer.note(dom::now_ms(&window));
        if let Some(h) = s.pending.take() {
            window.clear_timeout_with_handle(h);
        }
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            settle.as_ref().unchecked_ref(),
            s.debouncer.delay_ms() as i32,
        ) {
            Ok(h) => s.pending = Some(h),
            Err(e) => log::warn!("[carousel] setTimeout failed: {:?}", e),
        }
    });
}

fn wire_visibility(w: &CarouselWiring) {
    let view = w.view.clone();
    let document = w.document.clone();
    dom::listen(&w.document, "visibilitychange", move |_| {
        let hidden = document.hidden();
        with_view(&view, |v| v.state.set_page_hidden(hidden));
    });
}
