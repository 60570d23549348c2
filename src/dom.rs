use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Run `f` once the DOM is parsed.
pub fn on_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let mut f = Some(f);
    let closure = Closure::wrap(Box::new(move || {
        if let Some(f) = f.take() {
            f();
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach a listener for the page lifetime.
pub fn listen(target: &web::EventTarget, kind: &str, handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] could not listen for {}: {:?}", kind, e);
    }
    closure.forget();
}

/// Like [`listen`], but marked passive so touch scrolling is never blocked.
pub fn listen_passive(
    target: &web::EventTarget,
    kind: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &opts,
    ) {
        log::warn!("[dom] could not listen for {}: {:?}", kind, e);
    }
    closure.forget();
}

pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    node_list_elements(root.query_selector_all(selector).ok())
}

pub fn query_all_in_document(document: &web::Document, selector: &str) -> Vec<web::Element> {
    node_list_elements(document.query_selector_all(selector).ok())
}

fn node_list_elements(list: Option<web::NodeList>) -> Vec<web::Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// CSS viewport size in pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn now_ms(window: &web::Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Size the canvas backing store to the viewport at `pixel_ratio`.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, pixel_ratio: f32) {
    if let Some(w) = web::window() {
        let (css_w, css_h) = viewport_size(&w);
        let w_px = (css_w * pixel_ratio as f64) as u32;
        let h_px = (css_h * pixel_ratio as f64) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
