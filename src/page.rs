//! Scroll reveal, smooth in-page scrolling and the navbar tint.

use crate::constants::{ANCHOR_LINK_SELECTOR, NAVBAR_SELECTOR, REVEAL_CLASS, VISIBLE_CLASS};
use crate::dom;
use folio_core::page::{anchor_target_id, navbar_background, RevealOptions, REVEAL_SELECTOR};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn init(window: &web::Window, document: &web::Document) {
    if let Err(e) = init_scroll_reveal(document) {
        log::warn!("[page] scroll reveal disabled: {:?}", e);
    }
    init_smooth_scroll(document);
    init_navbar(window, document);
}

fn init_scroll_reveal(document: &web::Document) -> anyhow::Result<()> {
    let targets = dom::query_all_in_document(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }
    for el in &targets {
        _ = el.class_list().add_1(REVEAL_CLASS);
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    _ = target.class_list().add_1(VISIBLE_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let opts = RevealOptions::default();
    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(opts.threshold));
    init.set_root_margin(opts.root_margin);
    let observer = web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    )
    .map_err(dom::js_err)?;
    callback.forget();

    for el in &targets {
        observer.observe(el);
    }
    log::info!("[page] reveal observing {} elements", targets.len());
    Ok(())
}

fn init_smooth_scroll(document: &web::Document) {
    for anchor in dom::query_all_in_document(document, ANCHOR_LINK_SELECTOR) {
        let doc = document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |ev| {
            ev.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_target_id(&href).and_then(|id| doc.get_element_by_id(id))
            else {
                return;
            };
            let opts = web::ScrollIntoViewOptions::new();
            opts.set_behavior(web::ScrollBehavior::Smooth);
            opts.set_block(web::ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&opts);
        });
    }
}

fn init_navbar(window: &web::Window, document: &web::Document) {
    let Some(navbar) = document
        .query_selector(NAVBAR_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    let win = window.clone();
    dom::listen(window, "scroll", move |_| {
        let y = win.scroll_y().unwrap_or(0.0);
        _ = navbar.style().set_property("background", navbar_background(y));
    });
}
