#![cfg(target_arch = "wasm32")]

use folio_web::mount_carousel;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn build_slider(document: &web_sys::Document, slides: usize) -> web_sys::Element {
    let slider = document.create_element("div").unwrap();
    slider.set_class_name("projects-slider");
    let track = document.create_element("div").unwrap();
    track.set_class_name("slider-track");
    for _ in 0..slides {
        let slide = document.create_element("div").unwrap();
        slide.set_class_name("slide");
        track.append_child(&slide).unwrap();
    }
    slider.append_child(&track).unwrap();
    for class in ["slider-prev", "slider-next"] {
        let button = document.create_element("button").unwrap();
        button.set_class_name(class);
        slider.append_child(&button).unwrap();
    }
    let pagination = document.create_element("div").unwrap();
    pagination.set_class_name("slider-pagination");
    slider.append_child(&pagination).unwrap();
    document.body().unwrap().append_child(&slider).unwrap();
    slider
}

#[wasm_bindgen_test]
fn carousel_mounts_on_synthetic_markup() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();

    // Nothing to mount before the markup exists.
    assert!(mount_carousel(&window, &document).unwrap().is_none());

    let slider = build_slider(&document, 4);
    let view = mount_carousel(&window, &document)
        .unwrap()
        .expect("carousel should mount");

    let dots = document.query_selector_all(".pagination-dot").unwrap();
    assert_eq!(dots.length(), 4);
    let first = dots.item(0).unwrap().dyn_into::<web_sys::Element>().unwrap();
    assert!(first.class_list().contains("active"));
    assert_eq!(
        first.get_attribute("aria-label").as_deref(),
        Some("Go to slide 1")
    );

    let next = slider
        .query_selector(".slider-next")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    next.click();
    assert_eq!(view.borrow().state.current_index(), 1);

    let prev = slider
        .query_selector(".slider-prev")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    prev.click();
    prev.click();
    assert_eq!(view.borrow().state.current_index(), 3);

    let track = slider
        .query_selector(".slider-track")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    let transform = track.style().get_property_value("transform").unwrap();
    assert!(transform.starts_with("translateX(-"), "{transform}");

    slider.remove();
}

#[wasm_bindgen_test]
fn carousel_keeps_working_after_handle_is_dropped() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();

    let slider = build_slider(&document, 3);
    drop(mount_carousel(&window, &document).unwrap().expect("carousel should mount"));

    let track = slider
        .query_selector(".slider-track")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    let before = track.style().get_property_value("transform").unwrap();

    slider
        .query_selector(".slider-next")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
        .click();

    let after = track.style().get_property_value("transform").unwrap();
    assert_ne!(before, after);
    let second = slider
        .query_selector_all(".pagination-dot")
        .unwrap()
        .item(1)
        .unwrap()
        .dyn_into::<web_sys::Element>()
        .unwrap();
    assert!(second.class_list().contains("active"));

    slider.remove();
}
