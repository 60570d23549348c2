#![cfg(target_arch = "wasm32")]
use folio_core::{InstantClock, SceneAnimator, SceneConfig};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod carousel;
mod constants;
mod dom;
mod events;
mod frame;
mod page;
mod render;

pub use carousel::{mount as mount_carousel, CarouselView, SharedCarousel};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    let Some(window) = web::window() else {
        return Err(JsValue::from_str("no window"));
    };
    let Some(document) = window.document() else {
        return Err(JsValue::from_str("no document"));
    };

    let doc = document.clone();
    dom::on_ready(&document, move || {
        page::init(&window, &doc);
        match carousel::mount(&window, &doc) {
            Ok(Some(view)) => {
                let slides = view.borrow().state.slide_count();
                log::info!("[carousel] mounted with {} slides", slides);
            }
            Ok(None) => log::info!("[carousel] not present, skipped"),
            Err(e) => log::error!("[carousel] mount error: {:?}", e),
        }
        spawn_local(async move {
            if let Err(e) = init_scene(window, doc).await {
                log::error!("[scene] init error: {:?}", e);
            }
        });
    });
    Ok(())
}

async fn init_scene(window: web::Window, document: web::Document) -> anyhow::Result<()> {
    let Some(canvas_el) = document.get_element_by_id(constants::HERO_CANVAS_ID) else {
        log::info!("[scene] no #{} on this page, skipped", constants::HERO_CANVAS_ID);
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    frame::sync_canvas(&window, &canvas);

    let (vw, vh) = dom::viewport_size(&window);
    let config = SceneConfig {
        viewport: Vec2::new(vw.max(1.0) as f32, vh.max(1.0) as f32),
        pixel_ratio: folio_core::clamp_pixel_ratio(window.device_pixel_ratio()),
        ..SceneConfig::default()
    };
    let animator = SceneAnimator::new(&config, InstantClock::new())
        .map_err(|e| anyhow::anyhow!("scene config rejected: {}", e))?;
    let animator = Rc::new(RefCell::new(animator));

    let Some(gpu) = frame::init_gpu(&canvas, &animator).await else {
        log::warn!("[scene] no GPU, hero scene disabled");
        return Ok(());
    };

    events::pointer::wire_scene_handlers(events::pointer::SceneWiring {
        window: window.clone(),
        canvas: canvas.clone(),
        animator: animator.clone(),
    });

    let mut ticks = frame::RafTicks::new(window);
    frame::start_loop(
        &mut ticks,
        frame::FrameContext {
            animator,
            gpu,
            canvas,
        },
    );
    Ok(())
}
