use crate::dom;
use crate::frame::{self, SharedAnimator};
use folio_core::pointer_ndc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct SceneWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub animator: SharedAnimator,
}

pub fn wire_scene_handlers(w: SceneWiring) {
    wire_mousemove(&w);
    wire_resize(&w);
}

fn wire_mousemove(w: &SceneWiring) {
    let w = w.clone();
    let target = w.window.clone();
    dom::listen(&target, "mousemove", move |ev| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (vw, vh) = dom::viewport_size(&w.window);
        let ndc = pointer_ndc(
            mouse.client_x() as f32,
            mouse.client_y() as f32,
            vw as f32,
            vh as f32,
        );
        if let Ok(mut a) = w.animator.try_borrow_mut() {
            a.set_pointer_ndc(ndc);
        }
    });
}

fn wire_resize(w: &SceneWiring) {
    let w = w.clone();
    let target = w.window.clone();
    dom::listen(&target, "resize", move |_| {
        let (vw, vh) = dom::viewport_size(&w.window);
        if let Ok(mut a) = w.animator.try_borrow_mut() {
            a.resize(vw as f32, vh as f32, w.window.device_pixel_ratio());
        }
        frame::sync_canvas(&w.window, &w.canvas);
    });
}
