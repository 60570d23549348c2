//! requestAnimationFrame loop and per-frame work for the hero canvas.

use crate::dom;
use crate::render;
use folio_core::{FrameCallback, InstantClock, SceneAnimator, TickSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedAnimator = Rc<RefCell<SceneAnimator<InstantClock>>>;

/// [`TickSource`] driven by `requestAnimationFrame`. The loop runs for the
/// lifetime of the page.
pub struct RafTicks {
    window: web::Window,
}

impl RafTicks {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl TickSource for RafTicks {
    fn start(&mut self, mut on_frame: FrameCallback) {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let window = self.window.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            on_frame();
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = tick.borrow().as_ref() {
            _ = self
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

pub struct FrameContext {
    pub animator: SharedAnimator,
    pub gpu: render::GpuState<'static>,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let Ok(mut animator) = self.animator.try_borrow_mut() else {
            return;
        };
        animator.update();
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = self.gpu.render(animator.scene()) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    animator: &SharedAnimator,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let scene = animator.borrow().scene().clone();
    match render::GpuState::new(leaked_canvas, &scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Install the frame callback on `ticks`.
pub fn start_loop(ticks: &mut impl TickSource, ctx: FrameContext) {
    let ctx = Rc::new(RefCell::new(ctx));
    ticks.start(Box::new(move || ctx.borrow_mut().frame()));
}

/// Keep the canvas backing store sized to the viewport at the clamped
/// device pixel ratio.
pub fn sync_canvas(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let ratio = folio_core::clamp_pixel_ratio(window.device_pixel_ratio());
    dom::sync_canvas_backing_size(canvas, ratio);
}
