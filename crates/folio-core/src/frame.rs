//! Frame tick sources.
//!
//! The animator does not schedule itself. Something implementing
//! [`TickSource`] calls the frame callback once per display refresh:
//! `requestAnimationFrame` in the browser, [`ManualTicks`] in tests.

pub type FrameCallback = Box<dyn FnMut()>;

pub trait TickSource {
    /// Install `on_frame` and begin ticking. Replaces any earlier callback.
    fn start(&mut self, on_frame: FrameCallback);
}

/// Tick source that only advances when [`ManualTicks::tick`] is called.
#[derive(Default)]
pub struct ManualTicks {
    on_frame: Option<FrameCallback>,
    frames: u64,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Returns false if nothing has been installed.
    pub fn tick(&mut self) -> bool {
        match self.on_frame.as_mut() {
            Some(f) => {
                f();
                self.frames += 1;
                true
            }
            None => false,
        }
    }

    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            if !self.tick() {
                break;
            }
        }
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self, on_frame: FrameCallback) {
        self.on_frame = Some(on_frame);
    }
}
