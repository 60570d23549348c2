//! Platform-free logic for the folio hero page.
//!
//! Everything here runs on the host so it can be tested with plain
//! `cargo test`; the wasm front end only adds DOM and GPU plumbing.

pub mod camera;
pub mod carousel;
pub mod clock;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod page;
pub mod scene;
pub mod timer;
pub mod uniforms;

pub use camera::*;
pub use carousel::*;
pub use clock::*;
pub use error::SceneError;
pub use frame::*;
pub use scene::*;
pub use timer::*;
