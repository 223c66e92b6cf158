pub mod animation;
mod app;
mod app_state;
pub mod camera;
mod canvas;
pub mod clock;
pub mod config;
pub mod drawing;
pub mod error;
pub mod math;
pub mod noise;
pub mod palette;
mod renderer;
pub mod rings;
mod state;
mod update_logic;
mod vertex;

// Re-export the main public interface
pub use animation::{AnimationDriver, DriverState, FrameOutcome};
pub use app::run;
pub use camera::OrthographicCamera;
pub use config::Config;
pub use drawing::{DrawingSurface, Rect, StrokeBatch};
pub use error::{Error, Result};
pub use math::{Mat4, Vector};
pub use noise::NoiseField;
pub use vertex::Vertex;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() {
    if let Err(e) = run() {
        log::error!("{e:#}");
    }
}
