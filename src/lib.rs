//! Pointer- and scroll-reactive "neural noise" background for a canvas.
//!
//! The platform-independent core (setup, animation state, frame chain) builds
//! on any target; the browser bindings in `wasm` only compile for wasm32.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod animation;
pub mod color;
pub mod error;
pub mod events;
pub mod frame;
pub mod gl;
pub mod options;
pub mod setup;
pub mod uniforms;

#[cfg(test)]
mod testing;

pub use animation::{Animation, Surface};
pub use color::{ColorInput, Rgb};
pub use error::{Error, Result};
pub use options::{Options, Settings};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod context;
    mod convert;
    mod listeners;
    mod render;

    pub use render::{create_neural_animation, NeuralAnimation};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // A page may instantiate the module more than once; keep the first subscriber.
        let _ = tracing_wasm::try_set_as_global_default();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_neural_animation, NeuralAnimation};
