//! Gesture disambiguation for a 2D canvas: raw pointer and wheel input in,
//! canonical pinch (zoom vs. pan) and wheel events out.
//!
//! The core ([`engine::GestureEngine`] over [`state::contacts`],
//! [`state::pinch`] and [`wheel`]) is pure and host-agnostic; the browser
//! wiring lives in [`components`] and only runs under wasm.

pub mod components;
pub mod engine;
pub mod geom;
pub mod model;
pub mod state;
pub mod util;
pub mod wheel;

pub use engine::{EditorHost, EngineOutput, GestureEngine, PointerInput, WheelOutcome};
pub use model::{CameraSettings, GestureEvent, Modifiers, PinchPayload};
pub use state::pinch::PinchMode;
