//! Canonical gesture events and the shared configuration/value types the
//! engine emits and consumes. Everything here is an immutable value object;
//! the engine hands these to the host dispatcher and never looks back.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Vec2};

/// Raw modifier-key flags captured from the most recent input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        Self { shift, alt, ctrl, meta }
    }

    /// Platform-normalized "primary modifier held": control, or the
    /// command-equivalent meta key. Pure remap, no state.
    pub fn accel(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Camera configuration the engine reads but never writes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Exponent shaping the zoom response to finger-spread ratio.
    /// 1.0 is linear in the ratio; higher values accelerate wide pinches.
    pub zoom_speed: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { zoom_speed: 1.0 }
    }
}

/// Payload shared by the three pinch variants: centroid, zoom level,
/// centroid delta since the previous tick, and modifier flags.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinchPayload {
    pub point: Point,
    pub zoom: f64,
    pub delta: Vec2,
    pub modifiers: Modifiers,
}

/// High-level event handed to the external dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Two contacts became active; zoom is the level at session start,
    /// delta is zero.
    PinchStart(PinchPayload),
    /// A classified move tick. Zoom tracks the spread while zooming and
    /// stays frozen at the session-start level while panning.
    PinchUpdate(PinchPayload),
    /// Session over. Delta intentionally carries the absolute last centroid
    /// rather than a motion vector, so consumers keep the final position.
    PinchEnd(PinchPayload),
    /// Normalized wheel tick: delta is unit- and sign-canonical.
    Wheel {
        point: Point,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

impl GestureEvent {
    pub fn modifiers(&self) -> Modifiers {
        match self {
            GestureEvent::PinchStart(p)
            | GestureEvent::PinchUpdate(p)
            | GestureEvent::PinchEnd(p) => p.modifiers,
            GestureEvent::Wheel { modifiers, .. } => *modifiers,
        }
    }

    /// Derived "accelerator key held" flag carried by every variant.
    pub fn accel(&self) -> bool {
        self.modifiers().accel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accel_remaps_ctrl_or_meta() {
        assert!(!Modifiers::default().accel());
        assert!(Modifiers::new(false, false, true, false).accel());
        assert!(Modifiers::new(false, false, false, true).accel());
        assert!(!Modifiers::new(true, true, false, false).accel());
    }
}
