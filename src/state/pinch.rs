//! Two-contact pinch session: decides zoom vs. pan from relative motion.
//!
//! The session is one owned value, created when the second contact lands and
//! replaced wholesale when it ends, so the whole machine reads as a single
//! transition function over (session, move) pairs.

use crate::geom::{Point, Vec2};
use crate::model::{CameraSettings, GestureEvent, Modifiers, PinchPayload};
use crate::state::contacts::Contact;

/// Finger spread (px) that commits an undecided session to zooming.
const SPREAD_TO_ZOOM: f64 = 24.0;
/// Centroid drift (px) that commits an undecided session to panning.
const DRIFT_TO_PAN: f64 = 16.0;
/// Spread (px) needed to override an established pan. Deliberately much
/// higher than `SPREAD_TO_ZOOM`: jitter on a steady pan must not read as a
/// zoom.
const SPREAD_OVERRIDES_PAN: f64 = 64.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinchMode {
    #[default]
    Undecided,
    Zooming,
    Panning,
}

/// State for one pinch session, alive while two contacts are down.
#[derive(Clone, Copy, Debug)]
pub struct PinchSession {
    mode: PinchMode,
    init_distance: f64,
    init_zoom: f64,
    current_distance: f64,
    init_centroid: Point,
    prev_centroid: Point,
}

impl PinchSession {
    /// Opens a session from the two contacts and the editor's current zoom.
    /// Returns the session plus the `PinchStart` to dispatch.
    pub fn begin(a: &Contact, b: &Contact, zoom: f64) -> (Self, GestureEvent) {
        let centroid = a.position.midpoint(b.position);
        // Floor the span so the scale ratio stays finite even if both
        // contacts report the same pixel.
        let distance = a.position.distance_to(b.position).max(1.0);
        let session = Self {
            mode: PinchMode::Undecided,
            init_distance: distance,
            init_zoom: zoom,
            current_distance: distance,
            init_centroid: centroid,
            prev_centroid: centroid,
        };
        let event = GestureEvent::PinchStart(PinchPayload {
            point: centroid,
            zoom,
            delta: Vec2::default(),
            modifiers: b.modifiers,
        });
        (session, event)
    }

    pub fn mode(&self) -> PinchMode {
        self.mode
    }

    /// Wheel input (or any other gesture source) taking over: stop
    /// classifying, but leave the session alive — its lifetime is keyed off
    /// contact count, not mode.
    pub fn interrupt(&mut self) {
        self.mode = PinchMode::Undecided;
    }

    /// One move tick while both contacts are down. Emits an update while the
    /// session is classified, nothing while it is still ambiguous.
    pub fn update(
        &mut self,
        a: &Contact,
        b: &Contact,
        settings: CameraSettings,
        modifiers: Modifiers,
    ) -> Option<GestureEvent> {
        let centroid = a.position.midpoint(b.position);
        self.current_distance = a.position.distance_to(b.position);
        let delta = centroid.delta_from(self.prev_centroid);
        self.prev_centroid = centroid;
        self.classify();

        let zoom = match self.mode {
            PinchMode::Zooming => self.final_zoom(settings),
            PinchMode::Panning => self.init_zoom,
            PinchMode::Undecided => return None,
        };
        Some(GestureEvent::PinchUpdate(PinchPayload {
            point: centroid,
            zoom,
            delta,
            modifiers,
        }))
    }

    /// Mode transition for the current geometry. `Zooming` is terminal for
    /// the session; `Panning` can still upgrade, against a higher bar.
    fn classify(&mut self) {
        let touch_spread = (self.current_distance - self.init_distance).abs();
        let origin_drift = self.init_centroid.distance_to(self.prev_centroid);
        self.mode = match self.mode {
            PinchMode::Zooming => PinchMode::Zooming,
            PinchMode::Undecided => {
                if touch_spread > SPREAD_TO_ZOOM {
                    PinchMode::Zooming
                } else if origin_drift > DRIFT_TO_PAN {
                    PinchMode::Panning
                } else {
                    PinchMode::Undecided
                }
            }
            PinchMode::Panning => {
                if touch_spread > SPREAD_OVERRIDES_PAN {
                    PinchMode::Zooming
                } else {
                    PinchMode::Panning
                }
            }
        };
    }

    /// Zoom implied by the latest spread, on the configured power-law curve.
    fn final_zoom(&self, settings: CameraSettings) -> f64 {
        let scale = self.current_distance / self.init_distance;
        self.init_zoom * scale.powf(settings.zoom_speed)
    }

    /// Closes the session when a contact lifts. The terminal zoom is always
    /// spread-derived — a pan-then-release still reports a coherent level —
    /// and both point and delta carry the absolute last centroid.
    pub fn finish(&self, settings: CameraSettings, modifiers: Modifiers) -> GestureEvent {
        let last = self.prev_centroid;
        GestureEvent::PinchEnd(PinchPayload {
            point: last,
            zoom: self.final_zoom(settings),
            delta: Vec2::new(last.x, last.y),
            modifiers,
        })
    }
}
