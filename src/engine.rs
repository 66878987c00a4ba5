//! Gesture engine facade: owns the contact tracker, the live pinch session
//! and the one deferred emission, and turns raw pointer/wheel input into
//! canonical gesture events.
//!
//! Every entry point is a plain `(state, input) -> (state', emission?)`
//! transition; the host layer owns timing (it asks for an animation frame
//! when an output says so and calls [`GestureEngine::frame`] when it fires).

use crate::geom::Point;
use crate::model::{CameraSettings, GestureEvent, Modifiers};
use crate::state::contacts::ContactTracker;
use crate::state::pinch::{PinchMode, PinchSession};
use crate::wheel::{self, EditingRegion, RawWheel};

/// Read-only queries against the editor collaborator. The engine never
/// mutates anything behind this trait.
pub trait EditorHost {
    /// Current editor zoom level.
    fn zoom(&self) -> f64;
    /// Camera configuration (zoom-speed exponent).
    fn camera_settings(&self) -> CameraSettings;
    /// Whether input focus is on the canvas.
    fn is_focused(&self) -> bool;
    /// The shape being edited, if any, for the scroll-exemption check.
    fn editing_region(&self) -> Option<EditingRegion>;
    /// Current canvas-space input point.
    fn input_point(&self) -> Point;
}

/// One raw pointer event, already reduced to what the engine needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub id: i32,
    pub position: Point,
    pub modifiers: Modifiers,
}

/// Result of feeding one pointer event through the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineOutput {
    /// Event to dispatch now, if any.
    pub event: Option<GestureEvent>,
    /// The engine holds a deferred `pinch-end`; the host must request an
    /// animation frame and call [`GestureEngine::frame`] when it fires.
    pub needs_frame: bool,
}

impl EngineOutput {
    fn none() -> Self {
        Self::default()
    }

    fn emit(event: GestureEvent) -> Self {
        Self { event: Some(event), needs_frame: false }
    }
}

/// What the host should do with a raw wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelOutcome {
    /// Focus is elsewhere; not ours, leave browser behavior alone.
    Unfocused,
    /// The edited shape scrolls itself under the pointer; let the browser
    /// handle it natively.
    NativeScroll,
    /// Ours: suppress default handling and propagation. The payload is the
    /// event to dispatch, or `None` when the delta normalized to zero.
    Suppressed(Option<GestureEvent>),
}

#[derive(Debug, Default)]
pub struct GestureEngine {
    contacts: ContactTracker,
    session: Option<PinchSession>,
    /// Identities the live session is bound to.
    session_ids: Option<(i32, i32)>,
    pending_end: Option<GestureEvent>,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down. Opens a pinch session when this contact makes two;
    /// a third (or later) contact never joins a live session.
    pub fn pointer_down(&mut self, host: &dyn EditorHost, input: PointerInput) -> EngineOutput {
        self.contacts.start(input.id, input.position, input.modifiers);
        if self.session.is_none() {
            if let Some(ev) = self.open_session(host) {
                return EngineOutput::emit(ev);
            }
        }
        EngineOutput::none()
    }

    /// Pointer-move. Moves for untracked ids and for contacts outside the
    /// session pair update nothing.
    pub fn pointer_move(&mut self, host: &dyn EditorHost, input: PointerInput) -> EngineOutput {
        if !self.contacts.update(input.id, input.position, input.modifiers) {
            return EngineOutput::none();
        }
        let Some(session) = self.session.as_mut() else {
            return EngineOutput::none();
        };
        let Some((ia, ib)) = self.session_ids else {
            return EngineOutput::none();
        };
        if input.id != ia && input.id != ib {
            return EngineOutput::none();
        }
        let Some((a, b)) = self.contacts.active_pair() else {
            return EngineOutput::none();
        };
        let (a, b) = (*a, *b);
        match session.update(&a, &b, host.camera_settings(), input.modifiers) {
            Some(ev) => EngineOutput::emit(ev),
            None => EngineOutput::none(),
        }
    }

    /// Pointer-up. Ending a session-bound contact closes the session and
    /// defers its `pinch-end` to the next frame; if two contacts survive, a
    /// fresh session opens at once and supersedes that pending end.
    pub fn pointer_up(&mut self, host: &dyn EditorHost, input: PointerInput) -> EngineOutput {
        let in_session = self
            .session_ids
            .is_some_and(|(a, b)| input.id == a || input.id == b);
        // Modifiers for the terminal event come from the finger still down.
        let surviving_mods = self
            .session_ids
            .and_then(|(a, b)| {
                let other = if input.id == a { b } else { a };
                self.contacts.active_pair().and_then(|(ca, cb)| {
                    [ca, cb].into_iter().find(|c| c.id == other).map(|c| c.modifiers)
                })
            })
            .unwrap_or(input.modifiers);

        if !self.contacts.end(input.id) {
            return EngineOutput::none();
        }
        if !in_session {
            return EngineOutput::none();
        }
        let Some(session) = self.session.take() else {
            return EngineOutput::none();
        };
        self.session_ids = None;
        self.pending_end = Some(session.finish(host.camera_settings(), surviving_mods));

        // Re-key immediately if another pair is still down; its start
        // supersedes the pending end.
        if let Some(ev) = self.open_session(host) {
            return EngineOutput { event: Some(ev), needs_frame: false };
        }
        EngineOutput { event: None, needs_frame: true }
    }

    /// Pointer-cancel, same hand-off semantics as an up.
    pub fn pointer_cancel(&mut self, host: &dyn EditorHost, input: PointerInput) -> EngineOutput {
        self.pointer_up(host, input)
    }

    /// Animation-frame tick: releases the deferred `pinch-end`, if one is
    /// still pending and has not been superseded.
    pub fn frame(&mut self) -> Option<GestureEvent> {
        self.pending_end.take()
    }

    /// Raw wheel input. Wheel and touch gestures are mutually exclusive, so
    /// any processed wheel tick resets a live session's mode to undecided
    /// without emitting a `pinch-end`.
    pub fn wheel(&mut self, host: &dyn EditorHost, raw: RawWheel) -> WheelOutcome {
        if !host.is_focused() {
            return WheelOutcome::Unfocused;
        }
        if wheel::is_scroll_exempt(host.editing_region(), host.input_point()) {
            return WheelOutcome::NativeScroll;
        }
        if let Some(session) = self.session.as_mut() {
            session.interrupt();
        }
        let delta = wheel::normalize(&raw);
        if delta.is_zero() {
            return WheelOutcome::Suppressed(None);
        }
        WheelOutcome::Suppressed(Some(GestureEvent::Wheel {
            point: raw.point,
            delta,
            modifiers: raw.modifiers,
        }))
    }

    /// Drops all tracked contacts, the live session and any pending deferred
    /// emission. The host must also cancel its queued animation frame.
    pub fn teardown(&mut self) {
        self.contacts.clear();
        self.session = None;
        self.session_ids = None;
        self.pending_end = None;
    }

    pub fn pinch_mode(&self) -> Option<PinchMode> {
        self.session.as_ref().map(|s| s.mode())
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    fn open_session(&mut self, host: &dyn EditorHost) -> Option<GestureEvent> {
        let (a, b) = self.contacts.active_pair()?;
        let (session, event) = PinchSession::begin(a, b, host.zoom());
        self.session_ids = Some((a.id, b.id));
        self.session = Some(session);
        // A fresh start supersedes any end still waiting on a frame.
        self.pending_end = None;
        Some(event)
    }
}
