//! End-to-end gesture sequences through the public engine API, with a
//! recording dispatcher standing in for the editor.

use canvas_gestures::engine::{EditorHost, GestureEngine, PointerInput, WheelOutcome};
use canvas_gestures::geom::{Bounds, Point};
use canvas_gestures::model::{CameraSettings, GestureEvent, Modifiers};
use canvas_gestures::wheel::{EditingRegion, RawWheel};
use canvas_gestures::PinchMode;

struct Host {
    zoom: f64,
    settings: CameraSettings,
    focused: bool,
    region: Option<EditingRegion>,
    point: Point,
}

impl Default for Host {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            settings: CameraSettings::default(),
            focused: true,
            region: None,
            point: Point::default(),
        }
    }
}

impl EditorHost for Host {
    fn zoom(&self) -> f64 {
        self.zoom
    }
    fn camera_settings(&self) -> CameraSettings {
        self.settings
    }
    fn is_focused(&self) -> bool {
        self.focused
    }
    fn editing_region(&self) -> Option<EditingRegion> {
        self.region
    }
    fn input_point(&self) -> Point {
        self.point
    }
}

/// Drives the engine and records every dispatched event, draining the
/// deferred emission the way a frame tick would.
struct Harness {
    engine: GestureEngine,
    host: Host,
    events: Vec<GestureEvent>,
}

impl Harness {
    fn new(host: Host) -> Self {
        Self {
            engine: GestureEngine::new(),
            host,
            events: Vec::new(),
        }
    }

    fn input(id: i32, x: f64, y: f64) -> PointerInput {
        PointerInput {
            id,
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    fn down(&mut self, id: i32, x: f64, y: f64) {
        let out = self.engine.pointer_down(&self.host, Self::input(id, x, y));
        self.events.extend(out.event);
    }

    fn mv(&mut self, id: i32, x: f64, y: f64) {
        let out = self.engine.pointer_move(&self.host, Self::input(id, x, y));
        self.events.extend(out.event);
    }

    fn up(&mut self, id: i32, x: f64, y: f64) {
        let out = self.engine.pointer_up(&self.host, Self::input(id, x, y));
        self.events.extend(out.event);
        if out.needs_frame {
            self.frame();
        }
    }

    fn frame(&mut self) {
        self.events.extend(self.engine.frame());
    }

    fn starts(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, GestureEvent::PinchStart(_))).count()
    }

    fn updates(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, GestureEvent::PinchUpdate(_))).count()
    }

    fn ends(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, GestureEvent::PinchEnd(_))).count()
    }
}

#[test]
fn session_emits_one_start_and_one_end() {
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(2, 140.0, 0.0);
    h.mv(2, 160.0, 0.0);
    h.up(2, 160.0, 0.0);
    assert_eq!(h.starts(), 1);
    assert_eq!(h.ends(), 1);
    assert!(h.updates() >= 1);
}

#[test]
fn undecided_throughout_yields_zero_updates() {
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    // spread stays within 24px, centroid within 16px of start
    h.mv(2, 110.0, 0.0);
    h.mv(2, 95.0, 0.0);
    h.mv(1, 5.0, 5.0);
    h.up(1, 5.0, 5.0);
    assert_eq!(h.starts(), 1);
    assert_eq!(h.updates(), 0);
    assert_eq!(h.ends(), 1);
}

#[test]
fn zooming_never_reverts_within_a_session() {
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(2, 150.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Zooming));
    // big translation, spread back to the start value
    h.mv(1, 300.0, 300.0);
    h.mv(2, 400.0, 300.0);
    h.mv(1, 301.0, 300.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Zooming));
    let frozen: Vec<_> = h
        .events
        .iter()
        .filter_map(|e| match e {
            GestureEvent::PinchUpdate(p) => Some(p.zoom),
            _ => None,
        })
        .collect();
    // every update after classification reports a spread-derived zoom
    assert!(frozen.iter().all(|z| z.is_finite()));
}

#[test]
fn threshold_boundaries_are_strict() {
    // exactly 24px of spread: still undecided
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(2, 124.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Undecided));
    h.mv(2, 124.5, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Zooming));

    // exactly 16px of drift: still undecided; just past it: panning
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(1, 16.0, 0.0);
    h.mv(2, 116.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Undecided));
    h.mv(1, 17.0, 0.0);
    h.mv(2, 117.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Panning));

    // spread between 16 and 64 keeps the pan; past 64 commits to zoom
    h.mv(2, 177.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Panning));
    h.mv(2, 182.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Zooming));
}

#[test]
fn reference_zoom_computation() {
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(2, 150.0, 0.0);
    let zoom = h
        .events
        .iter()
        .rev()
        .find_map(|e| match e {
            GestureEvent::PinchUpdate(p) => Some(p.zoom),
            _ => None,
        })
        .unwrap();
    assert!((zoom - 1.5).abs() < 1e-12);
}

#[test]
fn wheel_exemption_depends_on_bounds() {
    let region = EditingRegion {
        scrollable: true,
        bounds: Bounds::new(0.0, 0.0, 100.0, 100.0),
    };
    let inside = Host {
        region: Some(region),
        point: Point::new(40.0, 40.0),
        ..Default::default()
    };
    let mut engine = GestureEngine::new();
    let raw = RawWheel { delta_y: 3.0, ..Default::default() };
    assert_eq!(engine.wheel(&inside, raw), WheelOutcome::NativeScroll);

    let outside = Host {
        region: Some(region),
        point: Point::new(140.0, 40.0),
        ..Default::default()
    };
    assert!(matches!(engine.wheel(&outside, raw), WheelOutcome::Suppressed(Some(_))));
}

#[test]
fn wheel_interrupts_panning_without_an_end() {
    let mut h = Harness::new(Host::default());
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    h.mv(1, 20.0, 0.0);
    h.mv(2, 120.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Panning));

    let raw = RawWheel { delta_y: 3.0, ..Default::default() };
    match h.engine.wheel(&h.host, raw) {
        WheelOutcome::Suppressed(Some(ev)) => h.events.push(ev),
        other => panic!("expected a suppressed wheel event, got {other:?}"),
    }
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Undecided));
    assert_eq!(h.ends(), 0);
    h.frame();
    assert_eq!(h.ends(), 0);
}

#[test]
fn untracked_identities_never_emit() {
    let mut h = Harness::new(Host::default());
    h.mv(5, 10.0, 10.0);
    h.up(5, 10.0, 10.0);
    h.up(5, 10.0, 10.0);
    assert!(h.events.is_empty());
    assert_eq!(h.engine.contact_count(), 0);
}

#[test]
fn pan_then_release_reports_a_coherent_terminal_zoom() {
    let mut h = Harness::new(Host { zoom: 2.0, ..Default::default() });
    h.down(1, 0.0, 0.0);
    h.down(2, 100.0, 0.0);
    // establish a pan, then quietly widen the spread below the override bar
    h.mv(1, 20.0, 0.0);
    h.mv(2, 120.0, 0.0);
    h.mv(2, 170.0, 0.0);
    assert_eq!(h.engine.pinch_mode(), Some(PinchMode::Panning));
    h.up(1, 20.0, 0.0);
    let end = h
        .events
        .iter()
        .find_map(|e| match e {
            GestureEvent::PinchEnd(p) => Some(*p),
            _ => None,
        })
        .unwrap();
    // spread 150/100 against init zoom 2.0
    assert!((end.zoom - 3.0).abs() < 1e-12);
    // point and delta both carry the final centroid
    assert_eq!(end.point.x, end.delta.x);
    assert_eq!(end.point.y, end.delta.y);
}
