//! Browser host for the gesture engine: wires pointer/wheel listeners on a
//! canvas, feeds the engine, and applies the emitted events to a camera.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, WheelEvent};
use yew::prelude::*;

use crate::engine::{EditorHost, GestureEngine, PointerInput, WheelOutcome};
use crate::geom::{Bounds, Point, Vec2};
use crate::model::{CameraSettings, GestureEvent, Modifiers};
use crate::state::Camera;
use crate::util::clog;
use crate::wheel::{EditingRegion, RawWheel, WheelUnit};

const CAMERA_STORE_KEY: &str = "cg_camera";

/// A demo shape in world space. The scrollable one doubles as the edited
/// region so the wheel-exemption path is reachable in the running app.
#[derive(Clone, Copy, Debug)]
struct DemoShape {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    scrollable: bool,
}

/// Read-only editor queries backed by the component's shared cells.
#[derive(Clone)]
struct BrowserHost {
    camera: Rc<RefCell<Camera>>,
    shapes: Rc<RefCell<Vec<DemoShape>>>,
    cursor: Rc<RefCell<Point>>,
    document: web_sys::Document,
}

impl EditorHost for BrowserHost {
    fn zoom(&self) -> f64 {
        self.camera.borrow().zoom
    }

    fn camera_settings(&self) -> CameraSettings {
        CameraSettings::default()
    }

    fn is_focused(&self) -> bool {
        self.document.has_focus().unwrap_or(true)
    }

    fn editing_region(&self) -> Option<EditingRegion> {
        // The demo pins the one scrollable shape as the edited region,
        // with its bounds projected into screen space.
        let cam = self.camera.borrow();
        self.shapes.borrow().iter().find(|s| s.scrollable).map(|s| EditingRegion {
            scrollable: true,
            bounds: Bounds::new(
                s.x * cam.zoom + cam.offset_x,
                s.y * cam.zoom + cam.offset_y,
                (s.x + s.w) * cam.zoom + cam.offset_x,
                (s.y + s.h) * cam.zoom + cam.offset_y,
            ),
        })
    }

    fn input_point(&self) -> Point {
        *self.cursor.borrow()
    }
}

fn modifiers_of(e: &web_sys::MouseEvent) -> Modifiers {
    Modifiers::new(e.shift_key(), e.alt_key(), e.ctrl_key(), e.meta_key())
}

fn pointer_input(e: &PointerEvent) -> PointerInput {
    PointerInput {
        id: e.pointer_id(),
        position: Point::new(e.offset_x() as f64, e.offset_y() as f64),
        modifiers: modifiers_of(e),
    }
}

fn load_camera(window: &web_sys::Window) -> Camera {
    if let Ok(Some(store)) = window.local_storage() {
        if let Ok(Some(raw)) = store.get_item(CAMERA_STORE_KEY) {
            if let Ok(cam) = serde_json::from_str(&raw) {
                return cam;
            }
        }
    }
    Camera::default()
}

fn save_camera(window: &web_sys::Window, cam: &Camera) {
    if let Ok(Some(store)) = window.local_storage() {
        if let Ok(raw) = serde_json::to_string(cam) {
            let _ = store.set_item(CAMERA_STORE_KEY, &raw);
        }
    }
}

fn seed_shapes() -> Vec<DemoShape> {
    let rand_in = |lo: f64, hi: f64| lo + js_sys::Math::random() * (hi - lo);
    let mut shapes = Vec::with_capacity(12);
    for i in 0..12 {
        shapes.push(DemoShape {
            x: rand_in(-500.0, 500.0),
            y: rand_in(-400.0, 400.0),
            w: rand_in(60.0, 180.0),
            h: rand_in(40.0, 140.0),
            scrollable: i == 0,
        });
    }
    shapes
}

#[function_component(CanvasView)]
pub fn canvas_view() -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let engine = use_mut_ref(GestureEngine::new);
    let shapes = use_mut_ref(seed_shapes);
    let cursor = use_mut_ref(Point::default);

    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let engine = engine.clone();
        let shapes = shapes.clone();
        let cursor = cursor.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            *camera.borrow_mut() = load_camera(&window);

            // Keep the browser out of the gesture business on this surface.
            let style = canvas.style();
            let _ = style.set_property("touch-action", "none");
            let _ = style.set_property("user-select", "none");

            let apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
                    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            apply_canvas_size();

            let host = BrowserHost {
                camera: camera.clone(),
                shapes: shapes.clone(),
                cursor: cursor.clone(),
                document: document.clone(),
            };

            let draw: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let engine = engine.clone();
                let shapes = shapes.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
                            Ok(c) => c,
                            Err(_) => return,
                        },
                        None => return,
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let cam = *camera.borrow();
                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    ctx.set_fill_style_str("#0e1116");
                    ctx.fill_rect(0.0, 0.0, w, h);
                    ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, cam.offset_x, cam.offset_y).ok();
                    // dot grid
                    let step = 64.0;
                    let top_left = cam.screen_to_world(Point::new(0.0, 0.0));
                    let bottom_right = cam.screen_to_world(Point::new(w, h));
                    ctx.set_fill_style_str("#2f3641");
                    let mut gx = (top_left.x / step).floor() * step;
                    while gx <= bottom_right.x {
                        let mut gy = (top_left.y / step).floor() * step;
                        while gy <= bottom_right.y {
                            let r = (1.5 / cam.zoom).max(0.5);
                            ctx.fill_rect(gx - r * 0.5, gy - r * 0.5, r, r);
                            gy += step;
                        }
                        gx += step;
                    }
                    for s in shapes.borrow().iter() {
                        ctx.set_fill_style_str(if s.scrollable { "#203a5a" } else { "#1d2430" });
                        ctx.fill_rect(s.x, s.y, s.w, s.h);
                        ctx.set_stroke_style_str(if s.scrollable { "#58a6ff" } else { "#3a4455" });
                        ctx.set_line_width((1.0 / cam.zoom).max(0.001));
                        ctx.stroke_rect(s.x, s.y, s.w, s.h);
                    }
                    // HUD
                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    ctx.set_fill_style_str("#8b949e");
                    ctx.set_font("12px sans-serif");
                    let mode = match engine.borrow().pinch_mode() {
                        Some(m) => format!("{m:?}"),
                        None => "-".to_string(),
                    };
                    let _ = ctx.fill_text(&format!("zoom {:.2}  pinch {mode}", cam.zoom), 10.0, 20.0);
                })
            };

            // Events land on the camera here; the engine never sees it.
            let apply_event = {
                let camera = camera.clone();
                let window = window.clone();
                move |ev: GestureEvent| {
                    let mut cam = camera.borrow_mut();
                    match ev {
                        GestureEvent::PinchStart(_) => {
                            clog("pinch session open");
                        }
                        GestureEvent::PinchUpdate(p) => {
                            cam.zoom_about(p.point, p.zoom);
                            cam.pan_by(p.delta);
                        }
                        GestureEvent::PinchEnd(p) => {
                            cam.zoom_about(p.point, p.zoom);
                            save_camera(&window, &cam);
                            clog("pinch session closed");
                        }
                        GestureEvent::Wheel { point, delta, modifiers } => {
                            if modifiers.accel() {
                                cam.zoom_by(point, (-delta.y * 0.001).exp());
                            } else {
                                cam.pan_by(Vec2::new(-delta.x, -delta.y));
                            }
                        }
                    }
                }
            };

            let pointerdown_cb = {
                let engine = engine.clone();
                let host = host.clone();
                let cursor = cursor.clone();
                let apply_event = apply_event.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    *cursor.borrow_mut() = Point::new(e.offset_x() as f64, e.offset_y() as f64);
                    if e.pointer_type() != "touch" {
                        return; // single-pointer drag/click is owned elsewhere
                    }
                    e.prevent_default();
                    let out = engine.borrow_mut().pointer_down(&host, pointer_input(&e));
                    if let Some(ev) = out.event {
                        apply_event(ev);
                        draw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("pointerdown", pointerdown_cb.as_ref().unchecked_ref())
                .ok();

            let pointermove_cb = {
                let engine = engine.clone();
                let host = host.clone();
                let cursor = cursor.clone();
                let apply_event = apply_event.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    *cursor.borrow_mut() = Point::new(e.offset_x() as f64, e.offset_y() as f64);
                    if e.pointer_type() != "touch" {
                        return;
                    }
                    e.prevent_default();
                    let out = engine.borrow_mut().pointer_move(&host, pointer_input(&e));
                    if let Some(ev) = out.event {
                        apply_event(ev);
                        draw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("pointermove", pointermove_cb.as_ref().unchecked_ref())
                .ok();

            // Up and cancel share one callback; the deferred pinch-end is
            // drained by the frame loop below.
            let pointerup_cb = {
                let engine = engine.clone();
                let host = host.clone();
                let apply_event = apply_event.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    if e.pointer_type() != "touch" {
                        return;
                    }
                    let out = engine.borrow_mut().pointer_up(&host, pointer_input(&e));
                    if let Some(ev) = out.event {
                        apply_event(ev);
                        draw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("pointerup", pointerup_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("pointercancel", pointerup_cb.as_ref().unchecked_ref())
                .ok();

            let wheel_cb = {
                let engine = engine.clone();
                let host = host.clone();
                let cursor = cursor.clone();
                let apply_event = apply_event.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    let point = Point::new(e.offset_x() as f64, e.offset_y() as f64);
                    *cursor.borrow_mut() = point;
                    let raw = RawWheel {
                        delta_x: e.delta_x(),
                        delta_y: e.delta_y(),
                        unit: WheelUnit::from_delta_mode(e.delta_mode()),
                        point,
                        modifiers: modifiers_of(&e),
                    };
                    let outcome = engine.borrow_mut().wheel(&host, raw);
                    match outcome {
                        WheelOutcome::Unfocused | WheelOutcome::NativeScroll => {}
                        WheelOutcome::Suppressed(ev) => {
                            e.prevent_default();
                            e.stop_propagation();
                            if let Some(ev) = ev {
                                apply_event(ev);
                                draw();
                            }
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();

            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                    draw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Frame loop: redraw and release any deferred pinch-end on the
            // frame boundary.
            let raf_id = Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let engine = engine.clone();
                let apply_event = apply_event.clone();
                let draw = draw.clone();
                let window_loop = window.clone();
                let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                let closure_cell_clone = closure_cell.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let deferred = engine.borrow_mut().frame();
                    if let Some(ev) = deferred {
                        apply_event(ev);
                    }
                    draw();
                    if let Ok(id) = window_loop.request_animation_frame(
                        closure_cell_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    ) {
                        *raf_id_clone.borrow_mut() = Some(id);
                    }
                }) as Box<dyn FnMut()>));
                if let Ok(id) = window.request_animation_frame(
                    closure_cell.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            draw();

            let window_clone = window.clone();
            let camera_cleanup = camera.clone();
            let engine_cleanup = engine.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback("pointerdown", pointerdown_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("pointermove", pointermove_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("pointerup", pointerup_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("pointercancel", pointerup_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                // Drop contacts and the pending deferred end before the
                // surface goes away, then keep the last camera.
                engine_cleanup.borrow_mut().teardown();
                save_camera(&window_clone, &camera_cleanup.borrow());
                let _keep_alive = (&pointerdown_cb, &pointermove_cb, &pointerup_cb, &wheel_cb, &resize_cb);
            }
        });
    }

    html! {
        <canvas ref={canvas_ref} tabindex="0" style="display:block;outline:none;" />
    }
}
