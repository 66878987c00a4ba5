//! Host-side camera consuming the emitted gesture events.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Vec2};

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 8.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Camera {
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.offset_x) / self.zoom, (p.y - self.offset_y) / self.zoom)
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset_x += delta.x;
        self.offset_y += delta.y;
    }

    /// Sets the zoom level while keeping the world point under `anchor`
    /// fixed on screen.
    pub fn zoom_about(&mut self, anchor: Point, zoom: f64) {
        let world = self.screen_to_world(anchor);
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset_x = anchor.x - world.x * self.zoom;
        self.offset_y = anchor.y - world.y * self.zoom;
    }

    /// Multiplicative zoom step for wheel-accelerator zooming.
    pub fn zoom_by(&mut self, anchor: Point, factor: f64) {
        let zoom = self.zoom * factor;
        self.zoom_about(anchor, zoom);
    }
}
