//! Wheel delta normalization across device/browser reporting quirks.

use crate::geom::{Bounds, Point, Vec2};
use crate::model::Modifiers;

/// Pixels per line-unit wheel step (mice reporting DOM_DELTA_LINE).
const LINE_PX: f64 = 40.0;
/// Pixels per page-unit wheel step (DOM_DELTA_PAGE).
const PAGE_PX: f64 = 800.0;

/// Unit hint carried by a raw wheel event, per the DOM deltaMode constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WheelUnit {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelUnit {
    /// Maps the DOM `deltaMode` value; unknown values read as pixels.
    pub fn from_delta_mode(mode: u32) -> Self {
        match mode {
            1 => WheelUnit::Line,
            2 => WheelUnit::Page,
            _ => WheelUnit::Pixel,
        }
    }

    fn scale(self) -> f64 {
        match self {
            WheelUnit::Pixel => 1.0,
            WheelUnit::Line => LINE_PX,
            WheelUnit::Page => PAGE_PX,
        }
    }
}

/// A raw wheel event as the host layer reads it off the browser.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawWheel {
    pub delta_x: f64,
    pub delta_y: f64,
    pub unit: WheelUnit,
    pub point: Point,
    pub modifiers: Modifiers,
}

/// Canonical pixel-space delta for a raw wheel event. A (0, 0) result means
/// the event carried no usable motion and should be dropped.
pub fn normalize(raw: &RawWheel) -> Vec2 {
    let s = raw.unit.scale();
    Vec2::new(raw.delta_x * s, raw.delta_y * s)
}

/// The shape currently being edited, as far as wheel exemption cares:
/// whether it scrolls its own content, and its page-space bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditingRegion {
    pub scrollable: bool,
    pub bounds: Bounds,
}

/// True when the browser should keep the wheel event: the edited shape
/// scrolls independently and the current input point is inside its bounds.
/// Missing region or point outside fails open to normal processing.
pub fn is_scroll_exempt(region: Option<EditingRegion>, point: Point) -> bool {
    match region {
        Some(r) => r.scrollable && r.bounds.contains(point),
        None => false,
    }
}
