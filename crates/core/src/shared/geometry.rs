use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in some pixel coordinate space.
///
/// Display space (the rendered viewfinder) and source space (the captured
/// frame) must never be mixed without an explicit rescale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative rect extent");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Overlapping area with `other`, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Rect {
        Rect::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }
}

/// A 2D point, same coordinate-space rule as [`Rect`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Point {
        Point::new(self.x * sx, self.y * sy)
    }
}

/// Width/height of a display area or source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn of_image(image: &image::RgbImage) -> Self {
        Self::new(f64::from(image.width()), f64::from(image.height()))
    }
}

/// Clamps an origin so `[origin, origin + extent]` stays inside
/// `[0, available]` where possible.
///
/// Computes the unclamped target first, then `max(0, min(target,
/// available - extent))`. When `extent > available` the origin is exactly 0
/// and the span overshoots the far edge.
pub fn clamp_origin(target: f64, available: f64, extent: f64) -> f64 {
    target.min(available - extent).max(0.0)
}
