//! Face detection result types shared by the guidance and cropping layers.
//!
//! Landmarks follow the 68-point anatomical convention used by the upstream
//! detector; only three fixed indices are consumed here (nose tip and the
//! two outer eye corners) for the rough yaw/pitch heuristics.

use crate::shared::geometry::{Point, Rect, Size};

/// Number of landmark points in the fixed anatomical convention.
pub const LANDMARK_COUNT: usize = 68;

pub const NOSE_TIP: usize = 30;
pub const LEFT_EYE_OUTER: usize = 36;
pub const RIGHT_EYE_OUTER: usize = 45;

/// Ordered 68-point facial landmarks associated with one detection.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Point>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Point>) -> Result<Self, &'static str> {
        if points.len() != LANDMARK_COUNT {
            return Err("landmarks must have exactly 68 points");
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn nose_tip(&self) -> Point {
        self.points[NOSE_TIP]
    }

    /// Horizontal midpoint between the outer eye corners.
    ///
    /// A straight head puts the nose tip on this line; the offset between
    /// the two is the yaw heuristic.
    pub fn eye_midpoint_x(&self) -> f64 {
        (self.points[LEFT_EYE_OUTER].x + self.points[RIGHT_EYE_OUTER].x) / 2.0
    }

    fn scaled(&self, sx: f64, sy: f64) -> FaceLandmarks {
        FaceLandmarks {
            points: self.points.iter().map(|p| p.scaled(sx, sy)).collect(),
        }
    }
}

/// One face detection: bounding box plus optional landmarks.
///
/// Produced once per detector invocation and never mutated; the coordinate
/// space is whatever the detector ran at until [`FaceDetection::rescale`]
/// maps it elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    pub bounding_box: Rect,
    pub landmarks: Option<FaceLandmarks>,
}

impl FaceDetection {
    pub fn new(bounding_box: Rect, landmarks: Option<FaceLandmarks>) -> Self {
        Self {
            bounding_box,
            landmarks,
        }
    }

    /// Maps the detection from one coordinate space into another, e.g. from
    /// the downscaled resolution the detector ran at to the display size of
    /// the viewfinder.
    pub fn rescale(&self, from: Size, to: Size) -> FaceDetection {
        let sx = to.width / from.width;
        let sy = to.height / from.height;
        FaceDetection {
            bounding_box: self.bounding_box.scaled(sx, sy),
            landmarks: self.landmarks.as_ref().map(|lm| lm.scaled(sx, sy)),
        }
    }
}
