use crate::shared::geometry::Rect;

/// Gap between the face bottom and the upper guide line, as a fraction of
/// the face height.
const SHOULDER_OFFSET_RATIO: f64 = 0.1;

/// Thickness of the guided shoulder band, as a fraction of the face height.
const GUIDE_BAND_RATIO: f64 = 0.05;

/// Horizontal guide lines marking where the shoulders should sit,
/// in the same coordinate space as the face box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShoulderGuides {
    pub top_y: f64,
    pub bottom_y: f64,
}

/// Estimates the shoulder band below a detected face box.
pub fn estimate(face_box: &Rect) -> ShoulderGuides {
    let top_y = face_box.bottom() + face_box.height * SHOULDER_OFFSET_RATIO;
    let bottom_y = top_y + face_box.height * GUIDE_BAND_RATIO;
    ShoulderGuides { top_y, bottom_y }
}
