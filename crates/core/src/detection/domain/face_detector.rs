use image::RgbImage;

use crate::shared::face::FaceDetection;

/// Domain interface for single-face detection.
///
/// Implementations wrap an external model and report at most one face per
/// image, with landmarks when the model provides them. Implementations may
/// be stateful (e.g., frame skipping), hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, image: &RgbImage)
        -> Result<Option<FaceDetection>, Box<dyn std::error::Error>>;
}

/// Tuning knobs owned by the external detector.
///
/// Opaque to the geometry engine: carried through from the configuration
/// layer to whatever model implementation is plugged in, never interpreted
/// here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorOptions {
    pub input_size: u32,
    pub score_threshold: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            input_size: 416,
            score_threshold: 0.5,
        }
    }
}
