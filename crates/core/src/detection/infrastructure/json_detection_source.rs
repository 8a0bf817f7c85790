use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::Deserialize;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::face::{FaceDetection, FaceLandmarks};
use crate::shared::geometry::{Point, Rect, Size};

/// Detector backed by a sidecar file written by an external model run.
///
/// The sidecar records the face box, the optional 68-point landmark array,
/// and the resolution the detector ran at. When that resolution differs from
/// the image handed to [`detect`](FaceDetector::detect), coordinates are
/// rescaled into the image's space. A sidecar with no `box` means the
/// detector saw no face.
///
/// ```json
/// {
///   "box": { "x": 100.0, "y": 50.0, "width": 200.0, "height": 250.0 },
///   "landmarks": [ { "x": 1.0, "y": 2.0 }, ... ],
///   "source_size": { "width": 160.0, "height": 120.0 }
/// }
/// ```
pub struct JsonDetectionSource {
    path: PathBuf,
}

#[derive(Deserialize)]
struct DetectionFile {
    #[serde(rename = "box")]
    bounding_box: Option<Rect>,
    #[serde(default)]
    landmarks: Option<Vec<Point>>,
    #[serde(default)]
    source_size: Option<Size>,
}

impl JsonDetectionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, path: &Path) -> Result<DetectionFile, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("failed to read detections {}: {e}", path.display()))?;
        let file: DetectionFile = serde_json::from_str(&json)
            .map_err(|e| format!("invalid detection file {}: {e}", path.display()))?;
        Ok(file)
    }
}

impl FaceDetector for JsonDetectionSource {
    fn detect(
        &mut self,
        image: &RgbImage,
    ) -> Result<Option<FaceDetection>, Box<dyn std::error::Error>> {
        let file = self.parse(&self.path)?;

        let Some(bounding_box) = file.bounding_box else {
            return Ok(None);
        };

        let landmarks = match file.landmarks {
            Some(points) => Some(FaceLandmarks::new(points)?),
            None => None,
        };

        let mut detection = FaceDetection::new(bounding_box, landmarks);
        if let Some(recorded) = file.source_size {
            let target = Size::of_image(image);
            if recorded != target {
                detection = detection.rescale(recorded, target);
            }
        }

        Ok(Some(detection))
    }
}
