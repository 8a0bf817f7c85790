use image::RgbImage;

use crate::config::guide_spec::GuideSpec;
use crate::detection::domain::face_detector::FaceDetector;
use crate::guidance::domain::compliance::{ComplianceResult, ComplianceThresholds};
use crate::guidance::domain::overlay_placer::{OverlayPlacement, OverlayPlacer};
use crate::guidance::domain::shoulder_guides::{self, ShoulderGuides};
use crate::shared::geometry::{Rect, Size};

/// One frame's worth of guidance: a placed overlay with live feedback, or a
/// distinct no-face state in which any prior overlay must be hidden.
#[derive(Clone, Debug, PartialEq)]
pub enum GuidanceUpdate {
    Placed {
        overlay: Rect,
        compliance: ComplianceResult,
        shoulders: ShoulderGuides,
    },
    NoFace,
}

/// Continuous framing feedback: detect → rescale to display space → place
/// overlay → estimate shoulder guides.
pub struct GuideFrameUseCase {
    detector: Box<dyn FaceDetector>,
    placer: OverlayPlacer,
}

impl GuideFrameUseCase {
    pub fn new(detector: Box<dyn FaceDetector>, thresholds: ComplianceThresholds) -> Self {
        Self {
            detector,
            placer: OverlayPlacer::new(thresholds),
        }
    }

    /// Detections come back in the frame's own pixel space and are rescaled
    /// to the rendered display size before placement, so overlay and guides
    /// are display-space values ready to draw.
    pub fn execute(
        &mut self,
        frame: &RgbImage,
        display: Size,
        spec: &GuideSpec,
    ) -> Result<GuidanceUpdate, Box<dyn std::error::Error>> {
        let Some(detection) = self.detector.detect(frame)? else {
            log::debug!("no face in frame");
            return Ok(GuidanceUpdate::NoFace);
        };

        let detection = detection.rescale(Size::of_image(frame), display);
        let OverlayPlacement {
            overlay,
            compliance,
        } = self.placer.place(&detection, display, spec);
        let shoulders = shoulder_guides::estimate(&detection.bounding_box);

        log::debug!(
            "overlay at ({:.1}, {:.1}), status {}",
            overlay.x,
            overlay.y,
            compliance.status
        );
        Ok(GuidanceUpdate::Placed {
            overlay,
            compliance,
            shoulders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::domain::compliance::ComplianceStatus;
    use crate::shared::face::FaceDetection;
    use approx::assert_relative_eq;

    struct StubDetector {
        detection: Option<FaceDetection>,
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &mut self,
            _image: &RgbImage,
        ) -> Result<Option<FaceDetection>, Box<dyn std::error::Error>> {
            Ok(self.detection.clone())
        }
    }

    fn use_case(detection: Option<FaceDetection>) -> GuideFrameUseCase {
        GuideFrameUseCase::new(
            Box::new(StubDetector { detection }),
            ComplianceThresholds::default(),
        )
    }

    fn spec() -> GuideSpec {
        GuideSpec {
            aspect_ratio: 35.0 / 45.0,
            face_scale_height: 0.75,
            face_offset_top_ratio: 0.10,
        }
    }

    #[test]
    fn test_no_face_yields_distinct_state() {
        let mut uc = use_case(None);
        let update = uc
            .execute(&RgbImage::new(64, 48), Size::new(640.0, 480.0), &spec())
            .unwrap();
        assert_eq!(update, GuidanceUpdate::NoFace);
    }

    #[test]
    fn test_detection_rescaled_from_frame_to_display_space() {
        // Face box in a 160x120 frame; display is 4x larger on both axes.
        let detection = FaceDetection::new(Rect::new(40.0, 20.0, 40.0, 50.0), None);
        let mut uc = use_case(Some(detection));

        let update = uc
            .execute(&RgbImage::new(160, 120), Size::new(640.0, 480.0), &spec())
            .unwrap();

        let GuidanceUpdate::Placed {
            overlay, shoulders, ..
        } = update
        else {
            panic!("expected placed overlay");
        };
        // Scaled face: x 160, y 80, w 160, h 200; overlay centered on 240.
        let overlay_width = 480.0 * (35.0 / 45.0);
        assert_relative_eq!(overlay.x, 240.0 - overlay_width / 2.0, epsilon = 1e-9);
        // Shoulders follow the display-space face: bottom 280 + 20 offset.
        assert_relative_eq!(shoulders.top_y, 300.0);
    }

    #[test]
    fn test_compliance_propagates() {
        // A face framed far too small anywhere in the display is not green.
        let detection = FaceDetection::new(Rect::new(300.0, 200.0, 30.0, 40.0), None);
        let mut uc = use_case(Some(detection));

        let update = uc
            .execute(&RgbImage::new(640, 480), Size::new(640.0, 480.0), &spec())
            .unwrap();

        let GuidanceUpdate::Placed { compliance, .. } = update else {
            panic!("expected placed overlay");
        };
        assert_eq!(compliance.status, ComplianceStatus::Red);
        assert!(compliance.message.contains("Move closer."));
    }
}
