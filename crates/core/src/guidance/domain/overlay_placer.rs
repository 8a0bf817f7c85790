use crate::config::guide_spec::GuideSpec;
use crate::guidance::domain::compliance::{
    ComplianceEvaluator, ComplianceResult, ComplianceThresholds,
};
use crate::shared::face::FaceDetection;
use crate::shared::geometry::{clamp_origin, Rect, Size};

/// A placed guide overlay plus the compliance verdict for the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlacement {
    pub overlay: Rect,
    pub compliance: ComplianceResult,
}

/// Positions the guide rectangle over the viewfinder.
///
/// The overlay represents the ideal final crop region: full display height,
/// width from the target aspect ratio, placed so the detected face lands at
/// its ideal spot inside the overlay, then clamped into the display.
pub struct OverlayPlacer {
    evaluator: ComplianceEvaluator,
}

impl OverlayPlacer {
    pub fn new(thresholds: ComplianceThresholds) -> Self {
        Self {
            evaluator: ComplianceEvaluator::new(thresholds),
        }
    }

    /// All coordinates are display space: the detection must already be
    /// rescaled to the rendered viewfinder size.
    pub fn place(
        &self,
        detection: &FaceDetection,
        display: Size,
        spec: &GuideSpec,
    ) -> OverlayPlacement {
        let overlay_height = display.height;
        let overlay_width = overlay_height * spec.aspect_ratio;

        let ideal_offset_top = overlay_height * spec.face_offset_top_ratio;

        let face = &detection.bounding_box;
        // The face top should land ideal_offset_top below the overlay top,
        // horizontally centered.
        let target_y = face.y - ideal_offset_top;
        let target_x = face.center_x() - overlay_width / 2.0;

        let overlay = Rect::new(
            clamp_origin(target_x, display.width, overlay_width),
            clamp_origin(target_y, display.height, overlay_height),
            overlay_width,
            overlay_height,
        );

        let compliance = self.evaluator.evaluate(detection, &overlay, spec);
        OverlayPlacement {
            overlay,
            compliance,
        }
    }
}
