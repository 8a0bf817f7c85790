//! Framing compliance checks for the live guide overlay.
//!
//! Five checks run in a fixed order (horizontal center, vertical head-top,
//! face scale, yaw, pitch); each compares a deviation magnitude against its
//! allowed bound. The yaw/pitch checks are rough landmark heuristics, not a
//! calibrated pose estimator.

use std::fmt;

use crate::config::guide_spec::GuideSpec;
use crate::shared::face::FaceDetection;
use crate::shared::geometry::Rect;

/// Deviation bounds for the framing checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplianceThresholds {
    /// Center deviation allowed, as a fraction of the overlay dimension.
    pub center_deviation_ratio: f64,
    /// Face-height deviation allowed, as a fraction of the ideal face height.
    pub scale_deviation_ratio: f64,
    /// Carried for parity with the tuning table; no check consumes it.
    /// The pixel-space yaw/pitch checks stand in for an angle measure.
    pub head_tilt_degrees: f64,
    /// A deviation beyond `bound * multiplier` escalates yellow to red.
    pub yellow_threshold_multiplier: f64,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            center_deviation_ratio: 0.05,
            scale_deviation_ratio: 0.05,
            head_tilt_degrees: 5.0,
            yellow_threshold_multiplier: 2.5,
        }
    }
}

/// Traffic-light framing state shown on the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComplianceStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Green => write!(f, "green"),
            ComplianceStatus::Yellow => write!(f, "yellow"),
            ComplianceStatus::Red => write!(f, "red"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    pub message: String,
}

/// Fraction of the face box size tolerated by the yaw/pitch heuristics.
const POSE_DEVIATION_RATIO: f64 = 0.05;

/// The nose tip sits at roughly this fraction down the face box when level.
const NOSE_ROW_RATIO: f64 = 0.4;

struct Check {
    deviation: f64,
    max_allowed: f64,
    hint: &'static str,
}

impl Check {
    fn failed(&self) -> bool {
        self.deviation > self.max_allowed
    }
}

/// Compares a detection against its placed overlay and produces the
/// traffic-light status plus directional correction hints.
pub struct ComplianceEvaluator {
    thresholds: ComplianceThresholds,
}

impl ComplianceEvaluator {
    pub fn new(thresholds: ComplianceThresholds) -> Self {
        Self { thresholds }
    }

    /// All checks within bounds is green. Any failing check turns the result
    /// yellow and appends its hint; a deviation beyond `bound * multiplier`
    /// escalates to red with a major-adjustment prefix. Bounds are strict:
    /// a deviation equal to its bound still passes.
    pub fn evaluate(
        &self,
        detection: &FaceDetection,
        overlay: &Rect,
        spec: &GuideSpec,
    ) -> ComplianceResult {
        let checks = self.run_checks(detection, overlay, spec);

        let mut message = String::from("Adjust position: ");
        let mut any_failed = false;
        for check in &checks {
            if check.failed() {
                any_failed = true;
                message.push_str(check.hint);
            }
        }

        if !any_failed {
            return ComplianceResult {
                status: ComplianceStatus::Green,
                message: "Perfect!".to_string(),
            };
        }

        let multiplier = self.thresholds.yellow_threshold_multiplier;
        let major = checks
            .iter()
            .any(|c| c.deviation > c.max_allowed * multiplier);

        if major {
            ComplianceResult {
                status: ComplianceStatus::Red,
                message: format!("Major adjustment needed! {message}"),
            }
        } else {
            ComplianceResult {
                status: ComplianceStatus::Yellow,
                message,
            }
        }
    }

    fn run_checks(&self, detection: &FaceDetection, overlay: &Rect, spec: &GuideSpec) -> Vec<Check> {
        let face = &detection.bounding_box;
        let t = &self.thresholds;

        let ideal_face_height = overlay.height * spec.face_scale_height;
        let ideal_head_top = overlay.y + overlay.height * spec.face_offset_top_ratio;

        let mut checks = vec![
            Check {
                deviation: (face.center_x() - overlay.center_x()).abs(),
                max_allowed: overlay.width * t.center_deviation_ratio,
                hint: if face.center_x() < overlay.center_x() {
                    "Move right. "
                } else {
                    "Move left. "
                },
            },
            Check {
                deviation: (face.y - ideal_head_top).abs(),
                max_allowed: overlay.height * t.center_deviation_ratio,
                hint: if face.y < ideal_head_top {
                    "Move up. "
                } else {
                    "Move down. "
                },
            },
            Check {
                deviation: (face.height - ideal_face_height).abs(),
                max_allowed: ideal_face_height * t.scale_deviation_ratio,
                hint: if face.height < ideal_face_height {
                    "Move closer. "
                } else {
                    "Move further. "
                },
            },
        ];

        // Head-pose heuristics need landmarks; a box-only detection is
        // judged on placement and scale alone.
        if let Some(landmarks) = &detection.landmarks {
            let nose = landmarks.nose_tip();
            let eye_mid_x = landmarks.eye_midpoint_x();
            let nose_row = face.y + face.height * NOSE_ROW_RATIO;

            checks.push(Check {
                deviation: (nose.x - eye_mid_x).abs(),
                max_allowed: face.width * POSE_DEVIATION_RATIO,
                hint: if nose.x < eye_mid_x {
                    "Turn right slightly. "
                } else {
                    "Turn left slightly. "
                },
            });
            checks.push(Check {
                deviation: (nose.y - nose_row).abs(),
                max_allowed: face.height * POSE_DEVIATION_RATIO,
                hint: if nose.y < nose_row {
                    "Tilt head up slightly. "
                } else {
                    "Tilt head down slightly. "
                },
            });
        }

        checks
    }
}
