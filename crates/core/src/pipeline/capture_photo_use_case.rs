use image::RgbImage;

use crate::config::guide_spec::GuideSpec;
use crate::config::output_resolution::OutputResolution;
use crate::cropping::domain::crop_planner::{plan_crop, CropError, CropPlan};
use crate::cropping::domain::photo_renderer::PhotoRenderer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::geometry::Size;

/// The finished passport photo and the plan that produced it.
#[derive(Debug)]
pub struct CapturedPhoto {
    pub image: RgbImage,
    pub plan: CropPlan,
}

/// One-shot capture pipeline: detect → plan crop → render.
///
/// A frame without a face surfaces as [`CropError::NoFaceDetected`], an
/// expected outcome the caller reports to the user, not a failure.
pub struct CapturePhotoUseCase {
    detector: Box<dyn FaceDetector>,
    renderer: Box<dyn PhotoRenderer>,
}

impl CapturePhotoUseCase {
    pub fn new(detector: Box<dyn FaceDetector>, renderer: Box<dyn PhotoRenderer>) -> Self {
        Self { detector, renderer }
    }

    pub fn execute(
        &mut self,
        source: &RgbImage,
        spec: &GuideSpec,
        resolution: &OutputResolution,
    ) -> Result<CapturedPhoto, Box<dyn std::error::Error>> {
        let detection = self
            .detector
            .detect(source)?
            .ok_or(CropError::NoFaceDetected)?;

        let plan = plan_crop(&detection, Size::of_image(source), spec, resolution)?;
        log::info!(
            "cropping {:.0}x{:.0} at ({:.0}, {:.0}) into {:.0}x{:.0}",
            plan.crop.width,
            plan.crop.height,
            plan.crop.x,
            plan.crop.y,
            plan.output_size.width,
            plan.output_size.height
        );

        let image = self.renderer.render(source, &plan)?;
        Ok(CapturedPhoto { image, plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::face::FaceDetection;
    use crate::shared::geometry::Rect;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

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

    struct RecordingRenderer {
        plans: Arc<Mutex<Vec<CropPlan>>>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self {
                plans: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl PhotoRenderer for RecordingRenderer {
        fn render(
            &self,
            _source: &RgbImage,
            plan: &CropPlan,
        ) -> Result<RgbImage, Box<dyn std::error::Error>> {
            self.plans.lock().unwrap().push(*plan);
            let w = plan.output_size.width.round() as u32;
            let h = plan.output_size.height.round() as u32;
            Ok(RgbImage::new(w, h))
        }
    }

    fn spec() -> GuideSpec {
        GuideSpec {
            aspect_ratio: 35.0 / 45.0,
            face_scale_height: 0.75,
            face_offset_top_ratio: 0.10,
        }
    }

    fn resolution() -> &'static OutputResolution {
        &crate::config::output_resolution::HIGH_RES
    }

    #[test]
    fn test_renders_the_planned_crop() {
        let detection = FaceDetection::new(Rect::new(800.0, 200.0, 300.0, 400.0), None);
        let renderer = RecordingRenderer::new();
        let plans = renderer.plans.clone();

        let mut uc = CapturePhotoUseCase::new(
            Box::new(StubDetector {
                detection: Some(detection),
            }),
            Box::new(renderer),
        );

        let photo = uc
            .execute(&RgbImage::new(1920, 1080), &spec(), resolution())
            .unwrap();

        let plans = plans.lock().unwrap();
        assert_eq!(plans.len(), 1);
        assert_relative_eq!(plans[0].output_size.width, 700.0);
        assert_relative_eq!(plans[0].output_size.height, 900.0);
        assert_eq!(photo.image.width(), 700);
        assert_eq!(photo.image.height(), 900);
        assert_eq!(photo.plan, plans[0]);
    }

    #[test]
    fn test_no_face_is_the_domain_error() {
        let mut uc = CapturePhotoUseCase::new(
            Box::new(StubDetector { detection: None }),
            Box::new(RecordingRenderer::new()),
        );

        let err = uc
            .execute(&RgbImage::new(640, 480), &spec(), resolution())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CropError>(),
            Some(&CropError::NoFaceDetected)
        );
    }

    #[test]
    fn test_no_face_skips_rendering() {
        let renderer = RecordingRenderer::new();
        let plans = renderer.plans.clone();
        let mut uc = CapturePhotoUseCase::new(
            Box::new(StubDetector { detection: None }),
            Box::new(renderer),
        );

        let _ = uc.execute(&RgbImage::new(640, 480), &spec(), resolution());
        assert!(plans.lock().unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_detection_maps_to_no_face() {
        let detection = FaceDetection::new(
            Rect {
                x: 10.0,
                y: 10.0,
                width: 20.0,
                height: 0.0,
            },
            None,
        );
        let mut uc = CapturePhotoUseCase::new(
            Box::new(StubDetector {
                detection: Some(detection),
            }),
            Box::new(RecordingRenderer::new()),
        );

        let err = uc
            .execute(&RgbImage::new(640, 480), &spec(), resolution())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CropError>(),
            Some(&CropError::NoFaceDetected)
        );
    }
}
