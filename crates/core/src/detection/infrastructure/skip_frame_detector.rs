use image::RgbImage;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::face::FaceDetection;

/// Decorator that runs real detection on every (N+1)th frame and reuses the
/// last result in between, so the guide overlay holds still between
/// detections instead of flickering off.
///
/// `frames_to_skip = 0` delegates on every call.
pub struct SkipFrameDetector {
    inner: Box<dyn FaceDetector>,
    frames_to_skip: usize,
    frame_count: usize,
    last: Option<FaceDetection>,
}

impl SkipFrameDetector {
    pub fn new(inner: Box<dyn FaceDetector>, frames_to_skip: usize) -> Self {
        Self {
            inner,
            frames_to_skip,
            frame_count: 0,
            last: None,
        }
    }
}

impl FaceDetector for SkipFrameDetector {
    fn detect(
        &mut self,
        image: &RgbImage,
    ) -> Result<Option<FaceDetection>, Box<dyn std::error::Error>> {
        if self.frame_count % (self.frames_to_skip + 1) == 0 {
            self.last = self.inner.detect(image)?;
        }
        self.frame_count += 1;
        Ok(self.last.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Rect;

    use std::sync::{Arc, Mutex};

    struct FakeDetector {
        results: Vec<Option<FaceDetection>>,
        calls: Arc<Mutex<usize>>,
    }

    impl FakeDetector {
        fn new(results: Vec<Option<FaceDetection>>) -> Self {
            Self {
                results,
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl FaceDetector for FakeDetector {
        fn detect(
            &mut self,
            _image: &RgbImage,
        ) -> Result<Option<FaceDetection>, Box<dyn std::error::Error>> {
            let mut calls = self.calls.lock().unwrap();
            let result = self.results[*calls % self.results.len()].clone();
            *calls += 1;
            Ok(result)
        }
    }

    fn image() -> RgbImage {
        RgbImage::new(8, 8)
    }

    fn detection(x: f64) -> Option<FaceDetection> {
        Some(FaceDetection::new(Rect::new(x, 10.0, 50.0, 60.0), None))
    }

    #[test]
    fn test_skip_zero_delegates_every_call() {
        let inner = FakeDetector::new(vec![detection(10.0), detection(20.0)]);
        let mut detector = SkipFrameDetector::new(Box::new(inner), 0);

        let first = detector.detect(&image()).unwrap().unwrap();
        let second = detector.detect(&image()).unwrap().unwrap();
        assert_eq!(first.bounding_box.x, 10.0);
        assert_eq!(second.bounding_box.x, 20.0);
    }

    #[test]
    fn test_skipped_calls_reuse_last_detection() {
        let inner = FakeDetector::new(vec![detection(10.0), detection(20.0)]);
        let mut detector = SkipFrameDetector::new(Box::new(inner), 2);

        // Calls 0..=2 reuse the first real detection; call 3 is real again.
        let d0 = detector.detect(&image()).unwrap().unwrap();
        let d1 = detector.detect(&image()).unwrap().unwrap();
        let d2 = detector.detect(&image()).unwrap().unwrap();
        let d3 = detector.detect(&image()).unwrap().unwrap();

        assert_eq!(d0.bounding_box.x, 10.0);
        assert_eq!(d1.bounding_box.x, 10.0);
        assert_eq!(d2.bounding_box.x, 10.0);
        assert_eq!(d3.bounding_box.x, 20.0);
    }

    #[test]
    fn test_no_face_reused_on_skipped_calls() {
        let inner = FakeDetector::new(vec![None, detection(10.0)]);
        let mut detector = SkipFrameDetector::new(Box::new(inner), 1);

        assert!(detector.detect(&image()).unwrap().is_none());
        // Skipped call repeats the no-face result rather than inventing one.
        assert!(detector.detect(&image()).unwrap().is_none());
        assert!(detector.detect(&image()).unwrap().is_some());
    }

    #[test]
    fn test_inner_called_at_expected_cadence() {
        let inner = FakeDetector::new(vec![detection(10.0)]);
        let calls = inner.calls.clone();
        let mut detector = SkipFrameDetector::new(Box::new(inner), 3);

        for _ in 0..8 {
            detector.detect(&image()).unwrap();
        }
        // 8 calls with frames_to_skip=3: real detections at calls 0 and 4.
        assert_eq!(*calls.lock().unwrap(), 2);
    }
}
