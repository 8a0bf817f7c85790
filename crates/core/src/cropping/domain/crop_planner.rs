//! Crop geometry for the one-shot photo capture.
//!
//! Works entirely in source-image pixel space; the pixel blit that realizes
//! a plan lives behind [`PhotoRenderer`](super::photo_renderer::PhotoRenderer).

use thiserror::Error;

use crate::config::guide_spec::GuideSpec;
use crate::config::output_resolution::OutputResolution;
use crate::shared::face::FaceDetection;
use crate::shared::geometry::{clamp_origin, Rect, Size};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CropError {
    #[error("no face detected in the captured image")]
    NoFaceDetected,
}

/// Where to cut the source image and how large the finished photo is.
///
/// `crop` is source space; `output_size` is the finished photo's dimensions,
/// kept fractional until the renderer rounds to whole pixels. When the face
/// is large relative to the source, `crop` may overshoot the source bounds;
/// the renderer draws exactly this rectangle anyway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    pub crop: Rect,
    pub output_size: Size,
}

/// Finished photo dimensions for a target aspect ratio.
///
/// Wider-than-tall targets keep the base width and derive the height; square
/// and portrait targets keep the base height and derive the width.
pub fn output_size(aspect_ratio: f64, resolution: &OutputResolution) -> Size {
    let base_width = f64::from(resolution.base_width);
    let base_height = f64::from(resolution.base_height);
    if aspect_ratio > 1.0 {
        Size::new(base_width, base_width / aspect_ratio)
    } else {
        Size::new(base_height * aspect_ratio, base_height)
    }
}

/// Computes the source-space crop rectangle that puts the detected face at
/// the spec's scale and head offset in the finished photo.
pub fn plan_crop(
    detection: &FaceDetection,
    source: Size,
    spec: &GuideSpec,
    resolution: &OutputResolution,
) -> Result<CropPlan, CropError> {
    let face = &detection.bounding_box;
    // A real detector never reports a zero-height face; guard the scale
    // division anyway.
    if face.height <= 0.0 {
        return Err(CropError::NoFaceDetected);
    }

    let output = output_size(spec.aspect_ratio, resolution);

    let target_face_height = output.height * spec.face_scale_height;
    let scale = target_face_height / face.height;

    let crop_width = output.width / scale;
    let crop_height = output.height / scale;

    let target_y = face.y - output.height * spec.face_offset_top_ratio / scale;
    let target_x = face.center_x() - crop_width / 2.0;

    let crop = Rect::new(
        clamp_origin(target_x, source.width, crop_width),
        clamp_origin(target_y, source.height, crop_height),
        crop_width,
        crop_height,
    );

    Ok(CropPlan {
        crop,
        output_size: output,
    })
}
