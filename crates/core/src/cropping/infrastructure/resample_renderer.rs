use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::cropping::domain::crop_planner::CropPlan;
use crate::cropping::domain::photo_renderer::PhotoRenderer;
use crate::shared::geometry::Rect;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Bilinear crop-and-resample renderer.
///
/// Reproduces canvas `drawImage` semantics for crops that overshoot the
/// source: the out-of-source margin stays background-colored and the visible
/// part lands at its proportional position in the output, upsampled past 1:1
/// when the crop is larger than the source.
pub struct ResampleRenderer;

impl ResampleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResampleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoRenderer for ResampleRenderer {
    fn render(
        &self,
        source: &RgbImage,
        plan: &CropPlan,
    ) -> Result<RgbImage, Box<dyn std::error::Error>> {
        let out_w = (plan.output_size.width.round() as u32).max(1);
        let out_h = (plan.output_size.height.round() as u32).max(1);
        let mut canvas = RgbImage::from_pixel(out_w, out_h, BACKGROUND);

        if plan.crop.width <= 0.0 || plan.crop.height <= 0.0 {
            return Ok(canvas);
        }

        let source_rect = Rect::new(
            0.0,
            0.0,
            f64::from(source.width()),
            f64::from(source.height()),
        );
        let Some(visible) = plan.crop.intersect(&source_rect) else {
            return Ok(canvas);
        };

        // Proportional destination of the visible part of the crop.
        let sx = f64::from(out_w) / plan.crop.width;
        let sy = f64::from(out_h) / plan.crop.height;
        let dest_x = ((visible.x - plan.crop.x) * sx).round() as i64;
        let dest_y = ((visible.y - plan.crop.y) * sy).round() as i64;
        let dest_w = ((visible.width * sx).round() as u32).clamp(1, out_w);
        let dest_h = ((visible.height * sy).round() as u32).clamp(1, out_h);

        let src_x = visible.x.floor() as u32;
        let src_y = visible.y.floor() as u32;
        let src_w = (visible.width.ceil() as u32).clamp(1, source.width() - src_x);
        let src_h = (visible.height.ceil() as u32).clamp(1, source.height() - src_y);

        let cropped = imageops::crop_imm(source, src_x, src_y, src_w, src_h).to_image();
        let resized = imageops::resize(&cropped, dest_w, dest_h, FilterType::Triangle);
        imageops::replace(&mut canvas, &resized, dest_x, dest_y);

        Ok(canvas)
    }
}
