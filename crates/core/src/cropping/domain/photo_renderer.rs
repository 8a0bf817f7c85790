use image::RgbImage;

use crate::cropping::domain::crop_planner::CropPlan;

/// Domain interface for realizing a crop plan as pixels.
///
/// Implementations draw exactly `plan.crop` scaled into `plan.output_size`;
/// they must not second-guess the plan's geometry. Any 2D resampling blit
/// satisfies this contract.
pub trait PhotoRenderer: Send {
    fn render(
        &self,
        source: &RgbImage,
        plan: &CropPlan,
    ) -> Result<RgbImage, Box<dyn std::error::Error>>;
}
