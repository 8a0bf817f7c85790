pub mod crop_planner;
pub mod photo_renderer;
