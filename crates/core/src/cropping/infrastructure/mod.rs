pub mod resample_renderer;
