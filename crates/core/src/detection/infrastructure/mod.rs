pub mod json_detection_source;
pub mod skip_frame_detector;
