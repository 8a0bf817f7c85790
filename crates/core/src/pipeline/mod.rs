pub mod capture_photo_use_case;
pub mod guide_frame_use_case;
