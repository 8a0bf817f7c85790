//! Passport photo framing guidance and cropping.
//!
//! Face detection is an external collaborator behind
//! [`detection::domain::face_detector::FaceDetector`]; everything else is
//! coordinate geometry: placing the live guide overlay with compliance
//! feedback, and planning/rendering the final crop.

pub mod config;
pub mod cropping;
pub mod detection;
pub mod guidance;
pub mod pipeline;
pub mod shared;
