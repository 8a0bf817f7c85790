use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::country_spec::CountrySpec;
use crate::config::guide_spec::GuideSpec;
use crate::detection::domain::face_detector::DetectorOptions;

/// User-adjustable tuning values.
///
/// `input_size` and `score_threshold` configure the external detector and are
/// never interpreted by the geometry engine; `face_scale_height` and
/// `face_offset_top_ratio` supersede a country spec's nominal values for
/// cropping and guidance (the aspect ratio is never overridden).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeveloperOverrides {
    pub input_size: u32,
    pub score_threshold: f64,
    pub frames_to_skip: usize,
    pub face_scale_height: f64,
    pub face_offset_top_ratio: f64,
}

impl Default for DeveloperOverrides {
    fn default() -> Self {
        Self {
            input_size: 416,
            score_threshold: 0.5,
            frames_to_skip: 1,
            face_scale_height: 0.75,
            face_offset_top_ratio: 0.10,
        }
    }
}

impl DeveloperOverrides {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("passguide").join("overrides.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let json = fs::read_to_string(path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }

    /// Merges this override set with a country spec: scale and offset come
    /// from the overrides, the aspect ratio from the country.
    pub fn guide_spec(&self, country: &CountrySpec) -> GuideSpec {
        GuideSpec {
            aspect_ratio: country.aspect_ratio,
            face_scale_height: self.face_scale_height,
            face_offset_top_ratio: self.face_offset_top_ratio,
        }
    }

    pub fn detector_options(&self) -> DetectorOptions {
        DetectorOptions {
            input_size: self.input_size,
            score_threshold: self.score_threshold,
        }
    }
}
