use crate::config::country_spec::CountrySpec;

/// The three values the geometry engine actually consumes: target aspect
/// ratio plus the face-height and head-offset fractions.
///
/// Built from a [`CountrySpec`], optionally with developer overrides applied
/// on top; the aspect ratio always comes from the country spec.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideSpec {
    pub aspect_ratio: f64,
    pub face_scale_height: f64,
    pub face_offset_top_ratio: f64,
}

impl From<&CountrySpec> for GuideSpec {
    fn from(spec: &CountrySpec) -> Self {
        Self {
            aspect_ratio: spec.aspect_ratio,
            face_scale_height: spec.face_scale_height,
            face_offset_top_ratio: spec.face_offset_top_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::country_spec;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_country_spec() {
        let spec = GuideSpec::from(&country_spec::USA);
        assert_relative_eq!(spec.aspect_ratio, 1.0);
        assert_relative_eq!(spec.face_scale_height, 0.70);
        assert_relative_eq!(spec.face_offset_top_ratio, 0.08);
    }
}
