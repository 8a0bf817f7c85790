/// Passport photo requirements for one country/document type.
///
/// Static configuration; `aspect_ratio` is width over height and is never
/// overridden at runtime, unlike the nominal face scale/offset which
/// developer overrides may supersede.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountrySpec {
    pub code: &'static str,
    pub name: &'static str,
    pub aspect_ratio: f64,
    pub face_scale_height: f64,
    pub face_offset_top_ratio: f64,
}

/// Common 35x45 mm format used by the EU and most international documents.
pub const STANDARD: CountrySpec = CountrySpec {
    code: "standard",
    name: "Standard (EU/Intl)",
    aspect_ratio: 35.0 / 45.0,
    face_scale_height: 0.75,
    face_offset_top_ratio: 0.10,
};

/// US passport, 2x2 inch square.
pub const USA: CountrySpec = CountrySpec {
    code: "usa",
    name: "USA (2x2 inch)",
    aspect_ratio: 1.0,
    face_scale_height: 0.70,
    face_offset_top_ratio: 0.08,
};

impl CountrySpec {
    pub const ALL: &'static [CountrySpec] = &[STANDARD, USA];

    pub fn by_code(code: &str) -> Option<&'static CountrySpec> {
        Self::ALL.iter().find(|s| s.code == code)
    }
}
