/// Base pixel dimensions for the final passport photo.
///
/// The base values assume the 35:45 portrait format; the crop planner derives
/// the authoritative dimension from the selected aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputResolution {
    pub code: &'static str,
    pub name: &'static str,
    pub base_width: u32,
    pub base_height: u32,
}

pub const STANDARD_RES: OutputResolution = OutputResolution {
    code: "standard-res",
    name: "Std Res (350x450)",
    base_width: 350,
    base_height: 450,
};

pub const HIGH_RES: OutputResolution = OutputResolution {
    code: "high-res",
    name: "High Res (700x900)",
    base_width: 700,
    base_height: 900,
};

pub const SUPER_HIGH_RES: OutputResolution = OutputResolution {
    code: "super-high-res",
    name: "Super Res (1050x1350)",
    base_width: 1050,
    base_height: 1350,
};

impl OutputResolution {
    pub const ALL: &'static [OutputResolution] = &[STANDARD_RES, HIGH_RES, SUPER_HIGH_RES];

    pub fn by_code(code: &str) -> Option<&'static OutputResolution> {
        Self::ALL.iter().find(|r| r.code == code)
    }
}
