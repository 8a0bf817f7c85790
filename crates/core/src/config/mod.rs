pub mod country_spec;
pub mod guide_spec;
pub mod output_resolution;
pub mod overrides;
