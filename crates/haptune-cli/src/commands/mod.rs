//! CLI command implementations

pub mod downsample;
pub mod inspect;
pub mod interpolate;
pub mod json_output;
pub mod spectrum;
pub mod vibrate;

mod reporting;
