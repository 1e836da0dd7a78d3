//! HapTune CLI library.
//!
//! This crate provides the core functionality for the HapTune CLI,
//! including curve loading, configuration resolution and the resampling,
//! synthesis and analysis commands.

pub mod commands;
pub mod input;
pub mod output;
pub mod settings;
