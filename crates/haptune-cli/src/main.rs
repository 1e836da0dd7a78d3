//! HapTune CLI - Command-line interface for haptic curve editing
//!
//! This binary drives the curve engine headlessly: load a curve, resample
//! it, synthesize vibration and analyze its spectrum.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use haptune_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Interpolate {
            input,
            out,
            config,
            json,
        } => commands::interpolate::run(&input, out.as_deref(), &config, json),
        Commands::Downsample {
            input,
            out,
            config,
            json,
        } => commands::downsample::run(&input, out.as_deref(), &config, json),
        Commands::Vibrate {
            input,
            out,
            interpolate,
            config,
            json,
        } => commands::vibrate::run(&input, out.as_deref(), interpolate, &config, json),
        Commands::Spectrum {
            input,
            out,
            interpolate,
            peaks,
            config,
            json,
        } => commands::spectrum::run(&input, out.as_deref(), interpolate, peaks, &config, json),
        Commands::Inspect {
            input,
            preview,
            config,
            json,
        } => commands::inspect::run(&input, preview.as_deref(), &config, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_interpolate() {
        let cli = Cli::try_parse_from([
            "haptune",
            "interpolate",
            "--input",
            "curve.csv",
            "--out",
            "dense.json",
            "--points-per-unit",
            "20",
            "--smoothing",
            "1.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Interpolate {
                input,
                out,
                config,
                json,
            } => {
                assert_eq!(input, "curve.csv");
                assert_eq!(out.as_deref(), Some("dense.json"));
                assert_eq!(config.points_per_unit, Some(20));
                assert_eq!(config.smoothing, Some(1.5));
                assert!(!json);
            }
            _ => panic!("expected interpolate command"),
        }
    }

    #[test]
    fn test_cli_parses_repeated_tones() {
        let cli = Cli::try_parse_from([
            "haptune",
            "vibrate",
            "-i",
            "curve.csv",
            "--tone",
            "150",
            "--tone",
            "320:0.5",
            "--sampling-rate",
            "4000",
            "--interpolate",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Vibrate {
                interpolate,
                config,
                json,
                ..
            } => {
                assert!(interpolate);
                assert!(json);
                assert_eq!(config.tones.len(), 2);
                assert_eq!(config.tones[1].amplitude, 0.5);
                assert_eq!(config.sampling_rate, Some(4000));
            }
            _ => panic!("expected vibrate command"),
        }
    }

    #[test]
    fn test_cli_spectrum_default_peaks() {
        let cli = Cli::try_parse_from(["haptune", "spectrum", "-i", "curve.csv"]).unwrap();
        match cli.command {
            Commands::Spectrum { peaks, .. } => assert_eq!(peaks, 5),
            _ => panic!("expected spectrum command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_tone() {
        assert!(Cli::try_parse_from([
            "haptune",
            "vibrate",
            "-i",
            "curve.csv",
            "--tone",
            "loud"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["haptune", "inspect"]).is_err());
    }
}
