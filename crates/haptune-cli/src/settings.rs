//! Engine configuration from a JSON file plus command-line overrides.

use anyhow::{Context, Result};
use clap::Args;
use haptune_engine::{EngineConfig, FrequencyComponent};
use std::fs;

/// Configuration flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Path to an engine config file (JSON)
    #[arg(long)]
    pub config: Option<String>,

    /// Vibration sampling rate (1-50000)
    #[arg(long)]
    pub sampling_rate: Option<u32>,

    /// Gain applied to the normalized vibration (0.0-10.0)
    #[arg(long)]
    pub amplitude_scale: Option<f64>,

    /// Tone as FREQ or FREQ:AMP; repeat for several tones. Replaces the
    /// configured tones.
    #[arg(long = "tone", value_parser = parse_tone)]
    pub tones: Vec<FrequencyComponent>,

    /// Smoothing factor for the curve spline (0 interpolates exactly)
    #[arg(long)]
    pub smoothing: Option<f64>,

    /// Interpolated points per x unit (1-100)
    #[arg(long)]
    pub points_per_unit: Option<u32>,

    /// Keep every n-th original point when downsampling (1-100)
    #[arg(long)]
    pub stride: Option<u32>,
}

/// Parses `FREQ` or `FREQ:AMP`.
pub fn parse_tone(s: &str) -> Result<FrequencyComponent, String> {
    let (freq, amp) = match s.split_once(':') {
        Some((freq, amp)) => (freq, Some(amp)),
        None => (s, None),
    };
    let frequency: f64 = freq
        .trim()
        .parse()
        .map_err(|_| format!("invalid tone frequency '{}'", freq))?;
    let amplitude: f64 = match amp {
        Some(amp) => amp
            .trim()
            .parse()
            .map_err(|_| format!("invalid tone amplitude '{}'", amp))?,
        None => 1.0,
    };
    Ok(FrequencyComponent::new(frequency, amplitude))
}

impl ConfigOverrides {
    /// Loads the config file (or defaults), applies the overrides and
    /// validates the result.
    pub fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                serde_json::from_str::<EngineConfig>(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path))?
            }
            None => EngineConfig::default(),
        };

        if let Some(rate) = self.sampling_rate {
            config.sampling_rate = rate;
        }
        if let Some(scale) = self.amplitude_scale {
            config.global_amplitude_scale = scale;
        }
        if !self.tones.is_empty() {
            config.frequency_components = self.tones.clone();
        }
        if let Some(s) = self.smoothing {
            config.smoothing_factor = s;
        }
        if let Some(ppu) = self.points_per_unit {
            config.points_per_unit = ppu;
        }
        if let Some(stride) = self.stride {
            config.downsample_stride = stride;
        }

        config.validate()?;
        log::debug!("resolved config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haptune_engine::{EngineError, ValidationError};

    #[test]
    fn test_parse_tone() {
        assert_eq!(parse_tone("150").unwrap(), FrequencyComponent::new(150.0, 1.0));
        assert_eq!(
            parse_tone("320:0.5").unwrap(),
            FrequencyComponent::new(320.0, 0.5)
        );
        assert!(parse_tone("abc").is_err());
        assert!(parse_tone("100:x").is_err());
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigOverrides::default().resolve().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"sampling_rate": 4000, "points_per_unit": 5}"#).unwrap();

        let overrides = ConfigOverrides {
            config: Some(path.to_string_lossy().to_string()),
            points_per_unit: Some(8),
            tones: vec![FrequencyComponent::new(200.0, 2.0)],
            ..ConfigOverrides::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.sampling_rate, 4000);
        assert_eq!(config.points_per_unit, 8);
        assert_eq!(
            config.frequency_components,
            vec![FrequencyComponent::new(200.0, 2.0)]
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = ConfigOverrides {
            sampling_rate: Some(0),
            ..ConfigOverrides::default()
        };
        let err = overrides.resolve().unwrap_err();
        let engine = err.downcast_ref::<EngineError>().unwrap();
        assert!(matches!(
            engine,
            EngineError::Validation(ValidationError::ParameterOutOfRange { name, .. })
                if name == "sampling_rate"
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let overrides = ConfigOverrides {
            config: Some("/nonexistent/config.json".to_string()),
            ..ConfigOverrides::default()
        };
        let err = overrides.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
