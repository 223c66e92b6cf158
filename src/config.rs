use crate::error::{Error, Result};
use crate::palette::{self, Palette};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "RINGFIELD_CONFIG";

/// Startup constants for the ring animation. Fixed once the driver is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_title: String,
    pub width: u32,
    pub height: u32,
    /// World units per pixel.
    pub zoom: f64,
    pub fps: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub time_step: f64,
    pub time_threshold: f64,
    pub ring_count: usize,
    /// Azimuth step in degrees for each ring; entry 0 is unused.
    pub increments: Vec<u32>,
    pub polar_angle_deg: f64,
    /// Initial tilt: rotation about x, then about y, in degrees.
    pub tilt_deg: [f64; 2],
    /// Per-frame spin: rotation about y, then about x, in degrees.
    pub spin_deg: [f64; 2],
    pub origin_radius: f32,
    pub stroke_width: f32,
    pub shadow_blur: f32,
    pub seed: Option<f64>,
    pub palette: Vec<String>,
    pub background: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "ringfield".to_string(),
            width: 800,
            height: 600,
            zoom: 0.03,
            fps: 60.0,
            frequency: 0.03,
            amplitude: 4.0,
            time_step: 0.2,
            time_threshold: 1_000_000.0,
            ring_count: 7,
            increments: vec![0, 9, 5, 4, 3, 3, 2, 2, 1],
            polar_angle_deg: 90.0,
            tilt_deg: [45.0, 30.0],
            spin_deg: [0.5, 0.25],
            origin_radius: 3.0,
            stroke_width: 2.0,
            shadow_blur: 5.0,
            seed: None,
            palette: palette::DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            background: "#111111".to_string(),
        }
    }
}

impl Config {
    /// Reads the file named by [`CONFIG_ENV`] when set, defaults otherwise.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::from_file(Path::new(&path))?;
                log::info!("Loaded config from {}", Path::new(&path).display());
                Ok(config)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("zoom", self.zoom)?;
        positive("fps", self.fps)?;
        positive("time_step", self.time_step)?;
        positive("time_threshold", self.time_threshold)?;
        finite("frequency", self.frequency)?;
        finite("amplitude", self.amplitude)?;
        finite("polar_angle_deg", self.polar_angle_deg)?;
        for (name, v) in [
            ("tilt_deg", self.tilt_deg[0]),
            ("tilt_deg", self.tilt_deg[1]),
            ("spin_deg", self.spin_deg[0]),
            ("spin_deg", self.spin_deg[1]),
        ] {
            finite(name, v)?;
        }
        positive("stroke_width", self.stroke_width as f64)?;
        positive("origin_radius", self.origin_radius as f64)?;
        if !(self.shadow_blur.is_finite() && self.shadow_blur >= 0.0) {
            return Err(Error::invalid("shadow_blur must be non-negative"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(format!(
                "window must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }

        if self.ring_count == 0 {
            return Err(Error::invalid("ring_count must be at least 1"));
        }
        if self.increments.len() <= self.ring_count {
            return Err(Error::invalid(format!(
                "increments needs an entry for each of {} rings plus the origin, got {}",
                self.ring_count,
                self.increments.len()
            )));
        }
        if let Some(ring) = (1..=self.ring_count).find(|&r| self.increments[r] == 0) {
            return Err(Error::invalid(format!("ring {ring} has a zero azimuth step")));
        }

        let palette = self.palette()?;
        if palette.len() <= self.ring_count {
            return Err(Error::invalid(format!(
                "palette needs a color for each of {} rings plus the origin, got {}",
                self.ring_count,
                palette.len()
            )));
        }
        self.background_color()?;

        if let Some(seed) = self.seed {
            finite("seed", seed)?;
        }
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::from_hex(&self.palette)
    }

    pub fn background_color(&self) -> Result<palette::Color> {
        palette::parse_hex(&self.background)
    }
}

fn finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::invalid(format!("{name} must be positive, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.increments.len(), 9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "zoom": 0.05, "seed": 42.0 }"#).unwrap();
        assert_eq!(config.zoom, 0.05);
        assert_eq!(config.seed, Some(42.0));
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.ring_count, 7);
    }

    #[test]
    fn test_rejects_non_positive_zoom() {
        let config = Config {
            zoom: 0.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        assert!(Config::from_json(r#"{ "zoom": -1.0 }"#).is_err());
    }

    #[test]
    fn test_rejects_short_increment_table() {
        let config = Config {
            increments: vec![0, 9, 5],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_step() {
        let mut config = Config::default();
        config.increments[3] = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_palette_without_enough_rings() {
        let config = Config {
            ring_count: 8,
            increments: vec![0, 9, 5, 4, 3, 3, 2, 2, 1],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config {
            seed: Some(0.25),
            ..Config::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&text).unwrap(), config);
    }
}
