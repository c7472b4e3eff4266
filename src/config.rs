use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// World-coordinate window that gets rendered to the frame image. The
/// defaults reproduce the plotting window the dataset has always been
/// analysed with: the full box width, clipped to the band around the
/// mesectoderm.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x_min: 0.0,
            x_max: 20.0,
            y_min: 8.0,
            y_max: 12.0,
        }
    }
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Analysis parameters, loadable from a TOML file. Any field omitted in the
/// file falls back to the dataset defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Window length (in boundary points) of the roughness statistic.
    pub segment_size: usize,
    /// Dimensions of the rendered frame image.
    pub image_width: u32,
    pub image_height: u32,
    /// Expected number of frames per run; runs that deviate are excluded
    /// from the cross-run mean.
    pub frames_per_run: usize,
    pub viewport: Viewport,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            segment_size: 150,
            image_width: 640,
            image_height: 480,
            frames_per_run: 120,
            viewport: Viewport::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {:?}", path.as_ref()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {:?}", path.as_ref()))?;
        Ok(config)
    }
}
