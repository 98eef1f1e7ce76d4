//! Runtime configuration for the letter rain scene.

use crate::error::Error;
use crate::palette::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the scene needs to know up front: which assets to drop, how
/// often, how many, and the physical/visual constants.
///
/// Defaults reproduce the reference page; a RON file can override any field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Asset URLs picked from uniformly at random, one per spawn.
    pub assets: Vec<String>,
    /// Fill/stroke colors cycled across spawned outlines.
    pub palette: Vec<Color>,
    /// Seconds between spawn ticks.
    pub spawn_period: f32,
    /// Total number of spawns before the scheduler stops.
    pub max_drops: u32,
    /// Vertical spawn coordinate, above the visible area (y grows downward).
    pub drop_height: f32,
    /// Uniform scale applied to parsed outlines before body creation.
    pub scale: f32,
    /// Arc-length spacing when sampling outlines into polygons.
    pub sample_length: f32,
    /// Stroke width for rendered outlines.
    pub line_width: f32,
    /// Multiplier over the base downward gravity (981 px/s²).
    pub gravity_factor: f32,
    /// Pointer spring stiffness for dragging.
    pub drag_stiffness: f32,
    /// Pointer spring damping for dragging.
    pub drag_damping: f32,
    /// Page background color.
    pub background: Color,
    /// Initial window size; also sizes the boundary bodies at bootstrap.
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        let base = "http://127.0.0.1:3000/assets";
        Self {
            assets: ["S", "U", "J", "I", "N"]
                .iter()
                .map(|letter| format!("{base}/{letter}.svg"))
                .collect(),
            palette: crate::palette::DEFAULT_COLORS.to_vec(),
            spawn_period: 0.5,
            max_drops: 20,
            drop_height: -100.0,
            scale: 0.3,
            sample_length: 50.0,
            line_width: 1.0,
            gravity_factor: 1.0,
            drag_stiffness: 0.2,
            drag_damping: 2.0,
            background: Color::rgb(0xf4, 0xf4, 0xf4),
            window_width: 1280.0,
            window_height: 720.0,
        }
    }
}

impl RainConfig {
    /// Reads a RON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        ron::from_str(&text).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Like [`load`](Self::load), but falls back to defaults on any error,
    /// reporting it through the returned warning list together with any
    /// validation findings.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let config = match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warnings.push(e.to_string());
                Self::default()
            }
        };
        warnings.extend(config.validate());
        (config, warnings)
    }

    /// Flags values that would make the scene degenerate. Warnings only;
    /// the caller decides whether to proceed.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.assets.is_empty() {
            warnings.push("no assets configured; nothing will spawn".into());
        }
        if self.palette.is_empty() {
            warnings.push("empty palette; falling back to built-in colors".into());
        }
        if self.spawn_period <= 0.0 {
            warnings.push(format!(
                "spawn_period {} is not positive; spawns would fire every frame",
                self.spawn_period
            ));
        }
        if self.scale <= 0.0 {
            warnings.push(format!("scale {} is not positive", self.scale));
        }
        if self.sample_length <= 0.0 {
            warnings.push(format!("sample_length {} is not positive", self.sample_length));
        }
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            warnings.push("window size is not positive".into());
        }
        warnings
    }
}
