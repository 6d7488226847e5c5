use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::grid::{Grid, LocationId};
use crate::core::timeline::TrialTiming;
use crate::error::ConfigError;
use crate::mapping::design::DesignParams;
use crate::mapping::interpolate::DEFAULT_UPSAMPLE_FACTOR;
use crate::mapping::simulator::NoiseParams;
use crate::render::colormap::Colormap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "GridConfig::default_rows")]
    pub rows: usize,
    #[serde(default = "GridConfig::default_cols")]
    pub cols: usize,
}

impl GridConfig {
    fn default_rows() -> usize {
        4
    }
    fn default_cols() -> usize {
        6
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: Self::default_rows(),
            cols: Self::default_cols(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default = "DesignConfig::default_repetitions_per_location")]
    pub repetitions_per_location: usize,
    #[serde(default = "DesignConfig::default_targets_per_trial")]
    pub targets_per_trial: usize,
}

impl DesignConfig {
    fn default_repetitions_per_location() -> usize {
        10
    }
    fn default_targets_per_trial() -> usize {
        3
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            repetitions_per_location: Self::default_repetitions_per_location(),
            targets_per_trial: Self::default_targets_per_trial(),
        }
    }
}

/// Phase durations in samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "TimingConfig::default_baseline")]
    pub baseline: usize,
    #[serde(default = "TimingConfig::default_stimulus")]
    pub stimulus: usize,
    #[serde(default = "TimingConfig::default_isi")]
    pub isi: usize,
}

impl TimingConfig {
    fn default_baseline() -> usize {
        20
    }
    fn default_stimulus() -> usize {
        10
    }
    fn default_isi() -> usize {
        10
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            baseline: Self::default_baseline(),
            stimulus: Self::default_stimulus(),
            isi: Self::default_isi(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "ChannelConfig::default_count")]
    pub count: usize,
    #[serde(default = "ChannelConfig::default_peak_location")]
    pub peak_location: LocationId,
    #[serde(default = "ChannelConfig::default_noise_floor")]
    pub noise_floor: f64,
    #[serde(default = "ChannelConfig::default_response_gain")]
    pub response_gain: f64,
}

impl ChannelConfig {
    fn default_count() -> usize {
        64
    }
    fn default_peak_location() -> LocationId {
        12
    }
    fn default_noise_floor() -> f64 {
        NoiseParams::default().noise_floor
    }
    fn default_response_gain() -> f64 {
        NoiseParams::default().response_gain
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            count: Self::default_count(),
            peak_location: Self::default_peak_location(),
            noise_floor: Self::default_noise_floor(),
            response_gain: Self::default_response_gain(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_interpolate")]
    pub interpolate: bool,
    #[serde(default = "RenderConfig::default_upsample_factor")]
    pub upsample_factor: usize,
    #[serde(default)]
    pub colormap: Colormap,
}

impl RenderConfig {
    fn default_interpolate() -> bool {
        true
    }
    fn default_upsample_factor() -> usize {
        DEFAULT_UPSAMPLE_FACTOR
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interpolate: Self::default_interpolate(),
            upsample_factor: Self::default_upsample_factor(),
            colormap: Colormap::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "RunConfig::default_seed")]
    pub seed: u64,
}

impl RunConfig {
    fn default_seed() -> u64 {
        1
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub channels: ChannelConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Validated, immutable parameters handed to every pipeline component.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentParams {
    pub grid: Grid,
    pub design: DesignParams,
    pub timing: TrialTiming,
    pub num_channels: usize,
    pub peak_location: LocationId,
    pub noise: NoiseParams,
    /// Upsampling factor, `None` when interpolation is off.
    pub upsample: Option<usize>,
    pub seed: u64,
}

impl ExperimentConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse {
            reason: err.to_string(),
        })
    }

    pub fn validate(&self) -> Result<ExperimentParams, ConfigError> {
        let grid = Grid::new(self.grid.rows, self.grid.cols)?;
        let design = DesignParams {
            total_locations: grid.len(),
            repetitions_per_location: self.design.repetitions_per_location,
            targets_per_trial: self.design.targets_per_trial,
        };
        design.check()?;

        let timing = TrialTiming {
            baseline: self.timing.baseline,
            stimulus: self.timing.stimulus,
            isi: self.timing.isi,
        };
        timing.check()?;

        if self.channels.count == 0 {
            return Err(ConfigError::ZeroChannels);
        }
        if !grid.contains(self.channels.peak_location) {
            return Err(ConfigError::LocationOutOfRange {
                location: self.channels.peak_location,
                locations: grid.len(),
            });
        }
        let noise = NoiseParams {
            noise_floor: self.channels.noise_floor,
            response_gain: self.channels.response_gain,
        };
        noise.check()?;

        let upsample = if self.render.interpolate {
            if self.render.upsample_factor == 0 {
                return Err(ConfigError::ZeroUpsampleFactor);
            }
            Some(self.render.upsample_factor)
        } else {
            None
        };

        Ok(ExperimentParams {
            grid,
            design,
            timing,
            num_channels: self.channels.count,
            peak_location: self.channels.peak_location,
            noise,
            upsample,
            seed: self.run.seed,
        })
    }

    /// Read `path`, or write a fully commented default file there and use defaults.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match Self::from_toml_str(&contents) {
                    Ok(cfg) => {
                        info!("Loaded config from {path}");
                        return cfg;
                    }
                    Err(err) => warn!("{err} ({path}). Using defaults."),
                },
                Err(err) => warn!("Failed to read config {path}: {err}. Using defaults."),
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, comment_out(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }
}

/// Prefix every key line with `# `, keeping section headers active.
fn comment_out(text: &str) -> String {
    let mut commented = String::with_capacity(text.len() + 64);
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            commented.push_str(line);
        } else {
            commented.push_str("# ");
            commented.push_str(line);
        }
        commented.push('\n');
    }
    commented
}
