use std::path::PathBuf;

use clap::Parser;
use prfmap::config::ExperimentConfig;
use prfmap::render::colormap::Colormap;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (written with commented defaults if missing)
    #[arg(long, default_value = "prfmap.toml")]
    pub config: String,

    /// RNG seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the estimate as a PNG heatmap
    #[arg(long, value_name = "PNG_PATH")]
    pub heatmap: Option<PathBuf>,

    /// Upsample before rendering (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub interpolate: Option<bool>,

    /// Heatmap colormap (overrides config)
    #[arg(long, value_enum)]
    pub colormap: Option<Colormap>,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn apply_overrides(&self, cfg: &mut ExperimentConfig) {
        if let Some(seed) = self.seed {
            cfg.run.seed = seed;
        }
        if let Some(interpolate) = self.interpolate {
            cfg.render.interpolate = interpolate;
        }
        if let Some(colormap) = self.colormap {
            cfg.render.colormap = colormap;
        }
    }
}
