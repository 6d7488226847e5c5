// Entry point: loads the config, runs one mapping experiment and reports the estimate.
mod cli;

use std::error::Error;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use prfmap::config::ExperimentConfig;
use prfmap::mapping::Experiment;
use prfmap::render::heatmap::{HeatmapStyle, write_heatmap_png};
use prfmap::render::table::format_field;

fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut cfg = ExperimentConfig::load_or_default(&args.config);
    args.apply_overrides(&mut cfg);
    let params = cfg.validate()?;
    info!(
        rows = params.grid.rows(),
        cols = params.grid.cols(),
        seed = params.seed,
        "prfmap v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut rng = StdRng::seed_from_u64(params.seed);
    let experiment = Experiment::new(params)?;
    let run = experiment.run(&mut rng)?;

    for w in &run.warnings {
        warn!("{w}");
    }

    println!("{}", format_field(run.sensitivity.field(), 3));
    if let Some((location, value)) = run.sensitivity.peak() {
        let coord = experiment.grid().coord_of(location);
        println!("peak: location {location} {coord:?} = {value:.4}");
    }

    if let Some(path) = &args.heatmap {
        let field = run
            .upsampled
            .as_ref()
            .map(|u| u.field())
            .unwrap_or_else(|| run.sensitivity.field());
        let style = HeatmapStyle {
            colormap: cfg.render.colormap,
            ..HeatmapStyle::default()
        };
        write_heatmap_png(path, field, &style)?;
        info!("Saved heatmap to {}", path.display());
    }
    Ok(())
}
