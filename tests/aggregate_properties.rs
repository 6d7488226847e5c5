use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use prfmap::config::ExperimentConfig;
use prfmap::core::grid::Grid;
use prfmap::core::timeline::{TrialTimeline, TrialTiming};
use prfmap::mapping::activity::{ExperimentActivity, TrialActivity};
use prfmap::mapping::design::{DesignParams, TrialDesign};
use prfmap::mapping::{Experiment, ResponseAggregator};

fn timeline() -> TrialTimeline {
    TrialTimeline::new(
        TrialTiming {
            baseline: 12,
            stimulus: 8,
            isi: 4,
        },
        3,
    )
    .unwrap()
}

#[test]
fn constant_activity_gives_constant_grid() {
    let grid = Grid::new(4, 6).unwrap();
    let tl = timeline();
    let params = DesignParams {
        total_locations: grid.len(),
        repetitions_per_location: 4,
        targets_per_trial: 3,
    };
    let design = TrialDesign::generate(&params, &mut StdRng::seed_from_u64(8)).unwrap();

    for c in [0.0, 0.37, 1.0, 12.5] {
        let activity = ExperimentActivity::from_trials(
            (0..design.len())
                .map(|_| TrialActivity::filled(7, tl.total_samples(), c))
                .collect(),
        );
        let agg = ResponseAggregator::new(&grid, &tl)
            .aggregate(&activity, &design)
            .unwrap();
        assert!(agg.warnings.is_empty());
        for &v in agg.grid.field().values() {
            assert_relative_eq!(v, c, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}

#[test]
fn aggregation_is_idempotent() {
    let mut cfg = ExperimentConfig::default();
    cfg.design.repetitions_per_location = 3;
    cfg.channels.count = 16;
    let exp = Experiment::new(cfg.validate().unwrap()).unwrap();
    let run = exp.run(&mut StdRng::seed_from_u64(31)).unwrap();

    let agg = ResponseAggregator::new(exp.grid(), exp.timeline());
    let first = agg.aggregate(&run.activity, &run.design).unwrap();
    let second = agg.aggregate(&run.activity, &run.design).unwrap();

    let bits = |g: &prfmap::mapping::SensitivityGrid| -> Vec<u64> {
        g.field().values().iter().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&first.grid), bits(&second.grid));
    assert_eq!(bits(&first.grid), bits(&run.sensitivity));
}

#[test]
fn baseline_samples_do_not_leak_into_estimate() {
    let grid = Grid::new(1, 3).unwrap();
    let tl = timeline();
    let params = DesignParams {
        total_locations: 3,
        repetitions_per_location: 2,
        targets_per_trial: 3,
    };
    let design = TrialDesign::generate(&params, &mut StdRng::seed_from_u64(1)).unwrap();
    let windows = tl.stimulus_windows();

    let trials = design
        .trials()
        .iter()
        .map(|trial| {
            let mut act = TrialActivity::filled(2, tl.total_samples(), 1000.0);
            for (slot, &loc) in trial.locations().iter().enumerate() {
                for ch in 0..2 {
                    act.channel_mut(ch)[windows[slot].clone()].fill(loc as f64);
                }
            }
            act
        })
        .collect();
    let activity = ExperimentActivity::from_trials(trials);

    let agg = ResponseAggregator::new(&grid, &tl)
        .aggregate(&activity, &design)
        .unwrap();
    for loc in 1..=3 {
        assert_eq!(agg.grid.value(loc), Some(loc as f64));
    }
}
