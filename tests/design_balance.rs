use rand::SeedableRng;
use rand::rngs::StdRng;

use prfmap::error::{ConfigError, DesignError, PrfError};
use prfmap::mapping::design::{DesignParams, Trial, TrialDesign};

fn params(total: usize, reps: usize, targets: usize) -> DesignParams {
    DesignParams {
        total_locations: total,
        repetitions_per_location: reps,
        targets_per_trial: targets,
    }
}

#[test]
fn four_by_six_ten_reps_three_targets_gives_eighty_trials() {
    let p = params(24, 10, 3);
    let mut rng = StdRng::seed_from_u64(2024);
    let design = TrialDesign::generate(&p, &mut rng).expect("valid design");

    assert_eq!(design.len(), 80);
    for trial in design.trials() {
        assert_eq!(trial.len(), 3);
        let mut locs = trial.locations().to_vec();
        locs.sort_unstable();
        locs.dedup();
        assert_eq!(locs.len(), 3, "repeat inside {trial:?}");
    }
    for location in 1..=24 {
        let trials_with: Vec<usize> = design.occurrences(location).map(|(t, _)| t).collect();
        assert_eq!(trials_with.len(), 10, "location {location}");
    }
}

#[test]
fn every_block_is_a_permutation() {
    let p = params(12, 5, 4);
    let mut rng = StdRng::seed_from_u64(3);
    let design = TrialDesign::generate(&p, &mut rng).unwrap();
    let per_block = 12 / 4;
    for block in design.trials().chunks(per_block) {
        let mut seen: Vec<usize> = block.iter().flat_map(|t| t.locations().to_vec()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=12).collect::<Vec<_>>());
    }
}

#[test]
fn targets_must_divide_locations() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = TrialDesign::generate(&params(24, 10, 5), &mut rng).unwrap_err();
    assert_eq!(
        err,
        PrfError::Config(ConfigError::UnevenTrials {
            locations: 24,
            targets: 5
        })
    );
    let err = TrialDesign::generate(&params(4, 1, 8), &mut rng).unwrap_err();
    assert!(matches!(
        err,
        PrfError::Config(ConfigError::TooManyTargets { .. })
    ));
}

#[test]
fn degenerate_design_fails_verification() {
    let p = params(6, 1, 3);
    let design = TrialDesign::from_trials(vec![Trial::new(vec![1, 2, 3]), Trial::new(vec![4, 5])]);
    assert_eq!(
        design.verify(&p),
        Err(DesignError::TrialLength {
            trial: 1,
            expected: 3,
            actual: 2
        })
    );

    let design = TrialDesign::from_trials(vec![
        Trial::new(vec![1, 2, 3]),
        Trial::new(vec![1, 5, 6]),
    ]);
    assert_eq!(
        design.verify(&p),
        Err(DesignError::Repetitions {
            location: 1,
            expected: 1,
            actual: 2
        })
    );
}
