//! Counterbalanced trial design.
//!
//! Each repetition block is a uniform permutation of every location, cut into
//! consecutive groups of `targets_per_trial`. A block therefore shows each location
//! exactly once, and no trial can repeat a location. The result is verified before
//! it is handed out.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::core::grid::LocationId;
use crate::error::{ConfigError, DesignError, PrfResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DesignParams {
    pub total_locations: usize,
    pub repetitions_per_location: usize,
    pub targets_per_trial: usize,
}

impl DesignParams {
    pub fn check(&self) -> Result<(), ConfigError> {
        let locations = self.total_locations;
        let targets = self.targets_per_trial;
        if targets == 0 {
            return Err(ConfigError::ZeroTargets);
        }
        if locations == 0 {
            return Err(ConfigError::EmptyGrid { rows: 0, cols: 0 });
        }
        if targets > locations {
            return Err(ConfigError::TooManyTargets { targets, locations });
        }
        if locations % targets != 0 {
            return Err(ConfigError::UnevenTrials { locations, targets });
        }
        Ok(())
    }

    /// `total_locations · repetitions_per_location / targets_per_trial`.
    pub fn expected_trials(&self) -> usize {
        if self.targets_per_trial == 0 {
            return 0;
        }
        self.total_locations * self.repetitions_per_location / self.targets_per_trial
    }
}

/// Ordered locations shown in one trial, one per stimulus slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trial(Vec<LocationId>);

impl Trial {
    pub fn new(locations: Vec<LocationId>) -> Self {
        Self(locations)
    }

    #[inline]
    pub fn locations(&self) -> &[LocationId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn location(&self, slot: usize) -> Option<LocationId> {
        self.0.get(slot).copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrialDesign {
    trials: Vec<Trial>,
}

impl TrialDesign {
    /// Generate and verify a design. Zero repetitions yield an empty design.
    pub fn generate<R: Rng + ?Sized>(params: &DesignParams, rng: &mut R) -> PrfResult<Self> {
        params.check()?;

        let mut trials = Vec::with_capacity(params.expected_trials());
        let mut block: Vec<LocationId> = (1..=params.total_locations).collect();
        for rep in 0..params.repetitions_per_location {
            block.shuffle(rng);
            trials.extend(
                block
                    .chunks(params.targets_per_trial)
                    .map(|chunk| Trial::new(chunk.to_vec())),
            );
            debug!(block = rep, trials = trials.len(), "design block drawn");
        }

        let design = Self { trials };
        design.verify(params)?;
        Ok(design)
    }

    /// Wrap trials without checking them; call [`TrialDesign::verify`] before use.
    pub fn from_trials(trials: Vec<Trial>) -> Self {
        Self { trials }
    }

    /// Trial count, per-trial length/range/uniqueness, then per-location tally.
    pub fn verify(&self, params: &DesignParams) -> Result<(), DesignError> {
        let expected = params.expected_trials();
        if self.trials.len() != expected {
            return Err(DesignError::TrialCount {
                expected,
                actual: self.trials.len(),
            });
        }

        let locations = params.total_locations;
        for (idx, trial) in self.trials.iter().enumerate() {
            if trial.len() != params.targets_per_trial {
                return Err(DesignError::TrialLength {
                    trial: idx,
                    expected: params.targets_per_trial,
                    actual: trial.len(),
                });
            }
            if let Some(&location) = trial.locations().iter().find(|&&l| l == 0 || l > locations)
            {
                return Err(DesignError::LocationOutOfRange {
                    trial: idx,
                    location,
                    locations,
                });
            }
            let mut sorted = trial.locations().to_vec();
            sorted.sort_unstable();
            if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(DesignError::DuplicateLocation {
                    trial: idx,
                    location: pair[0],
                });
            }
        }

        let tally = self.tally(locations);
        for (idx, &count) in tally.iter().enumerate() {
            if count != params.repetitions_per_location {
                return Err(DesignError::Repetitions {
                    location: idx + 1,
                    expected: params.repetitions_per_location,
                    actual: count,
                });
            }
        }
        Ok(())
    }

    /// Occurrences per location; index `id - 1`. Out-of-range ids are ignored.
    pub fn tally(&self, total_locations: usize) -> Vec<usize> {
        let mut counts = vec![0usize; total_locations];
        for trial in &self.trials {
            for &location in trial.locations() {
                if let Some(slot) = location.checked_sub(1).and_then(|i| counts.get_mut(i)) {
                    *slot += 1;
                }
            }
        }
        counts
    }

    /// `(trial_index, slot)` pairs in which `location` is shown, in design order.
    pub fn occurrences(&self, location: LocationId) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.trials.iter().enumerate().flat_map(move |(t, trial)| {
            trial
                .locations()
                .iter()
                .enumerate()
                .filter(move |&(_, &l)| l == location)
                .map(move |(slot, _)| (t, slot))
        })
    }

    #[inline]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    #[inline]
    pub fn trial(&self, idx: usize) -> Option<&Trial> {
        self.trials.get(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrfError;
    use rand::SeedableRng;

    fn params(total: usize, reps: usize, targets: usize) -> DesignParams {
        DesignParams {
            total_locations: total,
            repetitions_per_location: reps,
            targets_per_trial: targets,
        }
    }

    #[test]
    fn balanced_for_many_seeds() {
        for seed in 0..20 {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            for &(total, reps, targets) in &[(24, 10, 3), (12, 4, 4), (9, 2, 1), (6, 5, 6)] {
                let p = params(total, reps, targets);
                let design = TrialDesign::generate(&p, &mut rng).unwrap();
                assert_eq!(design.len(), p.expected_trials());
                assert!(design.tally(total).iter().all(|&c| c == reps));
            }
        }
    }

    #[test]
    fn same_seed_same_design() {
        let p = params(24, 3, 3);
        let a = TrialDesign::generate(&p, &mut rand::rngs::StdRng::seed_from_u64(5)).unwrap();
        let b = TrialDesign::generate(&p, &mut rand::rngs::StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn uneven_split_is_a_config_error() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let err = TrialDesign::generate(&params(10, 2, 3), &mut rng).unwrap_err();
        assert_eq!(
            err,
            PrfError::Config(ConfigError::UnevenTrials {
                locations: 10,
                targets: 3
            })
        );
        let err = TrialDesign::generate(&params(4, 1, 0), &mut rng).unwrap_err();
        assert_eq!(err, PrfError::Config(ConfigError::ZeroTargets));
    }

    #[test]
    fn verify_flags_duplicates_and_tally() {
        let p = params(4, 1, 2);
        let dup = TrialDesign::from_trials(vec![Trial::new(vec![1, 1]), Trial::new(vec![3, 4])]);
        assert_eq!(
            dup.verify(&p),
            Err(DesignError::DuplicateLocation {
                trial: 0,
                location: 1
            })
        );

        let short = TrialDesign::from_trials(vec![Trial::new(vec![1, 2])]);
        assert_eq!(
            short.verify(&p),
            Err(DesignError::TrialCount {
                expected: 2,
                actual: 1
            })
        );

        let skewed = TrialDesign::from_trials(vec![Trial::new(vec![1, 2]), Trial::new(vec![2, 3])]);
        assert_eq!(
            skewed.verify(&p),
            Err(DesignError::Repetitions {
                location: 2,
                expected: 1,
                actual: 2
            })
        );

        let outside = TrialDesign::from_trials(vec![Trial::new(vec![1, 5]), Trial::new(vec![2, 3])]);
        assert_eq!(
            outside.verify(&p),
            Err(DesignError::LocationOutOfRange {
                trial: 0,
                location: 5,
                locations: 4
            })
        );
    }

    #[test]
    fn occurrences_report_trial_and_slot() {
        let design = TrialDesign::from_trials(vec![
            Trial::new(vec![1, 2, 3]),
            Trial::new(vec![3, 1, 2]),
        ]);
        let hits: Vec<_> = design.occurrences(3).collect();
        assert_eq!(hits, vec![(0, 2), (1, 0)]);
        assert_eq!(design.occurrences(9).count(), 0);
    }
}
