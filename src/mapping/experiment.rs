//! End-to-end mapping run: design → tuning → per-trial simulation → aggregation.

use rand::Rng;
use tracing::{debug, info};

use super::activity::{ExperimentActivity, TrialActivity};
use super::aggregate::{DataIntegrityWarning, ResponseAggregator, SensitivityGrid};
use super::design::TrialDesign;
use super::interpolate::{UpsampledGrid, upsample};
use super::simulator::{SlotEvent, TrialResponseSimulator};
use super::tuning::ChannelTuning;
use crate::config::ExperimentParams;
use crate::core::grid::Grid;
use crate::core::timeline::TrialTimeline;
use crate::error::PrfResult;

/// Receives simulation progress, e.g. to drive a live display.
pub trait SlotObserver {
    fn on_slot(&mut self, trial_index: usize, event: &SlotEvent<'_>);

    fn on_trial_end(&mut self, _trial_index: usize, _activity: &TrialActivity) {}
}

/// Logs each slot at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SlotObserver for LogObserver {
    fn on_slot(&mut self, trial_index: usize, event: &SlotEvent<'_>) {
        debug!(
            trial = trial_index + 1,
            slot = event.slot + 1,
            location = event.location,
            start = event.window.start,
            end = event.window.end,
            "stimulus presented"
        );
    }
}

#[derive(Clone, Debug)]
pub struct ExperimentRun {
    pub design: TrialDesign,
    pub tuning: ChannelTuning,
    pub activity: ExperimentActivity,
    pub sensitivity: SensitivityGrid,
    pub warnings: Vec<DataIntegrityWarning>,
    /// Only present when interpolation is enabled.
    pub upsampled: Option<UpsampledGrid>,
}

pub struct Experiment {
    params: ExperimentParams,
    timeline: TrialTimeline,
}

impl Experiment {
    pub fn new(params: ExperimentParams) -> PrfResult<Self> {
        params.design.check()?;
        let timeline = TrialTimeline::new(params.timing, params.design.targets_per_trial)?;
        Ok(Self { params, timeline })
    }

    #[inline]
    pub fn params(&self) -> &ExperimentParams {
        &self.params
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.params.grid
    }

    #[inline]
    pub fn timeline(&self) -> &TrialTimeline {
        &self.timeline
    }

    pub fn design<R: Rng + ?Sized>(&self, rng: &mut R) -> PrfResult<TrialDesign> {
        TrialDesign::generate(&self.params.design, rng)
    }

    pub fn tuning<R: Rng + ?Sized>(&self, rng: &mut R) -> PrfResult<ChannelTuning> {
        ChannelTuning::generate(
            &self.params.grid,
            self.params.num_channels,
            self.params.peak_location,
            rng,
        )
    }

    /// Simulate every trial of `design` in order.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        design: &TrialDesign,
        tuning: &ChannelTuning,
        rng: &mut R,
        observer: &mut dyn SlotObserver,
    ) -> PrfResult<ExperimentActivity> {
        let sim =
            TrialResponseSimulator::new(&self.params.grid, tuning, &self.timeline, self.params.noise);
        let mut activity = ExperimentActivity::with_capacity(design.len());
        for (t, trial) in design.trials().iter().enumerate() {
            let trial_activity = sim.simulate_with(trial, rng, |ev| observer.on_slot(t, ev))?;
            observer.on_trial_end(t, &trial_activity);
            activity.push(trial_activity);
        }
        Ok(activity)
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> PrfResult<ExperimentRun> {
        self.run_observed(rng, &mut LogObserver)
    }

    pub fn run_observed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        observer: &mut dyn SlotObserver,
    ) -> PrfResult<ExperimentRun> {
        let design = self.design(rng)?;
        let tuning = self.tuning(rng)?;
        self.run_with(design, tuning, rng, observer)
    }

    /// Run with a caller-supplied design and tuning (both already validated).
    pub fn run_with<R: Rng + ?Sized>(
        &self,
        design: TrialDesign,
        tuning: ChannelTuning,
        rng: &mut R,
        observer: &mut dyn SlotObserver,
    ) -> PrfResult<ExperimentRun> {
        info!(
            trials = design.len(),
            channels = tuning.len(),
            samples_per_trial = self.timeline.total_samples(),
            "simulating"
        );
        let activity = self.simulate(&design, &tuning, rng, observer)?;

        let aggregation =
            ResponseAggregator::new(&self.params.grid, &self.timeline).aggregate(&activity, &design)?;
        if let Some((location, value)) = aggregation.grid.peak() {
            info!(location, value, "sensitivity peak");
        }

        let upsampled = match self.params.upsample {
            Some(factor) => Some(upsample(&aggregation.grid, factor)?),
            None => None,
        };

        Ok(ExperimentRun {
            design,
            tuning,
            activity,
            sensitivity: aggregation.grid,
            warnings: aggregation.warnings,
            upsampled,
        })
    }
}
