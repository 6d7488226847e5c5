//! Synthetic multi-channel response of one trial.
//!
//! Every sample starts as a low uniform noise floor. During each stimulus window the
//! channel gets an extra `strength · gain · U[0,1)` per sample, where `strength` is the
//! Gaussian falloff of the distance between the channel's preferred location and the
//! shown location. Nothing is added outside the windows and nothing is clipped.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activity::TrialActivity;
use super::design::Trial;
use super::tuning::ChannelTuning;
use crate::core::grid::{Coord, Grid, LocationId};
use crate::core::kernel::response_strength;
use crate::core::noise;
use crate::core::timeline::{Phase, TrialTimeline};
use crate::error::{ConfigError, PrfResult};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Amplitude of the uniform baseline floor.
    pub noise_floor: f64,
    /// Amplitude of the stimulus-driven term at strength 1.
    pub response_gain: f64,
}

impl NoiseParams {
    pub fn check(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("noise floor", self.noise_floor),
            ("response gain", self.response_gain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAmplitude { name, value });
            }
        }
        Ok(())
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            noise_floor: 0.1,
            response_gain: 1.0,
        }
    }
}

/// Emitted after a stimulus window has been written.
#[derive(Debug)]
pub struct SlotEvent<'a> {
    pub slot: usize,
    pub location: LocationId,
    pub window: Range<usize>,
    /// Trial activity accumulated up to and including this slot.
    pub activity: &'a TrialActivity,
}

pub struct TrialResponseSimulator<'a> {
    grid: &'a Grid,
    tuning: &'a ChannelTuning,
    timeline: &'a TrialTimeline,
    noise: NoiseParams,
}

impl<'a> TrialResponseSimulator<'a> {
    pub fn new(
        grid: &'a Grid,
        tuning: &'a ChannelTuning,
        timeline: &'a TrialTimeline,
        noise: NoiseParams,
    ) -> Self {
        Self {
            grid,
            tuning,
            timeline,
            noise,
        }
    }

    #[inline]
    pub fn timeline(&self) -> &TrialTimeline {
        self.timeline
    }

    /// Kernel weight of `location` for `channel`; `None` for unknown indices.
    pub fn response_strength(&self, channel: usize, location: LocationId) -> Option<f64> {
        let preferred = self.tuning.channel(channel)?;
        let shown = self.grid.coord_of(location)?;
        Some(response_strength(
            preferred.distance(shown),
            self.tuning.sigma(),
        ))
    }

    pub fn simulate<R: Rng + ?Sized>(&self, trial: &Trial, rng: &mut R) -> PrfResult<TrialActivity> {
        self.simulate_with(trial, rng, |_| {})
    }

    /// Like [`simulate`](Self::simulate), calling `on_slot` once per stimulus slot.
    pub fn simulate_with<R, F>(
        &self,
        trial: &Trial,
        rng: &mut R,
        mut on_slot: F,
    ) -> PrfResult<TrialActivity>
    where
        R: Rng + ?Sized,
        F: FnMut(&SlotEvent<'_>),
    {
        if trial.len() != self.timeline.slots() {
            return Err(ConfigError::SlotMismatch {
                expected: self.timeline.slots(),
                actual: trial.len(),
            }
            .into());
        }
        let shown: Vec<(LocationId, Coord)> = trial
            .locations()
            .iter()
            .map(|&location| {
                self.grid
                    .coord_of(location)
                    .map(|coord| (location, coord))
                    .ok_or(ConfigError::LocationOutOfRange {
                        location,
                        locations: self.grid.len(),
                    })
            })
            .collect::<Result<_, _>>()?;

        let channels = self.tuning.len();
        let mut activity = TrialActivity::zeros(channels, self.timeline.total_samples());
        for ch in 0..channels {
            noise::fill_uniform(rng, activity.channel_mut(ch), self.noise.noise_floor);
        }

        let sigma = self.tuning.sigma();
        for (slot, &(location, coord)) in shown.iter().enumerate() {
            let Some(window) = self.timeline.phase_window(Phase::Stimulus(slot)) else {
                continue;
            };
            for (ch, preferred) in self.tuning.preferred().iter().enumerate() {
                let strength = response_strength(preferred.distance(coord), sigma);
                let scale = strength * self.noise.response_gain;
                noise::add_uniform(rng, &mut activity.channel_mut(ch)[window.clone()], scale);
            }
            on_slot(&SlotEvent {
                slot,
                location,
                window,
                activity: &activity,
            });
        }
        Ok(activity)
    }
}
