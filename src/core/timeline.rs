//! core/timeline.rs — sample layout of a single trial.
//!
//! A trial with `n` stimulus slots is laid out as
//! `[baseline, stim0, isi, stim1, isi, ..., stim(n-1)]`, all durations in samples.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub type Sample = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialTiming {
    pub baseline: Sample,
    pub stimulus: Sample,
    pub isi: Sample,
}

impl TrialTiming {
    pub fn check(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("baseline", self.baseline),
            ("stimulus", self.stimulus),
            ("inter-stimulus interval", self.isi),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositiveDuration { name });
            }
        }
        Ok(())
    }

    /// `baseline + n·stimulus + (n-1)·isi`.
    pub fn trial_len(&self, slots: usize) -> Sample {
        self.baseline + slots * self.stimulus + slots.saturating_sub(1) * self.isi
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Baseline,
    /// Presentation of the stimulus in slot `k`.
    Stimulus(usize),
    /// Gap following slot `k`.
    Interval(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialTimeline {
    timing: TrialTiming,
    slots: usize,
    phases: Vec<Phase>,
    /// Cumulative phase starts; one longer than `phases`.
    offsets: Vec<Sample>,
}

impl TrialTimeline {
    pub fn new(timing: TrialTiming, slots: usize) -> Result<Self, ConfigError> {
        timing.check()?;
        if slots == 0 {
            return Err(ConfigError::ZeroTargets);
        }

        let mut phases = Vec::with_capacity(2 * slots);
        let mut durations = Vec::with_capacity(2 * slots);
        phases.push(Phase::Baseline);
        durations.push(timing.baseline);
        for k in 0..slots {
            if k > 0 {
                phases.push(Phase::Interval(k - 1));
                durations.push(timing.isi);
            }
            phases.push(Phase::Stimulus(k));
            durations.push(timing.stimulus);
        }

        let mut offsets = Vec::with_capacity(durations.len() + 1);
        let mut acc = 0;
        offsets.push(acc);
        for d in durations {
            acc += d;
            offsets.push(acc);
        }

        Ok(Self {
            timing,
            slots,
            phases,
            offsets,
        })
    }

    #[inline]
    pub fn timing(&self) -> TrialTiming {
        self.timing
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    #[inline]
    pub fn total_samples(&self) -> Sample {
        self.offsets.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn phase_offsets(&self) -> &[Sample] {
        &self.offsets
    }

    pub fn phases(&self) -> impl Iterator<Item = (Phase, Range<Sample>)> + '_ {
        self.phases
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, self.offsets[i]..self.offsets[i + 1]))
    }

    /// Window of a phase, read from the cumulative offsets.
    pub fn phase_window(&self, phase: Phase) -> Option<Range<Sample>> {
        let idx = self.phases.iter().position(|&p| p == phase)?;
        Some(self.offsets[idx]..self.offsets[idx + 1])
    }

    /// Window of stimulus slot `k`, closed form:
    /// starts at `baseline + k·(stimulus + isi)`, spans `stimulus` samples.
    pub fn stimulus_window(&self, slot: usize) -> Option<Range<Sample>> {
        if slot >= self.slots {
            return None;
        }
        let t = self.timing;
        let start = t.baseline + slot * (t.stimulus + t.isi);
        Some(start..start + t.stimulus)
    }

    pub fn stimulus_windows(&self) -> Vec<Range<Sample>> {
        (0..self.slots)
            .filter_map(|k| self.stimulus_window(k))
            .collect()
    }
}
