use std::ops::Range;

/// Channels × samples response matrix of one trial, channel-major.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialActivity {
    channels: usize,
    samples: usize,
    data: Vec<f64>,
}

impl TrialActivity {
    pub fn zeros(channels: usize, samples: usize) -> Self {
        Self::filled(channels, samples, 0.0)
    }

    pub fn filled(channels: usize, samples: usize, value: f64) -> Self {
        Self {
            channels,
            samples,
            data: vec![value; channels * samples],
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn channel(&self, ch: usize) -> &[f64] {
        &self.data[ch * self.samples..(ch + 1) * self.samples]
    }

    #[inline]
    pub fn channel_mut(&mut self, ch: usize) -> &mut [f64] {
        &mut self.data[ch * self.samples..(ch + 1) * self.samples]
    }

    /// Mean over `window` for each channel, then mean over channels.
    ///
    /// Caller guarantees `window` lies inside the trial and is non-empty.
    pub fn window_mean(&self, window: Range<usize>) -> f64 {
        debug_assert!(window.end <= self.samples && window.start < window.end);
        if self.channels == 0 {
            return 0.0;
        }
        let len = window.len() as f64;
        let sum_of_means: f64 = (0..self.channels)
            .map(|ch| self.channel(ch)[window.clone()].iter().sum::<f64>() / len)
            .sum();
        sum_of_means / self.channels as f64
    }
}

/// Trial × channel × sample tensor, trials in design order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperimentActivity {
    trials: Vec<TrialActivity>,
}

impl ExperimentActivity {
    pub fn with_capacity(trials: usize) -> Self {
        Self {
            trials: Vec::with_capacity(trials),
        }
    }

    pub fn from_trials(trials: Vec<TrialActivity>) -> Self {
        Self { trials }
    }

    pub fn push(&mut self, trial: TrialActivity) {
        self.trials.push(trial);
    }

    #[inline]
    pub fn trials(&self) -> &[TrialActivity] {
        &self.trials
    }

    #[inline]
    pub fn trial(&self, idx: usize) -> Option<&TrialActivity> {
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
