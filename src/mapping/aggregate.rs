//! Windowed response aggregation.
//!
//! For each location, every (trial, slot) that showed it contributes the activity of
//! all channels inside that slot's stimulus window. The pooled slices are reduced as
//! mean over samples, then over channels, then over occurrences.

use std::fmt;
use std::ops::Range;

use tracing::{debug, warn};

use super::activity::ExperimentActivity;
use super::design::TrialDesign;
use crate::core::field::Field2;
use crate::core::grid::{Coord, Grid, LocationId};
use crate::core::timeline::TrialTimeline;
use crate::error::{AggregateError, PrfResult};

/// Mean response per location, `rows × cols`.
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivityGrid {
    field: Field2,
}

impl SensitivityGrid {
    pub fn zeros(grid: &Grid) -> Self {
        Self {
            field: Field2::zeros(grid.rows(), grid.cols()),
        }
    }

    /// Row-major values for `grid`; `None` on length mismatch.
    pub fn from_values(grid: &Grid, values: Vec<f64>) -> Option<Self> {
        Field2::from_vec(grid.rows(), grid.cols(), values).map(|field| Self { field })
    }

    #[inline]
    pub fn field(&self) -> &Field2 {
        &self.field
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.field.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.field.cols()
    }

    /// Value at a 1-based coordinate.
    pub fn at(&self, coord: Coord) -> Option<f64> {
        if coord.row == 0 || coord.col == 0 {
            return None;
        }
        self.field.get(coord.row - 1, coord.col - 1)
    }

    /// Value of a row-major location id.
    pub fn value(&self, location: LocationId) -> Option<f64> {
        let idx = location.checked_sub(1)?;
        self.field.values().get(idx).copied()
    }

    /// Highest cell as (location, value).
    pub fn peak(&self) -> Option<(LocationId, f64)> {
        self.field
            .argmax()
            .map(|(r, c, v)| (r * self.field.cols() + c + 1, v))
    }

    fn set(&mut self, coord: Coord, value: f64) {
        self.field.set(coord.row - 1, coord.col - 1, value);
    }
}

/// Non-fatal finding surfaced alongside the estimate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataIntegrityWarning {
    /// No trial showed this location; its cell is left at zero.
    UnsampledLocation { location: LocationId },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsampledLocation { location } => {
                write!(f, "location {location} was never shown; cell set to 0")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Aggregation {
    pub grid: SensitivityGrid,
    pub warnings: Vec<DataIntegrityWarning>,
}

pub struct ResponseAggregator<'a> {
    grid: &'a Grid,
    timeline: &'a TrialTimeline,
}

impl<'a> ResponseAggregator<'a> {
    pub fn new(grid: &'a Grid, timeline: &'a TrialTimeline) -> Self {
        Self { grid, timeline }
    }

    pub fn aggregate(
        &self,
        activity: &ExperimentActivity,
        design: &TrialDesign,
    ) -> PrfResult<Aggregation> {
        let mut out = SensitivityGrid::zeros(self.grid);
        if design.is_empty() {
            debug!("empty design, returning zero grid");
            return Ok(Aggregation {
                grid: out,
                warnings: Vec::new(),
            });
        }
        self.check_shapes(activity, design)?;

        let windows: Vec<Range<usize>> = self.timeline.stimulus_windows();
        let mut warnings = Vec::new();
        for location in self.grid.locations() {
            let mut sum = 0.0;
            let mut n = 0usize;
            for (t, slot) in design.occurrences(location) {
                let window = windows
                    .get(slot)
                    .cloned()
                    .ok_or(AggregateError::SlotOutsideTimeline {
                        trial: t,
                        slot,
                        slots: windows.len(),
                    })?;
                let trial = activity.trial(t).ok_or(AggregateError::TrialCount {
                    design: design.len(),
                    activity: activity.len(),
                })?;
                sum += trial.window_mean(window);
                n += 1;
            }

            let Some(coord) = self.grid.coord_of(location) else {
                continue;
            };
            if n == 0 {
                warn!(location, "location never shown; cell left at zero");
                warnings.push(DataIntegrityWarning::UnsampledLocation { location });
                continue;
            }
            out.set(coord, sum / n as f64);
        }

        Ok(Aggregation {
            grid: out,
            warnings,
        })
    }

    fn check_shapes(
        &self,
        activity: &ExperimentActivity,
        design: &TrialDesign,
    ) -> Result<(), AggregateError> {
        if activity.len() < design.len() {
            return Err(AggregateError::TrialCount {
                design: design.len(),
                activity: activity.len(),
            });
        }
        let needed = self.timeline.total_samples();
        let channels = activity.trials()[0].channels();
        for (t, trial) in activity.trials().iter().take(design.len()).enumerate() {
            if trial.channels() == 0 {
                return Err(AggregateError::EmptyChannels { trial: t });
            }
            if trial.channels() != channels {
                return Err(AggregateError::ChannelMismatch {
                    trial: t,
                    expected: channels,
                    actual: trial.channels(),
                });
            }
            if trial.samples() < needed {
                return Err(AggregateError::SampleCount {
                    trial: t,
                    expected: needed,
                    actual: trial.samples(),
                });
            }
        }
        Ok(())
    }
}
