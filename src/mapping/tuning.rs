use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::core::grid::{Coord, Grid, LocationId};
use crate::core::kernel::rayleigh_radius;
use crate::core::noise::open_unit;
use crate::error::{ConfigError, PrfResult};

/// Preferred location of every channel, fixed for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelTuning {
    preferred: Vec<Coord>,
    sigma: f64,
}

impl ChannelTuning {
    /// Channel `i` (1-based) sits at angle `2π·i/n` around the peak, at a Rayleigh
    /// radius of spread `grid.tuning_sigma()`; the rounded offset wraps toroidally.
    pub fn generate<R: Rng + ?Sized>(
        grid: &Grid,
        num_channels: usize,
        peak: LocationId,
        rng: &mut R,
    ) -> PrfResult<Self> {
        if num_channels == 0 {
            return Err(ConfigError::ZeroChannels.into());
        }
        let peak_coord = grid.coord_of(peak).ok_or(ConfigError::LocationOutOfRange {
            location: peak,
            locations: grid.len(),
        })?;

        let sigma = grid.tuning_sigma();
        let preferred = (1..=num_channels)
            .map(|i| {
                let angle = TAU * i as f64 / num_channels as f64;
                let radius = rayleigh_radius(sigma, open_unit(rng));
                let d_row = (radius * angle.sin()).round() as i64;
                let d_col = (radius * angle.cos()).round() as i64;
                grid.wrap(peak_coord.row as i64 + d_row, peak_coord.col as i64 + d_col)
            })
            .collect::<Vec<_>>();

        debug!(
            channels = num_channels,
            peak,
            sigma,
            "channel tuning assigned"
        );
        Ok(Self { preferred, sigma })
    }

    /// Fixed assignment, e.g. to pin a channel onto a known location.
    pub fn from_preferred(grid: &Grid, preferred: Vec<Coord>) -> PrfResult<Self> {
        if preferred.is_empty() {
            return Err(ConfigError::ZeroChannels.into());
        }
        if let Some((channel, c)) = preferred
            .iter()
            .enumerate()
            .find(|(_, c)| !grid.contains_coord(**c))
        {
            return Err(ConfigError::PreferredOutOfRange {
                channel,
                row: c.row,
                col: c.col,
                rows: grid.rows(),
                cols: grid.cols(),
            }
            .into());
        }
        Ok(Self {
            preferred,
            sigma: grid.tuning_sigma(),
        })
    }

    #[inline]
    pub fn preferred(&self) -> &[Coord] {
        &self.preferred
    }

    #[inline]
    pub fn channel(&self, idx: usize) -> Option<Coord> {
        self.preferred.get(idx).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.preferred.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty()
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}
