//! Presentation-only upsampling of a sensitivity grid.
//!
//! Separable Catmull-Rom cubic with edge replication. Output sample `i` sits at node
//! coordinate `i / factor`; samples past the last node clamp to it. Original nodes are
//! reproduced exactly.

use super::aggregate::SensitivityGrid;
use crate::core::field::Field2;
use crate::error::{ConfigError, PrfResult};

pub const DEFAULT_UPSAMPLE_FACTOR: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct UpsampledGrid {
    factor: usize,
    field: Field2,
}

impl UpsampledGrid {
    #[inline]
    pub fn factor(&self) -> usize {
        self.factor
    }

    #[inline]
    pub fn field(&self) -> &Field2 {
        &self.field
    }
}

pub fn upsample(grid: &SensitivityGrid, factor: usize) -> PrfResult<UpsampledGrid> {
    if factor == 0 {
        return Err(ConfigError::ZeroUpsampleFactor.into());
    }
    let src = grid.field();
    let (rows, cols) = (src.rows(), src.cols());
    let (out_rows, out_cols) = (rows * factor, cols * factor);

    // Pass 1: along columns, rows × out_cols.
    let mut wide = Vec::with_capacity(rows * out_cols);
    for r in 0..rows {
        let line = src.row(r);
        wide.extend((0..out_cols).map(|j| sample_line(line, node_coord(j, factor))));
    }

    // Pass 2: along rows, out_rows × out_cols.
    let mut data = vec![0.0; out_rows * out_cols];
    let mut column = vec![0.0; rows];
    for j in 0..out_cols {
        for (r, v) in column.iter_mut().enumerate() {
            *v = wide[r * out_cols + j];
        }
        for i in 0..out_rows {
            data[i * out_cols + j] = sample_line(&column, node_coord(i, factor));
        }
    }

    let field = Field2::from_vec(out_rows, out_cols, data)
        .ok_or(ConfigError::ZeroUpsampleFactor)?;
    Ok(UpsampledGrid { factor, field })
}

#[inline]
fn node_coord(i: usize, factor: usize) -> f64 {
    i as f64 / factor as f64
}

/// Cubic convolution of `line` at fractional index `x`.
fn sample_line(line: &[f64], x: f64) -> f64 {
    let n = line.len();
    if n == 0 {
        return 0.0;
    }
    let x = x.clamp(0.0, (n - 1) as f64);
    let i = x.floor() as usize;
    let t = x - i as f64;
    if t == 0.0 {
        return line[i];
    }
    let at = |k: isize| line[k.clamp(0, n as isize - 1) as usize];
    let i = i as isize;
    catmull_rom(at(i - 1), at(i), at(i + 1), at(i + 2), t)
}

#[inline]
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}
