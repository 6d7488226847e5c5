/// Row-major 2-D scalar field, 0-based indexing.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2 {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns `None` when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// (min, max) over finite values; `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// (row, col, value) of the first maximal finite cell.
    pub fn argmax(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((idx, v));
            }
        }
        best.map(|(idx, v)| (idx / self.cols, idx % self.cols, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_and_range() {
        let field = Field2::from_vec(2, 3, vec![0.1, 0.5, f64::NAN, 0.2, 0.9, -1.0]).unwrap();
        assert_eq!(field.argmax(), Some((1, 1, 0.9)));
        assert_eq!(field.min_max(), Some((-1.0, 0.9)));
        assert_eq!(field.row(1), &[0.2, 0.9, -1.0]);
        assert_eq!(field.get(2, 0), None);
    }

    #[test]
    fn from_vec_checks_shape() {
        assert!(Field2::from_vec(2, 2, vec![0.0; 3]).is_none());
        assert!(Field2::zeros(0, 0).argmax().is_none());
    }
}
