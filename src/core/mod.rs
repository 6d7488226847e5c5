//! Numeric primitives without experiment semantics (grid geometry, sample timing, kernels).

pub mod field;
pub mod grid;
pub mod kernel;
pub mod noise;
pub mod timeline;
