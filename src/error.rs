//! Error types for configuration, design verification and aggregation.

use thiserror::Error;

use crate::core::grid::LocationId;

/// Invalid parameters, reported before any simulation work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid with a zero dimension.
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    /// Grid shape disagrees with the location count used elsewhere.
    #[error("grid {rows}x{cols} has {grid_locations} locations, design expects {design_locations}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        grid_locations: usize,
        design_locations: usize,
    },

    #[error("targets per trial must be positive")]
    ZeroTargets,

    #[error("{targets} targets per trial exceed the {locations} available locations")]
    TooManyTargets { targets: usize, locations: usize },

    /// A trial would hold a partial group.
    #[error("{locations} locations cannot be split evenly into trials of {targets}")]
    UnevenTrials { locations: usize, targets: usize },

    #[error("{name} duration must be positive")]
    NonPositiveDuration { name: &'static str },

    #[error("channel count must be positive")]
    ZeroChannels,

    #[error("location {location} is outside the grid (1..={locations})")]
    LocationOutOfRange {
        location: LocationId,
        locations: usize,
    },

    #[error("channel {channel} prefers ({row}, {col}), outside the {rows}x{cols} grid")]
    PreferredOutOfRange {
        channel: usize,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("trial shows {actual} stimuli but the timeline has {expected} slots")]
    SlotMismatch { expected: usize, actual: usize },

    #[error("{name} must be finite and non-negative (got {value})")]
    InvalidAmplitude { name: &'static str, value: f64 },

    #[error("upsampling factor must be at least 1")]
    ZeroUpsampleFactor,

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },
}

/// A generated design failed its self-check. Always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    #[error("design has {actual} trials, expected {expected}")]
    TrialCount { expected: usize, actual: usize },

    #[error("trial {trial} shows {actual} locations, expected {expected}")]
    TrialLength {
        trial: usize,
        expected: usize,
        actual: usize,
    },

    #[error("trial {trial} shows location {location}, outside 1..={locations}")]
    LocationOutOfRange {
        trial: usize,
        location: LocationId,
        locations: usize,
    },

    #[error("trial {trial} shows location {location} more than once")]
    DuplicateLocation { trial: usize, location: LocationId },

    #[error("location {location} appears {actual} times, expected {expected}")]
    Repetitions {
        location: LocationId,
        expected: usize,
        actual: usize,
    },
}

/// Recorded activity does not fit the design or the trial timeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("design has {design} trials but only {activity} were recorded")]
    TrialCount { design: usize, activity: usize },

    #[error("trial {trial} has {actual} samples, timeline needs {expected}")]
    SampleCount {
        trial: usize,
        expected: usize,
        actual: usize,
    },

    #[error("trial {trial} has {actual} channels, expected {expected}")]
    ChannelMismatch {
        trial: usize,
        expected: usize,
        actual: usize,
    },

    #[error("trial {trial} has no channels")]
    EmptyChannels { trial: usize },

    #[error("trial {trial} uses slot {slot} but the timeline has {slots} slots")]
    SlotOutsideTimeline {
        trial: usize,
        slot: usize,
        slots: usize,
    },
}

/// Any fatal failure of the mapping pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrfError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("design integrity error: {0}")]
    Design(#[from] DesignError),

    #[error("aggregation error: {0}")]
    Aggregate(#[from] AggregateError),
}

pub type PrfResult<T> = Result<T, PrfError>;
