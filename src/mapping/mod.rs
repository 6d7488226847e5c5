//! PRF mapping pipeline.
//!
//! - [`design`]: counterbalanced trial design with a mandatory self-check
//! - [`tuning`]: per-channel preferred locations around the population peak
//! - [`simulator`]: synthetic channel × sample traces for one trial
//! - [`aggregate`]: windowed mean response per location
//! - [`interpolate`]: presentation-only upsampling of the estimate
//! - [`experiment`]: the end-to-end runner and slot observers

pub mod activity;
pub mod aggregate;
pub mod design;
pub mod experiment;
pub mod interpolate;
pub mod simulator;
pub mod tuning;

pub use activity::{ExperimentActivity, TrialActivity};
pub use aggregate::{Aggregation, DataIntegrityWarning, ResponseAggregator, SensitivityGrid};
pub use design::{DesignParams, Trial, TrialDesign};
pub use experiment::{Experiment, ExperimentRun, LogObserver, SlotObserver};
pub use interpolate::{DEFAULT_UPSAMPLE_FACTOR, UpsampledGrid, upsample};
pub use simulator::{NoiseParams, SlotEvent, TrialResponseSimulator};
pub use tuning::ChannelTuning;
