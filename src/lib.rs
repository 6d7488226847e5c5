//! Population receptive field (PRF) mapping simulator.
//!
//! A grid of stimulus locations is shown to a population of simulated channels with
//! randomized spatial tuning. The synthetic responses are pooled per location into a
//! sensitivity map.
//!
//! ```text
//! TrialDesign ──► TrialResponseSimulator ──► ExperimentActivity ──► ResponseAggregator
//!                        ▲                                                 │
//!                  ChannelTuning                                    SensitivityGrid
//!                                                                          │
//!                                                              upsample ──► render
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod mapping;
pub mod render;

pub use error::{PrfError, PrfResult};
