//! Consumers of the estimate: colormaps, PNG heatmaps and plain-text tables.
//! Nothing here feeds back into the mapping pipeline.

pub mod colormap;
pub mod heatmap;
pub mod table;
