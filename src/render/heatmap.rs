use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::colormap::Colormap;
use crate::core::field::Field2;

#[derive(Debug, Clone)]
pub struct HeatmapStyle {
    pub colormap: Colormap,
    pub size: (u32, u32),
    pub caption: String,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            size: (900, 600),
            caption: "PRF sensitivity".to_string(),
        }
    }
}

/// Write `field` as a PNG heatmap, row 0 at the top.
pub fn write_heatmap_png(
    path: &Path,
    field: &Field2,
    style: &HeatmapStyle,
) -> Result<(), Box<dyn Error>> {
    let (rows, cols) = (field.rows(), field.cols());
    let (lo, hi) = field.min_max().unwrap_or((0.0, 0.0));

    let root = BitMapBackend::new(path, style.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("column")
        .y_desc("row")
        .y_label_formatter(&|v| format!("{:.0}", rows as f64 - *v))
        .draw()?;

    let cells = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
    chart.draw_series(cells.map(|(r, c)| {
        let value = field.get(r, c).unwrap_or(f64::NAN);
        let y0 = (rows - r - 1) as f64;
        Rectangle::new(
            [(c as f64, y0), (c as f64 + 1.0, y0 + 1.0)],
            style.colormap.map(value, lo, hi).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
