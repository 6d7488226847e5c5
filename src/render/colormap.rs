use clap::ValueEnum;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Colormap {
    #[default]
    Viridis,
    Hot,
    Gray,
    Jet,
}

impl Colormap {
    fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            Self::Viridis => &[
                [68, 1, 84],
                [59, 82, 139],
                [33, 145, 140],
                [94, 201, 98],
                [253, 231, 37],
            ],
            Self::Hot => &[[0, 0, 0], [230, 0, 0], [255, 210, 0], [255, 255, 255]],
            Self::Gray => &[[0, 0, 0], [255, 255, 255]],
            Self::Jet => &[
                [0, 0, 143],
                [0, 0, 255],
                [0, 255, 255],
                [255, 255, 0],
                [255, 0, 0],
                [128, 0, 0],
            ],
        }
    }

    /// Color for `t` in [0, 1]; out-of-range and NaN clamp to the ends.
    pub fn rgb(self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f64;
        let i = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - i as f64;
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (anchors[i], anchors[i + 1]);
        RGBColor(lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2]))
    }

    /// Color of `value` normalized into `[lo, hi]`; a flat range maps to the middle.
    pub fn map(self, value: f64, lo: f64, hi: f64) -> RGBColor {
        let span = hi - lo;
        let t = if span > f64::EPSILON {
            (value - lo) / span
        } else {
            0.5
        };
        self.rgb(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_anchors() {
        assert_eq!(Colormap::Gray.rgb(0.0), RGBColor(0, 0, 0));
        assert_eq!(Colormap::Gray.rgb(1.0), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Viridis.rgb(1.0), RGBColor(253, 231, 37));
        assert_eq!(Colormap::Hot.rgb(-3.0), RGBColor(0, 0, 0));
        assert_eq!(Colormap::Jet.rgb(f64::NAN), RGBColor(0, 0, 143));
    }

    #[test]
    fn gray_is_monotone() {
        let mut prev = 0u8;
        for step in 0..=100 {
            let RGBColor(r, g, b) = Colormap::Gray.rgb(step as f64 / 100.0);
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn flat_range_maps_to_middle() {
        assert_eq!(
            Colormap::Gray.map(3.0, 3.0, 3.0),
            Colormap::Gray.rgb(0.5)
        );
    }
}
