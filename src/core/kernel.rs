//! Spatial kernels shared by channel tuning and response synthesis.

/// Isotropic Gaussian falloff `exp(-0.5 (d/σ)²)`, in [0, 1] and exactly 1 at d = 0.
pub fn response_strength(distance: f64, sigma: f64) -> f64 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    let z = distance / sigma;
    (-0.5 * z * z).exp()
}

/// Rayleigh-distributed radius `σ sqrt(-2 ln u)` for `u` in (0, 1].
///
/// With a uniform angle this yields 2-D Gaussian offsets of spread σ.
pub fn rayleigh_radius(sigma: f64, u: f64) -> f64 {
    let u = u.clamp(f64::MIN_POSITIVE, 1.0);
    sigma * (-2.0 * u.ln()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_is_one_at_zero_distance() {
        assert_eq!(response_strength(0.0, 0.8), 1.0);
        assert_eq!(response_strength(0.0, 0.0), 1.0);
        assert_eq!(response_strength(0.5, 0.0), 0.0);
    }

    #[test]
    fn strength_non_increasing_in_distance() {
        let sigma = 24f64.sqrt() / 6.0;
        let mut prev = response_strength(0.0, sigma);
        for step in 1..200 {
            let d = step as f64 * 0.05;
            let s = response_strength(d, sigma);
            assert!(s <= prev, "d={d}: {s} > {prev}");
            assert!((0.0..=1.0).contains(&s));
            prev = s;
        }
    }

    #[test]
    fn strength_at_one_sigma() {
        let s = response_strength(2.0, 2.0);
        assert!((s - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn rayleigh_radius_bounds() {
        assert_eq!(rayleigh_radius(1.5, 1.0), 0.0);
        assert!(rayleigh_radius(1.5, 0.5) > 0.0);
        assert!(rayleigh_radius(1.0, 0.0).is_finite());
    }
}
