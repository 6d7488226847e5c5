use rand::{Rng, SeedableRng};

/// Single non-negative uniform sample in [0, amplitude).
#[inline]
pub fn uniform_tick<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    amplitude * rng.random::<f64>()
}

/// Uniform sample in (0, 1]; safe to pass to `ln`.
#[inline]
pub fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}

/// Overwrite `out` with uniform noise in [0, amplitude).
pub fn fill_uniform<R: Rng + ?Sized>(rng: &mut R, out: &mut [f64], amplitude: f64) {
    for v in out.iter_mut() {
        *v = uniform_tick(rng, amplitude);
    }
}

/// Add uniform noise in [0, scale) on top of `out`.
pub fn add_uniform<R: Rng + ?Sized>(rng: &mut R, out: &mut [f64], scale: f64) {
    for v in out.iter_mut() {
        *v += uniform_tick(rng, scale);
    }
}

// --- standalone traces ---
pub fn uniform_noise(n: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n).map(|_| uniform_tick(&mut rng, amplitude)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_noise_is_seeded_and_bounded() {
        let a = uniform_noise(512, 0.1, 7);
        let b = uniform_noise(512, 0.1, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (0.0..0.1).contains(&v)));
        let mean = a.iter().sum::<f64>() / a.len() as f64;
        assert!((mean - 0.05).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn add_uniform_keeps_existing_values() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut buf = vec![1.0; 64];
        add_uniform(&mut rng, &mut buf, 0.0);
        assert!(buf.iter().all(|&v| v == 1.0));
        add_uniform(&mut rng, &mut buf, 0.5);
        assert!(buf.iter().all(|&v| (1.0..1.5).contains(&v)));
    }

    #[test]
    fn open_unit_excludes_zero() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let u = open_unit(&mut rng);
            assert!(u > 0.0 && u <= 1.0);
        }
    }
}
