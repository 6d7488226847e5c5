use rand::SeedableRng;
use rand::rngs::StdRng;

use prfmap::core::grid::Grid;
use prfmap::mapping::ChannelTuning;

#[test]
fn wrapped_preferences_lie_inside_grid() {
    let mut rng = StdRng::seed_from_u64(17);
    for (rows, cols) in [(4, 6), (3, 3), (1, 8), (7, 2), (20, 20)] {
        let grid = Grid::new(rows, cols).unwrap();
        for peak in grid.locations() {
            let tuning = ChannelTuning::generate(&grid, 50, peak, &mut rng).unwrap();
            for c in tuning.preferred() {
                assert!((1..=rows).contains(&c.row), "{c:?} on {rows}x{cols}");
                assert!((1..=cols).contains(&c.col), "{c:?} on {rows}x{cols}");
            }
        }
    }
}

#[test]
fn sigma_follows_grid_size() {
    let grid = Grid::new(4, 6).unwrap();
    let tuning = ChannelTuning::generate(&grid, 10, 12, &mut StdRng::seed_from_u64(0)).unwrap();
    assert!((tuning.sigma() - 24f64.sqrt() / 6.0).abs() < 1e-15);
}
