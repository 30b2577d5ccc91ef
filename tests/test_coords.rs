//! Tests for frame conversion, discretization and polar binning.

use rand::Rng;
use shooter_forecast::pipeline::coords::{
    cell_center, discretize, to_local, to_world, Cell, Floor, LocalPoint, WorldPoint,
};
use shooter_forecast::pipeline::radial::{bearing, radial_bin, RadialBin};

// ============== Frame Conversion Tests ==============

#[test]
fn test_round_trip_within_rounding_tolerance() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let world = WorldPoint::new(
            rng.random_range(-100.0..700.0),
            rng.random_range(0.0..60.0),
            rng.random_range(0.0..1620.0),
        );
        let back = to_world(to_local(world));

        assert!((back.x - world.x).abs() < 0.5, "x: {world:?} -> {back:?}");
        assert!((back.y - world.y).abs() < 0.25, "y: {world:?} -> {back:?}");
        assert!((back.z - world.z).abs() < 0.5, "z: {world:?} -> {back:?}");
    }
}

#[test]
fn test_local_outputs_have_one_decimal() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let local = to_local(WorldPoint::new(
            rng.random_range(0.0..600.0),
            rng.random_range(0.0..60.0),
            rng.random_range(0.0..1620.0),
        ));
        for v in [local.x, local.y, local.z] {
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6, "{v}");
        }
    }
}

#[test]
fn test_nan_stays_unknown() {
    let local = to_local(WorldPoint::new(f64::NAN, 0.0, 900.0));
    assert!(local.is_unknown());
    assert_eq!(discretize(local), None);
}

// ============== Discretization Tests ==============

#[test]
fn test_cell_center_discretizes_back() {
    let mut rng = rand::rng();
    for _ in 0..500 {
        let cell = Cell {
            x: rng.random_range(-50..200),
            y: rng.random_range(-50..200),
            floor: if rng.random_range(0..2) == 0 {
                Floor::Lower
            } else {
                Floor::Upper
            },
        };
        assert_eq!(discretize(cell_center(cell)), Some(cell));
    }
}

#[test]
fn test_floor_threshold() {
    let lower = discretize(LocalPoint::new(0.0, 0.0, 9.9)).unwrap();
    let upper = discretize(LocalPoint::new(0.0, 0.0, 10.0)).unwrap();
    assert_eq!(lower.floor, Floor::Lower);
    assert_eq!(upper.floor, Floor::Upper);
}

#[test]
fn test_half_cell_rounds_up() {
    let cell = discretize(LocalPoint::new(1.5, -1.5, 0.0)).unwrap();
    assert_eq!((cell.x, cell.y), (1, 0));
}

// ============== Polar Binning Tests ==============

#[test]
fn test_target_on_observer_is_first_bin() {
    assert_eq!(
        radial_bin((12.0, -7.0), (12.0, -7.0)),
        Some(RadialBin { range: 0, angle: 0 })
    );
}

#[test]
fn test_beyond_max_range_is_dropped() {
    assert_eq!(radial_bin((0.0, 0.0), (100.0, 0.0)), None);
    assert_eq!(radial_bin((0.0, 0.0), (60.0, 80.5)), None);
    assert!(radial_bin((0.0, 0.0), (99.9, 0.0)).is_some());
}

#[test]
fn test_angle_wraps_below_two_pi() {
    // Just under the positive x axis lands in the last sector
    let bin = radial_bin((0.0, 0.0), (10.0, -0.001)).unwrap();
    assert_eq!(bin.angle, 19);
    let theta = bearing((0.0, 0.0), (10.0, -0.001));
    assert!(theta < std::f64::consts::TAU && theta > 6.28);
}

#[test]
fn test_each_quadrant() {
    assert_eq!(radial_bin((0.0, 0.0), (0.0, 10.0)).unwrap().angle, 5);
    assert_eq!(radial_bin((0.0, 0.0), (-10.0, 0.0)).unwrap().angle, 10);
    assert_eq!(radial_bin((0.0, 0.0), (0.0, -10.0)).unwrap().angle, 15);
    assert_eq!(radial_bin((0.0, 0.0), (0.0, -10.0)).unwrap().range, 2);
}

#[test]
fn test_unknown_target_is_dropped() {
    assert_eq!(radial_bin((0.0, 0.0), (f64::NAN, 3.0)), None);
}
