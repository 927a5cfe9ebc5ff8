use super::*;

#[test]
fn zero_radius_is_transparent() {
    for base in [0.0, 0.2, 0.8, 1.0] {
        for max_r in [1.0, 500.0, 1920.0] {
            for d in [0.1, 1.5, 4.0] {
                assert_eq!(calc_alpha(base, 0.0, max_r, d), 0.0);
            }
        }
    }
}

#[test]
fn negative_radius_is_transparent() {
    assert_eq!(calc_alpha(1.0, -3.0, 100.0, 1.0), 0.0);
}

#[test]
fn beyond_field_extent_is_transparent() {
    for r in [500.0001, 501.0, 1e6] {
        assert_eq!(calc_alpha(1.0, r, 500.0, 1.5), 0.0);
    }
    assert_eq!(calc_alpha(1.0, 500.0, 500.0, 1.5), 0.0);
}

#[test]
fn matches_closed_form() {
    let a = calc_alpha(0.8, 100.0, 500.0, 1.5);
    let expected = 0.8 * 0.8f64.powi(2) * (-100.0f64 / 750.0).exp();
    assert!((a - expected).abs() < 1e-12);
}

#[test]
fn non_increasing_in_radius() {
    for d in [0.5, 1.5, 3.0] {
        let max_r = 640.0;
        let mut prev = f64::INFINITY;
        let mut r = 0.25;
        while r <= max_r {
            let a = calc_alpha(0.9, r, max_r, d);
            assert!(a <= prev, "alpha rose at r={r}, d={d}");
            prev = a;
            r += 0.25;
        }
    }
}

#[test]
fn slower_decay_keeps_rings_brighter() {
    let fast = calc_alpha(1.0, 200.0, 500.0, 0.5);
    let slow = calc_alpha(1.0, 200.0, 500.0, 4.0);
    assert!(slow > fast);
}

#[test]
fn non_finite_inputs_are_transparent() {
    assert_eq!(calc_alpha(1.0, f64::NAN, 500.0, 1.0), 0.0);
    assert_eq!(calc_alpha(1.0, 10.0, f64::NAN, 1.0), 0.0);
    assert_eq!(calc_alpha(1.0, 10.0, 0.0, 1.0), 0.0);
}
