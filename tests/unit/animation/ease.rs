use super::*;

const ALL: [Ease; 2] = [Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_is_slow_at_both_ends() {
    // Less progress than linear early, more than linear late.
    assert!(Ease::InOutCubic.apply(0.1) < 0.1);
    assert!(Ease::InOutCubic.apply(0.9) > 0.9);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InOutCubic.apply(-2.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(3.0), 1.0);
}
