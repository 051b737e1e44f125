use proptest::prelude::*;
use upcycle_types::{Coordinate, Timestamp};

#[test]
fn default_is_epoch() {
    assert_eq!(Timestamp::default(), Timestamp::EPOCH);
    assert_eq!(Timestamp::default().epoch_seconds(), 0.0);
}

#[test]
fn from_epoch_seconds_keeps_fraction() {
    let ts = Timestamp::from_epoch_seconds(1_561_550_400.25).unwrap();
    assert_eq!(ts.epoch_seconds(), 1_561_550_400.25);
}

#[test]
fn non_finite_seconds_rejected() {
    assert!(Timestamp::from_epoch_seconds(f64::NAN).is_err());
    assert!(Timestamp::from_epoch_seconds(f64::INFINITY).is_err());
}

#[test]
fn now_is_after_epoch() {
    assert!(Timestamp::now() > Timestamp::EPOCH);
}

#[test]
fn coordinate_default_is_origin() {
    let c = Coordinate::default();
    assert_eq!(c.latitude, 0.0);
    assert_eq!(c.longitude, 0.0);
}

#[test]
fn coordinate_approx_eq() {
    let a = Coordinate::new(51.5072, -0.1276);
    let b = Coordinate::new(51.507_200_000_1, -0.127_600_000_1);
    assert!(a.approx_eq(&b, 1e-9));
    assert!(!a.approx_eq(&Coordinate::default(), 1e-9));
}

proptest! {
    #[test]
    fn epoch_seconds_roundtrip_within_two_microseconds(secs in 0.0f64..4_000_000_000.0) {
        let ts = Timestamp::from_epoch_seconds(secs).unwrap();
        prop_assert!((ts.epoch_seconds() - secs).abs() < 2e-6);
    }
}
