use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use orrery::{constants::ET_1950, OrreryError};

mod common;
use common::*;

#[test]
fn test_id_to_name_canonical() {
    let orrery = loaded_orrery();
    assert_eq!(orrery.object_name(3).unwrap(), "EARTH BARYCENTER");
    assert_eq!(orrery.object_name(0).unwrap(), "SOLAR SYSTEM BARYCENTER");
    assert_eq!(
        orrery.object_name(-99),
        Err(OrreryError::InvalidObjectId(-99))
    );
}

#[test]
fn test_name_id_inverse() {
    let orrery = loaded_orrery();
    for name in [
        "Earth Barycenter",
        "solar system barycenter",
        "Moon",
        "Earth",
        "Mars Barycenter",
        "sun",
    ] {
        let id = orrery.object_id(name).unwrap();
        assert_eq!(orrery.object_name(id).unwrap(), name.to_uppercase());
    }
    assert_eq!(
        orrery.object_id("Planet Nine"),
        Err(OrreryError::InvalidObjectName("Planet Nine".into()))
    );
}

#[test]
fn test_text_kernel_bindings_follow_load_state() {
    let orrery = loaded_orrery();
    assert!(orrery.object_id("Gateway").is_err());

    orrery.load_kernel(TEXT_KERNEL).unwrap();
    let id = orrery.object_id("Gateway").unwrap();
    assert_eq!(id, -60000);
    assert_eq!(orrery.object_name(id).unwrap(), "GATEWAY");

    orrery.unload_kernel(TEXT_KERNEL).unwrap();
    assert_eq!(orrery.object_name(id), Err(OrreryError::InvalidObjectId(id)));
}

#[test]
fn test_time_round_trip() {
    let orrery = loaded_orrery();
    for et0 in [ET_1950 + 7.0e8, -86_400.5, 0.25, 4.2e8 + 0.123_456, 7.9e8] {
        let civil = orrery.civil_time(et0).unwrap();
        let et1 = orrery.ephemeris_time(&civil).unwrap();
        assert_abs_diff_eq!(et0, et1, epsilon = 1e-3);
    }
}

#[test]
fn test_time_round_trip_across_leap_seconds() {
    let orrery = loaded_orrery();
    for (year, month) in [(2015, 7), (2017, 1)] {
        let after = Epoch::from_gregorian_utc_at_midnight(year, month, 1).to_et_seconds();
        for offset in [-60.0, -37.0, -10.0, -3.0, -1.0, -0.5, 0.0, 0.5] {
            let et0 = after + offset;
            let civil = orrery.civil_time(et0).unwrap();
            let et1 = orrery.ephemeris_time(&civil).unwrap();
            assert_abs_diff_eq!(et0, et1, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_civil_day_round_trip() {
    let orrery = loaded_orrery();
    let civil = Epoch::from_gregorian_utc_at_midnight(2021, 6, 15);
    let et = orrery.ephemeris_time(&civil).unwrap();
    let back = orrery.civil_time(et).unwrap();
    assert_abs_diff_eq!((back - civil).to_seconds(), 0.0, epsilon = 1e-3);
}

#[test]
fn test_time_requires_leap_seconds() {
    let orrery = empty_orrery();
    orrery.load_kernel(SPK).unwrap();
    let civil = Epoch::from_gregorian_utc_at_noon(2020, 2, 29);
    let err = orrery.ephemeris_time(&civil).unwrap_err();
    assert!(matches!(err, OrreryError::InvalidTime { .. }));
    assert!(err.to_string().contains("leapseconds kernel"));

    orrery.load_kernel(LSK).unwrap();
    assert!(orrery.ephemeris_time(&civil).is_ok());
}

#[test]
fn test_now_is_after_2020() {
    let orrery = loaded_orrery();
    let et = orrery.ephemeris_time_now().unwrap();
    assert!(et > 6.3e8);
}
