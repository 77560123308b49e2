use std::collections::BTreeSet;

use orrery::{
    config::OrreryConfig,
    kernel::KernelKind,
    query::StateQuery,
    toolkit::sim::{KernelCatalog, Primitive, SimToolkit},
    Orrery, OrreryError,
};

mod common;
use common::*;

#[test]
fn test_clear_on_empty_registry() {
    let orrery = empty_orrery();
    orrery.clear_kernels().unwrap();
    orrery.clear_kernels().unwrap();
    assert!(orrery.loaded_object_ids().is_empty());
    assert!(orrery.loaded_kernels().is_empty());
}

#[test]
fn test_load_reports_objects() {
    let orrery = empty_orrery();
    let handle = orrery.load_kernel(SPK).unwrap();
    assert_eq!(handle.kind(), KernelKind::Trajectory);
    assert_eq!(handle.path().as_str(), SPK);
    assert_eq!(
        orrery.loaded_object_ids(),
        SPK_OBJECTS.into_iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn test_load_unload_round_trip() {
    let orrery = empty_orrery();
    orrery.load_kernel(LSK).unwrap();
    let before = orrery.loaded_object_ids();

    orrery.load_kernel(SPK).unwrap();
    assert!(orrery.is_loaded(SPK));
    orrery.unload_kernel(SPK).unwrap();

    assert_eq!(orrery.loaded_object_ids(), before);
    assert!(!orrery.is_loaded(SPK));
    assert!(orrery.is_loaded(LSK));
}

#[test]
fn test_no_double_load() {
    let orrery = empty_orrery();
    orrery.load_kernel(SPK).unwrap();
    assert_eq!(
        orrery.load_kernel(SPK),
        Err(OrreryError::KernelAlreadyLoaded(SPK.into()))
    );
    // the first load is still in effect
    assert!(orrery.loaded_object_ids().contains(&3));
    assert_eq!(orrery.loaded_kernels().len(), 1);
}

#[test]
fn test_unload_unknown_kernel() {
    let orrery = empty_orrery();
    assert_eq!(
        orrery.unload_kernel(SPK),
        Err(OrreryError::KernelNotLoaded(SPK.into()))
    );
}

#[test]
fn test_missing_file() {
    let orrery = empty_orrery();
    let err = orrery.load_kernel("/kernels/de440.bsp").unwrap_err();
    match &err {
        OrreryError::KernelLoadFailed { path, reason } => {
            assert_eq!(path, "/kernels/de440.bsp");
            assert!(reason.starts_with("SPICE(NOSUCHFILE)"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // the failure does not leak into the next call
    orrery.load_kernel(SPK).unwrap();
}

#[test]
fn test_invalid_paths() {
    let orrery = empty_orrery();
    assert_eq!(
        orrery.load_kernel(""),
        Err(OrreryError::InvalidKernelPath(String::new()))
    );
    assert!(matches!(
        orrery.load_kernel("de432s\0.bsp"),
        Err(OrreryError::InvalidKernelPath(_))
    ));
}

#[test]
fn test_kernels_listed_in_load_order() {
    let orrery = loaded_orrery();
    orrery.load_kernel(PCK).unwrap();
    let kinds: Vec<_> = orrery.loaded_kernels().iter().map(|k| k.kind()).collect();
    assert_eq!(
        kinds,
        [KernelKind::Trajectory, KernelKind::LeapSeconds, KernelKind::Other]
    );
}

#[test]
fn test_clear_failure_keeps_bookkeeping() {
    let (orrery, faults) = orrery_with_faults();
    orrery.load_kernel(SPK).unwrap();

    faults.fail_next(Primitive::Clear, "SPICE(INJECTED)");
    assert!(matches!(
        orrery.clear_kernels(),
        Err(OrreryError::KernelClearFailed { .. })
    ));
    assert!(orrery.is_loaded(SPK));
    assert_eq!(orrery.loaded_object_ids().len(), SPK_OBJECTS.len());

    // a retry goes through
    orrery.clear_kernels().unwrap();
    assert!(orrery.loaded_object_ids().is_empty());
    assert!(orrery.with_toolkit(|tk| tk.loaded_paths().is_empty()));
}

#[test]
fn test_unload_failure_keeps_bookkeeping() {
    let (orrery, faults) = orrery_with_faults();
    orrery.load_kernel(SPK).unwrap();

    faults.fail_next(Primitive::Unload, "SPICE(INJECTED)");
    assert_eq!(
        orrery.unload_kernel(SPK),
        Err(OrreryError::KernelUnloadFailed {
            path: SPK.into(),
            reason: String::new(),
        })
    );
    assert!(orrery.is_loaded(SPK));
}

#[test]
fn test_small_enumeration_capacity_rolls_back() {
    let config = OrreryConfig::builder()
        .max_object_ids(10)
        .build()
        .unwrap();
    let orrery = Orrery::with_config(
        SimToolkit::new(KernelCatalog::solar_system(KERNEL_DIR)),
        config,
    )
    .unwrap();

    assert!(matches!(
        orrery.load_kernel(SPK),
        Err(OrreryError::KernelLoadFailed { .. })
    ));
    assert!(!orrery.is_loaded(SPK));
    assert!(orrery.with_toolkit(|tk| tk.loaded_paths().is_empty()));
}

#[test]
fn test_shared_between_threads() {
    let orrery = loaded_orrery();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0..25 {
                    let report = orrery
                        .state(&StateQuery::new(3, 0).at(i as f64 * 3600.0))
                        .unwrap();
                    assert!(report.state.distance() > 1.0e8);
                    assert!(orrery.object_name(399).is_ok());
                }
            });
        }
    });
}
