#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use orrery::{
    state_vector::StateVector,
    toolkit::sim::{FaultInjector, KernelCatalog, SimToolkit},
    Orrery,
};

pub const KERNEL_DIR: &str = "/kernels";
pub const SPK: &str = "/kernels/de432s.bsp";
pub const LSK: &str = "/kernels/naif0012.tls";
pub const PCK: &str = "/kernels/pck00010.tpc";
pub const TEXT_KERNEL: &str = "/kernels/extra_bodies.tk";

/// Object IDs supplied by the planetary trajectory kernel.
pub const SPK_OBJECTS: [i32; 15] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 199, 299, 301, 399, 499];

pub fn empty_orrery() -> Orrery<SimToolkit> {
    Orrery::new(SimToolkit::new(KernelCatalog::solar_system(KERNEL_DIR)))
}

/// Orrery plus the fault handle of its toolkit.
pub fn orrery_with_faults() -> (Orrery<SimToolkit>, FaultInjector) {
    let toolkit = SimToolkit::new(KernelCatalog::solar_system(KERNEL_DIR));
    let faults = toolkit.fault_injector();
    (Orrery::new(toolkit), faults)
}

/// Trajectory and leap-second kernels loaded.
pub fn loaded_orrery() -> Orrery<SimToolkit> {
    let orrery = empty_orrery();
    orrery.load_kernel(SPK).unwrap();
    orrery.load_kernel(LSK).unwrap();
    orrery
}

pub fn assert_state_close(actual: &StateVector, expected: &StateVector, pos_eps: f64, vel_eps: f64) {
    for i in 0..3 {
        assert_abs_diff_eq!(actual.position[i], expected.position[i], epsilon = pos_eps);
        assert_abs_diff_eq!(actual.velocity[i], expected.velocity[i], epsilon = vel_eps);
    }
}
