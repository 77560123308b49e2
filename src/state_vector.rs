//! # State vectors
//!
//! [`StateVector`] packages the six scalars returned by a state query:
//! position (km) and velocity (km/s) of a target relative to a reference body.
use std::{
    fmt,
    ops::{Add, Neg, Sub},
};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::Kilometer,
    toolkit::RawState,
};

/// Cartesian state of a body relative to another.
///
/// Immutable value type: the fields are public for reading, derived
/// quantities ([`distance`](Self::distance), [`speed`](Self::speed)) are
/// computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Position (km)
    pub position: Vector3<f64>,
    /// Velocity (km/s)
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    pub fn zero() -> Self {
        StateVector::new(Vector3::zeros(), Vector3::zeros())
    }

    pub fn from_components(x: f64, y: f64, z: f64, vx: f64, vy: f64, vz: f64) -> Self {
        StateVector::new(Vector3::new(x, y, z), Vector3::new(vx, vy, vz))
    }

    /// Euclidean norm of the position (km).
    pub fn distance(&self) -> Kilometer {
        self.position.norm()
    }

    /// Euclidean norm of the velocity (km/s).
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn vx(&self) -> f64 {
        self.velocity.x
    }

    pub fn vy(&self) -> f64 {
        self.velocity.y
    }

    pub fn vz(&self) -> f64 {
        self.velocity.z
    }

    /// The six components `[x, y, z, vx, vy, vz]`.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }
}

impl From<RawState> for StateVector {
    fn from(raw: RawState) -> Self {
        let [x, y, z, vx, vy, vz] = raw;
        StateVector::from_components(x, y, z, vx, vy, vz)
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        StateVector::new(self.position + rhs.position, self.velocity + rhs.velocity)
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, rhs: StateVector) -> StateVector {
        StateVector::new(self.position - rhs.position, self.velocity - rhs.velocity)
    }
}

impl Neg for StateVector {
    type Output = StateVector;

    fn neg(self) -> StateVector {
        StateVector::new(-self.position, -self.velocity)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Position (km):   [{:.6}, {:.6}, {:.6}]",
            self.position.x, self.position.y, self.position.z
        )?;
        write!(
            f,
            "Velocity (km/s): [{:.9}, {:.9}, {:.9}]",
            self.velocity.x, self.velocity.y, self.velocity.z
        )
    }
}

#[cfg(test)]
mod test_state_vector {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_norms() {
        let s = StateVector::from_components(3.0, 4.0, 0.0, 0.0, 0.0, 2.0);
        assert_relative_eq!(s.distance(), 5.0);
        assert_relative_eq!(s.speed(), 2.0);
        assert_eq!(s.to_array(), [3.0, 4.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_arithmetic() {
        let a = StateVector::from([1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
        let b = StateVector::from([1.0, 1.0, 1.0, 0.1, 0.1, 0.1]);
        assert_eq!(a - a, StateVector::zero());
        assert_eq!(a + (-a), StateVector::zero());
        assert_relative_eq!((a - b).y(), 1.0);
        assert_relative_eq!((a + b).vz(), 0.4);
    }

    #[test]
    fn test_display() {
        let text = StateVector::zero().to_string();
        assert!(text.starts_with("Position (km):"));
        assert!(text.contains("Velocity (km/s):"));
    }
}
