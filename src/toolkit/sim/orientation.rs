//! Frame rotations supported by the simulated toolkit.
//!
//! Inertial frames are fixed rotations of J2000. Body-fixed frames follow the
//! IAU pole/prime-meridian models (linear terms only) and need an orientation
//! kernel to be loaded.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{
    EphemerisTime, Radian, DAYS_PER_CENTURY, OBLIQUITY_J2000, RADEG, SECONDS_PER_DAY,
};

/// Active right-handed rotation of angle `alpha` about axis `k` (0 = X, 1 = Y, 2 = Z).
///
/// Any other axis index yields the identity.
pub(crate) fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => return Matrix3::identity(),
    };
    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Linear IAU rotation model: pole right ascension / declination and prime meridian.
struct RotationModel {
    ra0: f64,
    ra_rate: f64,
    dec0: f64,
    dec_rate: f64,
    w0: f64,
    w_rate: f64,
}

const IAU_EARTH: RotationModel = RotationModel {
    ra0: 0.0,
    ra_rate: -0.641,
    dec0: 90.0,
    dec_rate: -0.557,
    w0: 190.147,
    w_rate: 360.985_623_5,
};

const IAU_MARS: RotationModel = RotationModel {
    ra0: 317.681_43,
    ra_rate: -0.1061,
    dec0: 52.886_50,
    dec_rate: -0.0609,
    w0: 176.630,
    w_rate: 350.891_982_26,
};

impl RotationModel {
    /// J2000 → body-fixed rotation and its time derivative at `et`.
    fn transform(&self, et: EphemerisTime) -> (Matrix3<f64>, Matrix3<f64>) {
        let d = et / SECONDS_PER_DAY;
        let t = d / DAYS_PER_CENTURY;
        let ra = (self.ra0 + self.ra_rate * t) * RADEG;
        let dec = (self.dec0 + self.dec_rate * t) * RADEG;
        let w = (self.w0 + self.w_rate * d) * RADEG;
        let w_dot = self.w_rate * RADEG / SECONDS_PER_DAY;

        let pole = rotmt(-(std::f64::consts::FRAC_PI_2 - dec), 0)
            * rotmt(-(std::f64::consts::FRAC_PI_2 + ra), 2);
        let spin = rotmt(-w, 2);

        let (sin_w, cos_w) = w.sin_cos();
        let spin_dot = Matrix3::new(
            -sin_w, cos_w, 0.0, //
            -cos_w, -sin_w, 0.0, //
            0.0, 0.0, 0.0,
        ) * w_dot;

        (spin * pole, spin_dot * pole)
    }
}

/// Frames known to the simulated toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SimFrame {
    J2000,
    EclipJ2000,
    IauEarth,
    IauMars,
}

impl SimFrame {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "J2000" => Some(SimFrame::J2000),
            "ECLIPJ2000" => Some(SimFrame::EclipJ2000),
            "IAU_EARTH" => Some(SimFrame::IauEarth),
            "IAU_MARS" => Some(SimFrame::IauMars),
            _ => None,
        }
    }

    pub(crate) fn is_body_fixed(self) -> bool {
        matches!(self, SimFrame::IauEarth | SimFrame::IauMars)
    }

    /// Rotate a J2000 position/velocity pair into this frame.
    pub(crate) fn express(
        self,
        et: EphemerisTime,
        pos: Vector3<f64>,
        vel: Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        match self {
            SimFrame::J2000 => (pos, vel),
            SimFrame::EclipJ2000 => {
                let rot = rotmt(-OBLIQUITY_J2000, 0);
                (rot * pos, rot * vel)
            }
            SimFrame::IauEarth | SimFrame::IauMars => {
                let model = if self == SimFrame::IauEarth {
                    &IAU_EARTH
                } else {
                    &IAU_MARS
                };
                let (rot, rot_dot) = model.transform(et);
                (rot * pos, rot * vel + rot_dot * pos)
            }
        }
    }
}
