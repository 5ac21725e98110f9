//! Reference frame rotations

use crate::constants::OBLIQUITY_J2000_DEG;
use crate::coordinates::Vec3;
use nalgebra::Matrix3;

/// Rotation taking J2000 equatorial vectors into the J2000 ecliptic frame, Rx(-ε)
pub fn equatorial_to_ecliptic_j2000() -> Matrix3<f64> {
    let (sin_e, cos_e) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cos_e, sin_e,
        0.0, -sin_e, cos_e,
    )
}

/// Apply a 3x3 rotation to a vector
pub fn rotate(m: &Matrix3<f64>, v: Vec3) -> Vec3 {
    Vec3::from(m * nalgebra::Vector3::from(v))
}
