//! Spherical <-> Cartesian isomorphism.
//!
//! Spherical vectors are stored as `(r, theta, phi)` in the x/y/z slots, where
//! `theta` is the polar angle measured from the +y pole and `phi` the azimuth
//! in the x/z plane, starting at +x and turning towards +z:
//!
//! ```text
//! x = r sin(theta) cos(phi)
//! y = r cos(theta)
//! z = r sin(theta) sin(phi)
//! ```
//!
//! `w` is carried through unchanged in both directions.

use super::{TAU, Vector};

pub fn to_cartesian(spherical: Vector) -> Vector {
    let Vector { x: r, y: theta, z: phi, w } = spherical;
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector::homogeneous(
        r * sin_theta * cos_phi,
        r * cos_theta,
        r * sin_theta * sin_phi,
        w,
    )
}

/// Inverse of [`to_cartesian`]. Returns `theta` in `[0, pi]` and `phi` in
/// `[0, tau)`. The origin maps to all zeroes.
pub fn to_spherical(cartesian: Vector) -> Vector {
    let r = cartesian.length();
    if r == 0.0 {
        return Vector::homogeneous(0.0, 0.0, 0.0, cartesian.w);
    }

    let theta = (cartesian.y / r).clamp(-1.0, 1.0).acos();
    let phi = cartesian.z.atan2(cartesian.x).rem_euclid(TAU);

    Vector::homogeneous(r, theta, phi, cartesian.w)
}
