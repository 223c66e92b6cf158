//! Degree/radian isomorphism.

use super::TAU;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * TAU / 360.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 360.0 / TAU
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_angles() {
        assert_relative_eq!(to_radians(180.0), std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(to_radians(90.0), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(to_degrees(TAU), 360.0, epsilon = 1e-12);
        assert_eq!(to_radians(0.0), 0.0);
    }

    #[test]
    fn test_round_trip() {
        let mut theta = -1080.0;
        while theta <= 1080.0 {
            assert!((to_degrees(to_radians(theta)) - theta).abs() < 1e-9);
            assert!((to_radians(to_degrees(theta)) - theta).abs() < 1e-9);
            theta += 7.25;
        }
    }
}
