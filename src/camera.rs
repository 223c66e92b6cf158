use crate::error::{Error, Result};
use crate::math::Vector;

/// Orthographic projector onto a `width` x `height` viewport.
///
/// `zoom` is world units per pixel, so a point at `(x, y, z)` lands at
/// `(x / zoom + width / 2, y / zoom + height / 2)`. Depth is discarded.
///
/// `position`, `direction` and `up` are kept so callers can describe the
/// camera the same way they would a perspective one, but they take no part in
/// the projection: view orientation comes from the transform applied to the
/// points beforehand.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vector,
    pub direction: Vector,
    pub up: Vector,
    width: f64,
    height: f64,
    zoom: f64,
}

impl OrthographicCamera {
    pub fn new(
        position: Vector,
        direction: Vector,
        up: Vector,
        width: f64,
        height: f64,
        zoom: f64,
    ) -> Result<Self> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(Error::invalid(format!("zoom must be positive, got {zoom}")));
        }
        check_viewport(width, height)?;

        Ok(Self {
            position,
            direction,
            up,
            width,
            height,
            zoom,
        })
    }

    /// Camera at the origin with +y up.
    pub fn looking_at_origin(width: f64, height: f64, zoom: f64) -> Result<Self> {
        Self::new(
            Vector::zeroes(),
            Vector::zeroes(),
            Vector::new(0.0, 1.0, 0.0),
            width,
            height,
            zoom,
        )
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn project(&self, point: &Vector) -> [f32; 2] {
        [
            (point.x / self.zoom + self.width / 2.0) as f32,
            (point.y / self.zoom + self.height / 2.0) as f32,
        ]
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

fn check_viewport(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(Error::invalid(format!(
            "viewport must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthographicCamera {
        OrthographicCamera::looking_at_origin(800.0, 600.0, 0.03).unwrap()
    }

    #[test]
    fn test_origin_lands_on_screen_center() {
        assert_eq!(camera().project(&Vector::zeroes()), [400.0, 300.0]);
    }

    #[test]
    fn test_depth_is_discarded() {
        let cam = camera();
        let near = cam.project(&Vector::new(1.0, -2.0, -50.0));
        let far = cam.project(&Vector::new(1.0, -2.0, 50.0));
        assert_eq!(near, far);
    }

    #[test]
    fn test_projection_is_affine() {
        let cam = camera();
        let pairs = [
            (Vector::new(1.0, 2.0, 3.0), Vector::new(-0.5, 0.25, 9.0)),
            (Vector::new(7.0, -7.0, 0.0), Vector::new(6.0, -6.5, -4.0)),
        ];

        for (a, b) in pairs {
            let pa = cam.project(&a);
            let pb = cam.project(&b);
            let d = a - b;
            assert!(((pa[0] - pb[0]) as f64 - d.x / 0.03).abs() < 1e-3);
            assert!(((pa[1] - pb[1]) as f64 - d.y / 0.03).abs() < 1e-3);
        }
    }

    #[test]
    fn test_orientation_fields_do_not_affect_projection() {
        let a = camera();
        let b = OrthographicCamera::new(
            Vector::new(10.0, 10.0, 10.0),
            Vector::direction(0.0, 0.0, -1.0),
            Vector::direction(1.0, 0.0, 0.0),
            800.0,
            600.0,
            0.03,
        )
        .unwrap();
        let p = Vector::new(2.0, -3.0, 1.0);
        assert_eq!(a.project(&p), b.project(&p));
    }

    #[test]
    fn test_rejects_bad_configuration() {
        for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(OrthographicCamera::looking_at_origin(800.0, 600.0, zoom).is_err());
        }
        assert!(OrthographicCamera::looking_at_origin(0.0, 600.0, 0.03).is_err());
        assert!(OrthographicCamera::looking_at_origin(800.0, -1.0, 0.03).is_err());
    }

    #[test]
    fn test_resize_recenters() {
        let mut cam = camera();
        cam.resize(1000.0, 1000.0).unwrap();
        assert_eq!(cam.project(&Vector::zeroes()), [500.0, 500.0]);

        assert!(cam.resize(0.0, 10.0).is_err());
        assert_eq!(cam.width(), 1000.0);
    }
}
