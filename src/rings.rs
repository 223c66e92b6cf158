//! Concentric noise-distorted rings, traced in world space and projected to
//! the screen.

use crate::camera::OrthographicCamera;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::math::angles::to_radians;
use crate::math::coordinates::to_cartesian;
use crate::math::{Mat4, Vector};
use crate::noise::NoiseField;

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub index: usize,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    pub origin: [f32; 2],
    pub rings: Vec<Ring>,
}

impl RingFrame {
    /// Number of line segments needed to connect every ring's points.
    pub fn segment_count(&self) -> usize {
        self.rings
            .iter()
            .map(|ring| ring.points.len().saturating_sub(1))
            .sum()
    }
}

/// Polar-angle offset for `ring` at simulation `time`.
pub fn distortion(noise: &NoiseField, config: &Config, ring: usize, time: f64) -> f64 {
    let f = config.frequency;
    noise.sample(ring as f64 * f, config.polar_angle_deg * f, time * f) * config.amplitude
}

/// Azimuths in whole degrees from 0 through 360 inclusive.
pub fn azimuths(step: u32) -> impl Iterator<Item = u32> {
    (0..=360).step_by(step.max(1) as usize)
}

fn step_for(config: &Config, ring: usize) -> Result<u32> {
    match config.increments.get(ring) {
        Some(&step) if step > 0 => Ok(step),
        _ => Err(Error::invalid(format!("no azimuth step for ring {ring}"))),
    }
}

pub fn trace_rings(
    config: &Config,
    noise: &NoiseField,
    perspective: &Mat4,
    camera: &OrthographicCamera,
    time: f64,
) -> Result<RingFrame> {
    let origin = camera.project(&Vector::zeroes().transform(perspective));
    if !is_finite(origin) {
        return Err(Error::NonFinite {
            ring: 0,
            azimuth_deg: 0,
        });
    }

    let theta = to_radians(config.polar_angle_deg);
    let mut rings = Vec::with_capacity(config.ring_count);

    for index in 1..=config.ring_count {
        let step = step_for(config, index)?;
        let radius = index as f64;
        let polar = theta + distortion(noise, config, index, time);

        let mut points = Vec::with_capacity(360 / step as usize + 1);
        for azimuth_deg in azimuths(step) {
            let spherical = Vector::new(radius, polar, to_radians(azimuth_deg as f64));
            let projected = camera.project(&to_cartesian(spherical).transform(perspective));
            if !is_finite(projected) {
                return Err(Error::NonFinite {
                    ring: index,
                    azimuth_deg,
                });
            }
            points.push(projected);
        }

        rings.push(Ring { index, points });
    }

    Ok(RingFrame { origin, rings })
}

fn is_finite(p: [f32; 2]) -> bool {
    p[0].is_finite() && p[1].is_finite()
}
