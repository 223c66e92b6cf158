//! Fixed-rate animation driver.
//!
//! The host calls [`AnimationDriver::on_frame`] as often as it likes. Each
//! call is mapped to a logical tick at `fps`; a tick is rendered at most once
//! and extra calls within it are dropped.

use crate::camera::OrthographicCamera;
use crate::config::Config;
use crate::drawing::{DrawingSurface, Rect};
use crate::error::{Error, Result};
use crate::math::Mat4;
use crate::math::angles::to_radians;
use crate::noise::NoiseField;
use crate::palette::Palette;
use crate::rings::{self, RingFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Skipped { tick: i64 },
    Rendered { tick: i64, segments: usize },
}

#[derive(Debug)]
pub struct AnimationDriver {
    config: Config,
    palette: Palette,
    noise: NoiseField,
    camera: OrthographicCamera,
    perspective: Mat4,
    time: f64,
    prev_tick: Option<i64>,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(config: Config, noise: NoiseField) -> Result<Self> {
        config.validate()?;

        let palette = config.palette()?;
        let camera = OrthographicCamera::looking_at_origin(
            config.width as f64,
            config.height as f64,
            config.zoom,
        )?;
        let perspective = *Mat4::identity()
            .rot_x(to_radians(config.tilt_deg[0]))
            .rot_y(to_radians(config.tilt_deg[1]));

        Ok(Self {
            config,
            palette,
            noise,
            camera,
            perspective,
            time: 0.0,
            prev_tick: None,
            state: DriverState::Idle,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn prev_tick(&self) -> Option<i64> {
        self.prev_tick
    }

    pub fn perspective(&self) -> &Mat4 {
        &self.perspective
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.camera.resize(width, height)
    }

    pub fn reseed(&mut self, seed: f64) -> Result<()> {
        self.noise.reseed(seed)
    }

    pub fn tick_at(&self, now_ms: f64) -> i64 {
        (self.config.fps * now_ms / 1000.0).round() as i64
    }

    /// Renders the tick containing `now_ms` unless it was already rendered.
    ///
    /// A frame that fails leaves the surface, rotation and time untouched;
    /// its tick still counts as consumed.
    pub fn on_frame<S>(&mut self, now_ms: f64, surface: &mut S) -> Result<FrameOutcome>
    where
        S: DrawingSurface + ?Sized,
    {
        if !now_ms.is_finite() {
            return Err(Error::invalid(format!("frame time must be finite, got {now_ms}")));
        }

        let tick = self.tick_at(now_ms);
        if self.prev_tick == Some(tick) {
            log::trace!("tick {tick} already rendered, skipping");
            return Ok(FrameOutcome::Skipped { tick });
        }
        self.prev_tick = Some(tick);
        self.state = DriverState::Rendering;

        let mut perspective = self.perspective;
        perspective
            .rot_y(to_radians(self.config.spin_deg[0]))
            .rot_x(to_radians(self.config.spin_deg[1]));

        let frame = rings::trace_rings(
            &self.config,
            &self.noise,
            &perspective,
            &self.camera,
            self.time,
        )?;

        self.draw(&frame, surface);

        self.perspective = perspective;
        self.time = advance_time(self.time, self.config.time_step, self.config.time_threshold);

        let segments = frame.segment_count();
        log::debug!("rendered tick {tick}: {segments} segments, time {:.1}", self.time);
        Ok(FrameOutcome::Rendered { tick, segments })
    }

    fn draw<S>(&self, frame: &RingFrame, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        let blur = self.config.shadow_blur;

        surface.clear(Rect::new(
            0.0,
            0.0,
            self.camera.width() as f32,
            self.camera.height() as f32,
        ));

        let marker = self.palette.get(0);
        surface.set_shadow(marker, blur);
        surface.draw_circle(frame.origin, self.config.origin_radius, marker, marker);

        for ring in &frame.rings {
            let color = self.palette.get(ring.index);
            surface.set_shadow(color, blur);
            for pair in ring.points.windows(2) {
                surface.draw_line(pair[1], pair[0], color, self.config.stroke_width);
            }
        }
    }
}

/// Steps simulation time, wrapping to zero instead of passing `threshold`.
pub fn advance_time(time: f64, step: f64, threshold: f64) -> f64 {
    let next = time + step;
    if next > threshold { 0.0 } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;

    #[derive(Default)]
    struct CallLog {
        clears: usize,
        shadows: usize,
        lines: usize,
        circles: usize,
    }

    impl CallLog {
        fn total(&self) -> usize {
            self.clears + self.shadows + self.lines + self.circles
        }
    }

    impl DrawingSurface for CallLog {
        fn clear(&mut self, _region: Rect) {
            self.clears += 1;
        }

        fn set_shadow(&mut self, _color: Color, _blur: f32) {
            self.shadows += 1;
        }

        fn draw_line(&mut self, _from: [f32; 2], _to: [f32; 2], _color: Color, _width: f32) {
            self.lines += 1;
        }

        fn draw_circle(&mut self, _center: [f32; 2], _radius: f32, _stroke: Color, _fill: Color) {
            self.circles += 1;
        }
    }

    fn driver(config: Config) -> AnimationDriver {
        AnimationDriver::new(config, NoiseField::seeded(42.0).unwrap()).unwrap()
    }

    #[test]
    fn test_first_frame_renders_everything() {
        let mut driver = driver(Config::default());
        assert_eq!(driver.state(), DriverState::Idle);

        let mut log = CallLog::default();
        let outcome = driver.on_frame(0.0, &mut log).unwrap();

        assert_eq!(outcome, FrameOutcome::Rendered { tick: 0, segments: 802 });
        assert_eq!(driver.state(), DriverState::Rendering);
        assert_eq!(log.clears, 1);
        assert_eq!(log.circles, 1);
        assert_eq!(log.lines, 802);
        assert_eq!(log.shadows, 8);
    }

    #[test]
    fn test_same_tick_is_skipped_without_drawing() {
        let mut driver = driver(Config::default());
        let mut log = CallLog::default();

        driver.on_frame(1000.0, &mut log).unwrap();
        let calls = log.total();
        let time = driver.time();

        let outcome = driver.on_frame(1004.0, &mut log).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped { tick: 60 });
        assert_eq!(log.total(), calls);
        assert_eq!(driver.time(), time);

        let outcome = driver.on_frame(1010.0, &mut log).unwrap();
        assert!(matches!(outcome, FrameOutcome::Rendered { tick: 61, .. }));
    }

    #[test]
    fn test_rotation_accumulates_per_rendered_frame() {
        let mut driver = driver(Config::default());
        let mut expected = *driver.perspective();
        let mut log = CallLog::default();

        for frame in 0..3 {
            driver.on_frame(frame as f64 * 20.0, &mut log).unwrap();
            expected.rot_y(to_radians(0.5)).rot_x(to_radians(0.25));
        }
        driver.on_frame(40.0, &mut log).unwrap();

        assert_eq!(*driver.perspective(), expected);
    }

    #[test]
    fn test_time_wraps_at_threshold() {
        let mut driver = driver(Config {
            time_step: 0.4,
            time_threshold: 1.0,
            ..Config::default()
        });
        let mut log = CallLog::default();

        let mut seen = Vec::new();
        for frame in 0..4 {
            driver.on_frame(frame as f64 * 100.0, &mut log).unwrap();
            assert!(driver.time() <= 1.0);
            seen.push(driver.time());
        }
        assert_eq!(seen, vec![0.4, 0.8, 0.0, 0.4]);
    }

    #[test]
    fn test_advance_time() {
        assert_eq!(advance_time(0.0, 0.2, 1_000_000.0), 0.2);
        assert_eq!(advance_time(999_999.9, 0.2, 1_000_000.0), 0.0);
        assert_eq!(advance_time(0.5, 0.5, 1.0), 1.0);
    }

    #[test]
    fn test_failed_frame_leaves_state_untouched() {
        let mut driver = driver(Config::default());
        let mut log = CallLog::default();
        driver.on_frame(0.0, &mut log).unwrap();

        let perspective = *driver.perspective();
        let calls = log.total();
        driver.time = f64::NAN;

        let err = driver.on_frame(100.0, &mut log).unwrap_err();
        assert!(matches!(err, Error::NonFinite { ring: 1, .. }));
        assert_eq!(*driver.perspective(), perspective);
        assert_eq!(log.total(), calls);
        assert_eq!(driver.prev_tick(), Some(6));

        driver.time = 0.0;
        assert!(matches!(
            driver.on_frame(200.0, &mut log).unwrap(),
            FrameOutcome::Rendered { tick: 12, .. }
        ));
    }

    #[test]
    fn test_rejects_non_finite_clock() {
        let mut driver = driver(Config::default());
        let mut log = CallLog::default();
        assert!(driver.on_frame(f64::NAN, &mut log).is_err());
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(log.total(), 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            zoom: -0.03,
            ..Config::default()
        };
        let err = AnimationDriver::new(config, NoiseField::seeded(1.0).unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
