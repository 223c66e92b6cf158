cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

/// Monotonic millisecond time source for frame throttling.
pub trait Clock {
    fn now_millis(&self) -> f64;
}

#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: std::cell::Cell<f64>,
}

impl ManualClock {
    pub fn at(millis: f64) -> Self {
        Self {
            now: std::cell::Cell::new(millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = clock.now_millis();
        assert!(a >= 0.0);
        assert!(b >= a + 4.0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::at(10.0);
        clock.advance(6.5);
        assert_eq!(clock.now_millis(), 16.5);
        clock.set(0.0);
        assert_eq!(clock.now_millis(), 0.0);
    }
}
