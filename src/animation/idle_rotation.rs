use serde::{Deserialize, Serialize};

/// Counters for the suspend/resume handshake with the gesture controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleHandshakeStats {
    pub suspends: u64,
    pub resumes: u64,
}

/// Continuous longitude drift at `speed` degrees per second, measured with
/// wall-clock frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleRotation {
    speed: f64,
    running: bool,
    suspended: bool,
    last_timestamp: Option<f64>,
    stats: IdleHandshakeStats,
}

impl IdleRotation {
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self {
            speed: sanitize_speed(speed),
            running: false,
            suspended: false,
            last_timestamp: None,
            stats: IdleHandshakeStats::default(),
        }
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Re-enabling after speed `0` starts from a fresh baseline frame.
    pub fn set_speed(&mut self, speed: f64) {
        let was_enabled = self.is_enabled();
        self.speed = sanitize_speed(speed);
        if !was_enabled {
            self.last_timestamp = None;
        }
    }

    /// Speed `0` disables idle rotation entirely.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.speed > 0.0
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Running, enabled and not held by a gesture.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.running && !self.suspended && self.is_enabled()
    }

    #[must_use]
    pub fn stats(&self) -> IdleHandshakeStats {
        self.stats
    }

    /// Starts the drift; the next frame only records a baseline timestamp.
    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp = None;
    }

    /// Same as `start` but anchored at a known timestamp.
    pub fn start_at(&mut self, timestamp_ms: f64) {
        self.running = true;
        self.last_timestamp = Some(timestamp_ms);
    }

    /// Returns true when the rotation was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.last_timestamp = None;
        was_running
    }

    /// Returns true only on the transition into the suspended state.
    pub fn suspend(&mut self) -> bool {
        if self.suspended {
            return false;
        }
        self.suspended = true;
        self.stats.suspends += 1;
        true
    }

    /// Returns true only on the transition out of the suspended state.
    /// Time spent suspended is not replayed.
    pub fn resume(&mut self) -> bool {
        if !self.suspended {
            return false;
        }
        self.suspended = false;
        self.last_timestamp = None;
        self.stats.resumes += 1;
        true
    }

    /// Degrees to add to lambda for this frame, or `None` when inactive.
    pub fn step(&mut self, timestamp_ms: f64) -> Option<f64> {
        if !self.is_active() {
            return None;
        }
        let previous = self.last_timestamp.replace(timestamp_ms);
        let elapsed = previous.map_or(0.0, |previous| (timestamp_ms - previous).max(0.0));
        Some(elapsed * self.speed / 1000.0)
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() { speed.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::IdleRotation;

    #[test]
    fn advances_by_wall_clock_delta() {
        let mut idle = IdleRotation::new(20.0);
        idle.start();
        assert_eq!(idle.step(1000.0), Some(0.0));
        assert_abs_diff_eq!(idle.step(1050.0).expect("step"), 1.0);
        assert_abs_diff_eq!(idle.step(1250.0).expect("step"), 4.0);
    }

    #[test]
    fn suspend_and_resume_are_counted_once_per_transition() {
        let mut idle = IdleRotation::new(20.0);
        idle.start();
        assert!(idle.suspend());
        assert!(!idle.suspend());
        assert_eq!(idle.step(10.0), None);
        assert!(idle.resume());
        assert!(!idle.resume());
        assert_eq!(idle.stats().suspends, 1);
        assert_eq!(idle.stats().resumes, 1);
    }

    #[test]
    fn zero_or_invalid_speed_disables() {
        let mut idle = IdleRotation::new(f64::NAN);
        idle.start();
        assert!(!idle.is_enabled());
        assert_eq!(idle.step(5.0), None);
        idle.set_speed(-3.0);
        assert!(!idle.is_active());
    }
}
