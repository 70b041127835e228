use serde::{Deserialize, Serialize};

use crate::animation::ease_in_out_cubic;

/// Rotation and scale at one end of the fly-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroPose {
    pub rotation: [f64; 3],
    pub scale: f64,
}

impl IntroPose {
    #[must_use]
    pub fn new(rotation: [f64; 3], scale: f64) -> Self {
        Self { rotation, scale }
    }

    /// Component-wise linear interpolation.
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            rotation: [
                mix(self.rotation[0], target.rotation[0]),
                mix(self.rotation[1], target.rotation[1]),
                mix(self.rotation[2], target.rotation[2]),
            ],
            scale: mix(self.scale, target.scale),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    Running,
    Completed,
    Cancelled,
}

/// Pose produced by one intro frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroFrame {
    pub pose: IntroPose,
    pub finished: bool,
}

/// One-shot eased fly-in from a start pose to the resting pose.
///
/// The clock starts at the first frame timestamp. Cancellation only stops
/// further frames; the last applied pose stays where it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroAnimation {
    from: IntroPose,
    to: IntroPose,
    duration_ms: f64,
    started_at: Option<f64>,
    phase: IntroPhase,
}

impl IntroAnimation {
    #[must_use]
    pub fn new(from: IntroPose, to: IntroPose, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            started_at: None,
            phase: IntroPhase::Running,
        }
    }

    #[must_use]
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == IntroPhase::Running
    }

    #[must_use]
    pub fn from_pose(&self) -> IntroPose {
        self.from
    }

    #[must_use]
    pub fn target_pose(&self) -> IntroPose {
        self.to
    }

    /// Advances to `timestamp_ms`. Returns `None` once the animation is no
    /// longer running.
    pub fn step(&mut self, timestamp_ms: f64) -> Option<IntroFrame> {
        if !self.is_running() {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(timestamp_ms);
        let progress = if self.duration_ms > 0.0 {
            ((timestamp_ms - started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let finished = progress >= 1.0;
        let pose = if finished {
            self.to
        } else {
            self.from.lerp(self.to, ease_in_out_cubic(progress))
        };
        if finished {
            self.phase = IntroPhase::Completed;
        }
        Some(IntroFrame { pose, finished })
    }

    /// Stops the animation. Returns true only when it was still running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = IntroPhase::Cancelled;
        true
    }

    /// Rescales both endpoint scales, used when the viewport changes while
    /// the fly-in runs.
    pub fn rescale(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.from.scale *= ratio;
            self.to.scale *= ratio;
        }
    }
}
