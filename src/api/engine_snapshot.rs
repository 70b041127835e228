use serde::{Deserialize, Serialize};

use crate::animation::{IdleHandshakeStats, IntroPhase};
use crate::core::{ScaleBounds, Viewport};
use crate::error::{GlobeError, GlobeResult};
use crate::interaction::GestureMode;
use crate::render::Renderer;

use super::GlobeEngine;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdleRotationSnapshot {
    pub speed: f64,
    pub running: bool,
    pub suspended: bool,
    pub stats: IdleHandshakeStats,
}

/// Serializable engine state for regression tests, debugging and host
/// export integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub instance_id: String,
    pub viewport: Viewport,
    pub mode: GestureMode,
    pub rotation: [f64; 3],
    pub scale: f64,
    pub bounds: ScaleBounds,
    pub zoom_percent: i64,
    pub zoom_factor: f64,
    pub selection: Vec<String>,
    pub measure_count: usize,
    pub measure_synthesized: bool,
    pub hovered: Option<String>,
    pub tooltip_visible: bool,
    pub intro_phase: Option<IntroPhase>,
    pub intro_completed: bool,
    pub idle: IdleRotationSnapshot,
    pub frame_pending: bool,
    pub pending_timers: usize,
    pub torn_down: bool,
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> GlobeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GlobeError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}

impl<R: Renderer> GlobeEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let idle = self.animation.idle();
        EngineSnapshot {
            instance_id: self.instance_id.clone(),
            viewport: self.viewport,
            mode: self.interaction.mode(),
            rotation: self.projection.rotation(),
            scale: self.projection.scale(),
            bounds: self.projection.bounds(),
            zoom_percent: self.projection.zoom_percent(),
            zoom_factor: self.interaction.zoom_factor(),
            selection: self.data.selection.iter().map(str::to_owned).collect(),
            measure_count: self.data.extraction.values.len(),
            measure_synthesized: self.data.synthesized,
            hovered: self.interaction.hovered().map(str::to_owned),
            tooltip_visible: self.lifecycle.tooltip_visible,
            intro_phase: self.animation.intro().map(|intro| intro.phase()),
            intro_completed: self.intro_already_complete(),
            idle: IdleRotationSnapshot {
                speed: idle.speed(),
                running: idle.is_running(),
                suspended: idle.is_suspended(),
                stats: idle.stats(),
            },
            frame_pending: self.animation.pending_frame().is_some(),
            pending_timers: self.timers.count(),
            torn_down: self.lifecycle.torn_down,
        }
    }

    /// Pretty JSON of [`GlobeEngine::snapshot`].
    pub fn snapshot_json_pretty(&self) -> GlobeResult<String> {
        self.snapshot().to_json_pretty()
    }
}
