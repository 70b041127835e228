use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::render::Renderer;
use crate::style::{ZoomControl, ZoomControlsLayout};

use super::GlobeEngine;

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    ZoomControl(ZoomControl),
    /// The host accepted a toggle for this display name.
    SelectionRequested(String),
    /// The host rejected the toggle; the engine stays interactive.
    SelectionFailed(String),
    Ignored,
}

impl<R: Renderer> GlobeEngine<R> {
    /// Tracks the pointer for hover, tooltip and hover-only zoom controls.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.input_enabled() {
            return;
        }
        self.interaction.on_pointer_move(x, y);
        if self.interaction.mode().is_gesture() {
            return;
        }
        self.refresh_hover_target();
        self.redraw();
    }

    pub fn pointer_leave(&mut self) {
        if !self.input_enabled() {
            return;
        }
        self.interaction.on_pointer_leave();
        self.redraw();
    }

    /// Uppercase key of the country under the pointer.
    #[must_use]
    pub fn hovered_country(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    #[must_use]
    pub fn tooltip_visible(&self) -> bool {
        self.lifecycle.tooltip_visible
    }

    /// Zoom buttons first, then the country under the pointer, whose
    /// display name goes to the host as a selection toggle.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        if !self.input_enabled() {
            return ClickOutcome::Ignored;
        }
        if self.zoom_controls_visible() {
            if let Some(control) = ZoomControlsLayout::new(self.viewport).hit_test(x, y) {
                match control {
                    ZoomControl::ZoomIn => self.zoom_in(),
                    ZoomControl::Reset => self.reset_view(),
                    ZoomControl::ZoomOut => self.zoom_out(),
                };
                return ClickOutcome::ZoomControl(control);
            }
        }

        let Some(key) = self.country_at(x, y) else {
            return ClickOutcome::Ignored;
        };
        let Some(field) = self
            .data
            .query
            .as_ref()
            .and_then(|query| query.dimension_field())
            .map(str::to_owned)
        else {
            debug!(instance_id = %self.instance_id, country = %key, "click without bound dimension");
            return ClickOutcome::Ignored;
        };
        let name = self
            .geometry
            .world
            .as_ref()
            .and_then(|world| world.feature(&key))
            .map_or_else(|| key.clone(), |feature| feature.name().to_owned());

        match self.host.selection.toggle_selection(&field, &name) {
            Ok(()) => {
                debug!(instance_id = %self.instance_id, field = %field, country = %name, "requested selection toggle");
                ClickOutcome::SelectionRequested(name)
            }
            Err(err) => {
                warn!(
                    instance_id = %self.instance_id,
                    field = %field,
                    country = %name,
                    error = %err,
                    "selection toggle failed"
                );
                ClickOutcome::SelectionFailed(name)
            }
        }
    }

    /// Re-targets hover after the pointer or the globe moved.
    pub(super) fn refresh_hover_target(&mut self) -> bool {
        let target = self
            .interaction
            .pointer()
            .and_then(|(x, y)| self.country_at(x, y));
        self.interaction.set_hovered(target)
    }
}
