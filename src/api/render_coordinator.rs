use tracing::{trace, warn};

use crate::core::{OrthographicProjection, Viewport, WorldGeometry, rings_contain};
use crate::render::{
    CirclePrimitive, Color, FontWeight, PathPrimitive, ProjectedRings, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};
use crate::style::{
    FALLBACK_MEASURE_LABEL, TooltipContent, TooltipLayout, ZoomControlsLayout,
    ZoomControlsVisibility, layout_tooltip,
};

use super::GlobeEngine;

pub const PLACEHOLDER_TEXT: &str = "Error loading globe data";
const PLACEHOLDER_FONT_PX: f64 = 14.0;
const PLACEHOLDER_COLOR: Color = Color::rgb(0.4, 0.4, 0.4);
const OUTLINE_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const OUTLINE_WIDTH: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ProjectedCountry {
    pub(super) key: String,
    pub(super) rings: ProjectedRings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SceneKey {
    rotation: [f64; 3],
    scale: f64,
    viewport: Viewport,
}

/// Country outlines projected for the current pose, reused by the hit test
/// until rotation, scale or viewport change.
#[derive(Debug, Clone, Default)]
pub(super) struct ProjectedScene {
    key: Option<SceneKey>,
    pub(super) countries: Vec<ProjectedCountry>,
}

impl ProjectedScene {
    pub(super) fn invalidate(&mut self) {
        self.key = None;
        self.countries.clear();
    }

    fn rebuild(&mut self, world: &WorldGeometry, key: SceneKey) {
        let projection = OrthographicProjection::new(key.viewport, key.rotation, key.scale);
        self.countries = world
            .features()
            .iter()
            .filter_map(|feature| {
                let rings: Vec<Vec<(f64, f64)>> = feature
                    .polygons()
                    .iter()
                    .flat_map(|polygon| polygon.rings.iter())
                    .filter_map(|ring| projection.project_ring(ring))
                    .collect();
                (!rings.is_empty()).then(|| ProjectedCountry {
                    key: feature.key().to_owned(),
                    rings: rings.into(),
                })
            })
            .collect();
        self.key = Some(key);
    }
}

/// Frame drawn instead of the globe when the geometry asset is unusable.
#[must_use]
pub fn placeholder_frame(viewport: Viewport) -> RenderFrame {
    let (cx, cy) = viewport.center();
    RenderFrame::new(viewport).with_text(TextPrimitive {
        text: PLACEHOLDER_TEXT.to_owned(),
        x: cx,
        y: cy - PLACEHOLDER_FONT_PX / 2.0,
        font_size_px: PLACEHOLDER_FONT_PX,
        font_weight: FontWeight::Normal,
        color: PLACEHOLDER_COLOR,
        h_align: TextHAlign::Center,
    })
}

impl<R: Renderer> GlobeEngine<R> {
    /// Redraw used by interactive paths; renderer failures are logged.
    pub(super) fn redraw(&mut self) {
        if self.lifecycle.torn_down || self.geometry.world.is_none() {
            return;
        }
        if let Err(err) = self.render() {
            warn!(instance_id = %self.instance_id, error = %err, "globe redraw failed");
        }
    }

    pub(super) fn build_frame(&mut self) -> RenderFrame {
        let Some(world) = self.geometry.world.clone() else {
            self.lifecycle.tooltip_visible = false;
            return match self.geometry.load_error {
                Some(_) => placeholder_frame(self.viewport),
                None => RenderFrame::new(self.viewport),
            };
        };
        self.ensure_scene(&world);

        let (cx, cy) = self.viewport.center();
        let radius = self.projection.scale();
        let palette = self.resolved.palette;
        let coloring = self.data.coloring(self.resolved.coloring.color_by_measure);
        let hovered = self.interaction.hovered();

        let mut frame = RenderFrame::new(self.viewport);
        frame.ocean = Some(CirclePrimitive {
            cx,
            cy,
            radius,
            fill: Some(self.resolved.ocean),
            stroke: None,
        });
        frame.paths = self
            .scene
            .countries
            .iter()
            .map(|country| PathPrimitive {
                key: country.key.clone(),
                rings: ProjectedRings::clone(&country.rings),
                fill: coloring.resolve_hover_fill(
                    &country.key,
                    &palette,
                    hovered == Some(country.key.as_str()),
                ),
                stroke: coloring.stroke_color(&country.key),
                stroke_width: coloring.stroke_width(&country.key),
            })
            .collect();
        frame.outline = Some(CirclePrimitive {
            cx,
            cy,
            radius,
            fill: None,
            stroke: Some((OUTLINE_COLOR, OUTLINE_WIDTH)),
        });

        if self.zoom_controls_visible() {
            let (rects, texts) =
                ZoomControlsLayout::new(self.viewport).primitives(self.projection.zoom_percent());
            frame.rects.extend(rects);
            frame.texts.extend(texts);
        }

        let tooltip = self.tooltip_layout(&world);
        self.lifecycle.tooltip_visible = tooltip.is_some();
        if let Some(tooltip) = tooltip {
            frame.rects.push(tooltip.rect);
            frame.texts.extend(tooltip.texts);
        }

        trace!(
            instance_id = %self.instance_id,
            paths = frame.paths.len(),
            scale = radius,
            "built globe frame"
        );
        frame
    }

    /// Topmost projected country under `(x, y)`, if the point is on the disc.
    pub(super) fn country_at(&mut self, x: f64, y: f64) -> Option<String> {
        let world = self.geometry.world.clone()?;
        let (cx, cy) = self.viewport.center();
        if (x - cx).hypot(y - cy) > self.projection.scale() {
            return None;
        }
        self.ensure_scene(&world);
        self.scene
            .countries
            .iter()
            .rev()
            .find(|country| rings_contain(&country.rings, x, y))
            .map(|country| country.key.clone())
    }

    pub(super) fn zoom_controls_visible(&self) -> bool {
        if !self.resolved.zoom.enabled {
            return false;
        }
        match self.resolved.zoom.controls_visibility {
            ZoomControlsVisibility::Always => true,
            ZoomControlsVisibility::Hover => self.interaction.pointer().is_some(),
            ZoomControlsVisibility::Never => false,
        }
    }

    fn ensure_scene(&mut self, world: &WorldGeometry) {
        let key = SceneKey {
            rotation: self.projection.rotation(),
            scale: self.projection.scale(),
            viewport: self.viewport,
        };
        if self.scene.key != Some(key) {
            self.scene.rebuild(world, key);
        }
    }

    fn tooltip_layout(&self, world: &WorldGeometry) -> Option<TooltipLayout> {
        if self.interaction.mode().is_gesture() {
            return None;
        }
        let pointer = self.interaction.pointer()?;
        let key = self.interaction.hovered()?;
        let feature = world.feature(key)?;

        let measure = if self.resolved.coloring.color_by_measure {
            self.data.raw_value(key).map(|value| {
                let label = self
                    .data
                    .query
                    .as_ref()
                    .and_then(|query| query.measure_title())
                    .unwrap_or(FALLBACK_MEASURE_LABEL);
                (label, value)
            })
        } else {
            None
        };
        let content =
            TooltipContent::for_country(feature.name(), measure, self.data.selection.contains(key));
        Some(layout_tooltip(
            &content,
            &self.resolved.tooltip,
            pointer,
            self.viewport,
        ))
    }
}
