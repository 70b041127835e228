use tracing::debug;

use crate::data::{
    MeasureExtraction, MeasureMap, QueryResult, SelectionSet, extract_measure, needs_variation,
    synthesize_variation,
};
use crate::render::Renderer;
use crate::style::{ColorScale, ColoringState, FillSource};

use super::GlobeEngine;

/// Data-derived state, rebuilt from the last query result on every refresh.
#[derive(Debug, Clone, Default)]
pub(super) struct DataState {
    pub(super) query: Option<QueryResult>,
    pub(super) selection: SelectionSet,
    pub(super) extraction: MeasureExtraction,
    /// Values driving fills; the synthesized map when variation applied.
    pub(super) fill_values: Option<MeasureMap>,
    pub(super) synthesized: bool,
    pub(super) scale: Option<ColorScale>,
}

impl DataState {
    pub(super) fn coloring(&self, color_by_measure: bool) -> ColoringState<'_> {
        ColoringState {
            selection: &self.selection,
            measure: self.fill_values.as_ref(),
            scale: self.scale.as_ref(),
            color_by_measure,
        }
    }

    /// Raw value for the tooltip, never the synthesized one.
    pub(super) fn raw_value(&self, key: &str) -> Option<f64> {
        self.extraction.values.get(key).copied()
    }
}

impl<R: Renderer> GlobeEngine<R> {
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.data.selection
    }

    /// Raw per-country values extracted from the last query result.
    #[must_use]
    pub fn measure_values(&self) -> &MeasureMap {
        &self.data.extraction.values
    }

    /// Values feeding the color scale; differs from
    /// [`GlobeEngine::measure_values`] only when variation was synthesized.
    #[must_use]
    pub fn fill_values(&self) -> Option<&MeasureMap> {
        self.data.fill_values.as_ref()
    }

    #[must_use]
    pub fn measure_synthesized(&self) -> bool {
        self.data.synthesized
    }

    #[must_use]
    pub fn color_scale(&self) -> Option<&ColorScale> {
        self.data.scale.as_ref()
    }

    /// Precedence rule that colors `country` (case-insensitive) right now.
    #[must_use]
    pub fn fill_source(&self, country: &str) -> FillSource {
        self.data
            .coloring(self.resolved.coloring.color_by_measure)
            .fill_source(&country.to_uppercase())
    }

    pub(super) fn refresh_data(&mut self) {
        let Some(world) = self.geometry.world.clone() else {
            return;
        };
        let query = self.data.query.as_ref();
        let selection = SelectionSet::from_query(query, &world);
        let extraction = extract_measure(query);

        let coloring = self.resolved.coloring;
        let mut synthesized = false;
        let fill_values = if coloring.color_by_measure && !extraction.values.is_empty() {
            if needs_variation(&extraction.values, coloring.force_variation) {
                synthesized = true;
                synthesize_variation(&extraction.values, coloring.variation_method, &mut self.rng)
            } else {
                Some(extraction.values.clone())
            }
        } else {
            None
        };
        let scale = fill_values.as_ref().and_then(|values| {
            ColorScale::from_values(values, coloring.measure_start, coloring.measure_end)
        });

        debug!(
            instance_id = %self.instance_id,
            selected = selection.len(),
            measured = extraction.values.len(),
            invalid_rows = extraction.invalid_rows,
            synthesized,
            "refreshed globe data"
        );

        self.data.selection = selection;
        self.data.extraction = extraction;
        self.data.fill_values = fill_values;
        self.data.synthesized = synthesized;
        self.data.scale = scale;
    }
}
