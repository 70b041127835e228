use serde::{Deserialize, Serialize};

/// Host selection flag on a dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionState {
    #[serde(alias = "S")]
    Selected,
    #[serde(alias = "L")]
    Locked,
    #[default]
    #[serde(other)]
    Other,
}

impl SelectionState {
    #[must_use]
    pub fn is_selected(self) -> bool {
        matches!(self, Self::Selected | Self::Locked)
    }
}

/// One cell of a tabular query result.
///
/// Column 0 is the country dimension; numeric measure cells follow in a
/// layout that is not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryCell {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub selection_state: SelectionState,
}

impl QueryCell {
    #[must_use]
    pub fn dimension(text: impl Into<String>, selection_state: SelectionState) -> Self {
        Self {
            text: Some(text.into()),
            numeric_value: None,
            selection_state,
        }
    }

    #[must_use]
    pub fn number(value: f64) -> Self {
        Self {
            text: Some(value.to_string()),
            numeric_value: Some(value),
            selection_state: SelectionState::Other,
        }
    }

    /// A cell carrying text only, e.g. a non-numeric attribute column.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Numeric value when present and finite.
    #[must_use]
    pub fn finite_number(&self) -> Option<f64> {
        self.numeric_value.filter(|value| value.is_finite())
    }

    /// Trimmed, non-empty text.
    #[must_use]
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct QueryRow {
    pub cells: Vec<QueryCell>,
}

impl QueryRow {
    #[must_use]
    pub fn new(cells: Vec<QueryCell>) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn dimension(&self) -> Option<&QueryCell> {
        self.cells.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DimensionInfo {
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MeasureInfo {
    pub title: String,
}

/// Tabular result delivered by the host on every data refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryResult {
    #[serde(default)]
    pub dimension_info: Vec<DimensionInfo>,
    #[serde(default)]
    pub measure_info: Vec<MeasureInfo>,
    #[serde(default)]
    pub rows: Vec<QueryRow>,
    #[serde(default)]
    pub grand_total: Option<f64>,
}

impl QueryResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dimension(mut self, field_name: impl Into<String>) -> Self {
        self.dimension_info.push(DimensionInfo {
            field_name: field_name.into(),
        });
        self
    }

    #[must_use]
    pub fn with_measure(mut self, title: impl Into<String>) -> Self {
        self.measure_info.push(MeasureInfo {
            title: title.into(),
        });
        self
    }

    #[must_use]
    pub fn with_row(mut self, cells: Vec<QueryCell>) -> Self {
        self.rows.push(QueryRow::new(cells));
        self
    }

    #[must_use]
    pub fn with_grand_total(mut self, value: f64) -> Self {
        self.grand_total = Some(value);
        self
    }

    /// Title of the first measure, used as the tooltip label.
    #[must_use]
    pub fn measure_title(&self) -> Option<&str> {
        self.measure_info
            .first()
            .map(|info| info.title.as_str())
            .filter(|title| !title.is_empty())
    }

    /// Host field name of the country dimension.
    #[must_use]
    pub fn dimension_field(&self) -> Option<&str> {
        self.dimension_info
            .first()
            .map(|info| info.field_name.as_str())
    }

    pub fn from_json_str(input: &str) -> crate::GlobeResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            crate::GlobeError::InvalidData(format!("failed to parse query result: {e}"))
        })
    }
}
