pub mod measure;
pub mod query;
pub mod selection;
pub mod variation;

pub use measure::{
    MeasureExtraction, MeasureMap, detect_measure_column, distinct_value_count, extract_measure,
    value_extent,
};
pub use query::{DimensionInfo, MeasureInfo, QueryCell, QueryResult, QueryRow, SelectionState};
pub use selection::SelectionSet;
pub use variation::{VariationMethod, needs_variation, synthesize_variation};
