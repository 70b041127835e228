pub mod color_scale;
pub mod resolver;
pub mod tooltip;
pub mod zoom_controls;

pub use color_scale::ColorScale;
pub use resolver::{
    ColoringState, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, FillPalette, FillSource,
    SELECTED_STROKE_COLOR, SELECTED_STROKE_WIDTH,
};
pub use tooltip::{
    FALLBACK_MEASURE_LABEL, SELECTED_LABEL, TOOLTIP_MAX_WIDTH_PX, TOOLTIP_OFFSET_PX,
    TooltipContent, TooltipLayout, TooltipLine, TooltipStyle, format_measure_value,
    layout_tooltip,
};
pub use zoom_controls::{ZoomControl, ZoomControlsLayout, ZoomControlsVisibility};
