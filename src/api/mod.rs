mod animation_controller;
mod config_normalization;
mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod gesture_controller;
mod lifecycle;
mod paint_controller;
mod pointer_controller;
mod projection_controller;
mod render_coordinator;
mod resize_controller;

pub use config_normalization::{
    ResolvedAnimation, ResolvedColoring, ResolvedConfig, ResolvedZoom,
};
pub use engine::GlobeEngine;
pub use engine_config::{
    AnimationConfig, ColorConfig, GlobeConfig, MeasureColoringConfig, TooltipConfig, ZoomConfig,
};
pub use engine_init::{GeometrySource, GlobeMount};
pub use engine_snapshot::{EngineSnapshot, IdleRotationSnapshot};
pub use gesture_controller::WHEEL_END_DELAY_MS;
pub use lifecycle::{TeardownReport, TeardownStep};
pub use pointer_controller::ClickOutcome;
pub use render_coordinator::{PLACEHOLDER_TEXT, placeholder_frame};
pub use resize_controller::RESIZE_DEBOUNCE_MS;
