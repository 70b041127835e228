//! globe-rs: headless rotatable orthographic country globe.
//!
//! The engine owns projection, gesture, animation and data-coloring
//! semantics. Hosts feed it input events, frame and timer callbacks and a
//! renderer backend through a strict module split.

pub mod animation;
pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod host;
pub mod interaction;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{GeometrySource, GlobeConfig, GlobeEngine, GlobeMount};
pub use error::{GlobeError, GlobeResult};
