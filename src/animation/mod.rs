pub mod easing;
pub mod idle_rotation;
pub mod intro;
pub mod scheduler;

pub use easing::ease_in_out_cubic;
pub use idle_rotation::{IdleHandshakeStats, IdleRotation};
pub use intro::{IntroAnimation, IntroFrame, IntroPhase, IntroPose};
pub use scheduler::{AnimationScheduler, FrameTurn};
