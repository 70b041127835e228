//! Opt-in tracing setup for hosts embedding `globe-rs`.
//!
//! The engine itself only emits `tracing` events (`globe_rs` target). Hosts
//! that already run a subscriber can ignore this module entirely.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "globe_rs=info";

/// Installs a compact `fmt` subscriber honoring `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback filter,
/// e.g. `"globe_rs=trace"` to see per-frame animation events.
#[must_use]
pub fn init_tracing_with_fallback(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let _ = init_default_tracing();
        assert!(!init_tracing_with_fallback("globe_rs=trace"));
    }
}
