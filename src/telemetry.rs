//! Telemetry helpers for applications embedding `sensor-chart`.
//!
//! Ingestion, projection and zoom handling emit `tracing` events under the
//! `sensor_chart` target. Hosts either call `init_default_tracing` or wire
//! their own subscriber and filters.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is taken from `RUST_LOG` and falls back to `default_filter`.
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_tracing_with_default_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// Same as [`init_tracing_with_default_filter`] with an `info` default.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn disabled_feature_never_installs_a_subscriber() {
        assert!(!init_default_tracing());
    }
}
