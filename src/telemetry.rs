//! Telemetry helpers for hosts embedding `coin-timeline`.
//!
//! Every degrade path in the engine (dropped rows, malformed payloads,
//! stale deliveries) reports through `tracing`. Hosts either call
//! `init_default_tracing` or install their own subscriber.
//!
//! Events carry their module path as target, so `RUST_LOG` can narrow them:
//!
//! - `coin_timeline::sources` for dropped price rows, malformed JSON
//!   payloads and unparsed prediction-log lines (`trace`/`warn`).
//! - `coin_timeline::api` for coin switches, stale deliveries, degraded
//!   optional sources and failed chart rebuilds (`info`/`debug`/`warn`).
//! - `coin_timeline::core` for merge summaries (`debug`).
//! - `coin_timeline::interaction` for selection transitions (`debug`).
//! - `coin_timeline::render` for chart rebuilds (`debug`).
//!
//! For example `RUST_LOG=coin_timeline=info,coin_timeline::sources=trace`.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
