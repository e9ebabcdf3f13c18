//! Log output for the `icicle` binary.
//!
//! Logs go to stderr so stdout carries only minted or decoded IDs. The level
//! defaults to `info` and is overridden with `RUST_LOG`, e.g.
//!
//! ```bash
//! RUST_LOG=debug icicle batch 64
//! RUST_LOG=icicle=trace icicle next
//! ```
//!
//! `trace` enables the generator's own spans around each mint call.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn default_filter_is_info() {
        let filter = EnvFilter::new(DEFAULT_FILTER);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
