//! Diagnostic tracing for `filelist`.
//!
//! Tracing output goes to stderr and is controlled by `RUST_LOG`. The
//! confirmation and failure lines printed by the binary are not tracing
//! events and are always shown.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or unparsable; keeps skipped-entry
/// warnings visible.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Initialize the tracing subscriber from `RUST_LOG`.
///
/// # Example
/// ```bash
/// RUST_LOG=filelist=debug filelist --directory src
/// ```
pub fn init() {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
