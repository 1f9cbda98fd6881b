use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Filter comes from `RUST_LOG`; output goes to stderr
/// so tables and JSON on stdout stay clean.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "odyssey_contracts=info,odyssey_cli=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
