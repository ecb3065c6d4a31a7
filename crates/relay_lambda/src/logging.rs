use tracing_subscriber::EnvFilter;

/// Plain-text subscriber for CloudWatch. `RUST_LOG` overrides the `info`
/// default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .init();
}
