/// Initialize the global tracing subscriber.
///
/// `level` is parsed like `tracing::Level` ("error" through "trace");
/// anything unrecognized falls back to `info`.
pub fn init(level: &str) {
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);

    // try_init so tests can call this repeatedly without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
