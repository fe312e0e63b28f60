use dr_telemetry::logging;

#[test]
fn init_logging_human() {
    // Should not panic; second call is a safe no-op.
    logging::init_logging("dealroom-test", "debug");
    logging::init_logging("dealroom-test", "info");

    tracing::info!(deal = 1, "human-readable log line");
}

#[test]
fn init_logging_json() {
    // Whichever test runs first owns the global subscriber; this one no-ops.
    logging::init_logging_json("dealroom-test-json", "info");

    tracing::info!(deal = 1, "json log line");
}

#[test]
fn init_picks_format_from_flag() {
    logging::init("dealroom-test", "warn", true);
    logging::init("dealroom-test", "warn", false);
}
