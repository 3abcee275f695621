use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directive(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "formation_booking=debug,info".to_string(),
        (false, Some(level)) => format!("formation_booking={}", level),
        (false, None) => "formation_booking=info".to_string(),
    }
}

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)))
}

/// `level` comes from the `[logging]` section; `RUST_LOG` wins over both.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
