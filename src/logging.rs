use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `verbosity` is the number of `-v` flags. `RUST_LOG` overrides it. Other
/// crates (the windowing stack in particular) stay at `warn`.
pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,page_images_pdf={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
