use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub fn configure_logging() {
    // Console log configuration. Logs go to stderr so JSON results on
    // stdout stay machine-readable.
    let console_log = fmt::layer().with_writer(io::stderr).with_filter(
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,segment=info,matching=info,directory=warn")),
    );

    // File log configuration
    let file_appender = rolling::daily("logs", "orgmatch.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_filter(EnvFilter::new("debug,hyper=info,reqwest=info"));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
