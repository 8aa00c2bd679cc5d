//! Tracing setup for the trivia backend.
//!
//! `LOG_LEVEL` takes an `EnvFilter` directive; `LOG_FORMAT=json` switches to
//! JSON lines. Anything else, or nothing, gives human-readable output.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,trivia=debug,trivia_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Directive from `LOG_LEVEL` if it parses, the service default otherwise.
fn filter_from(raw: Option<&str>) -> EnvFilter {
    raw.and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_from(level.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
