//! Tracing subscriber setup.

use crate::config::Environment;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default verbosity for a tier; `RUST_LOG` directives take precedence.
pub fn default_level(env: Environment) -> LevelFilter {
    match env {
        Environment::Dev => LevelFilter::DEBUG,
        Environment::Local | Environment::Prod => LevelFilter::INFO,
    }
}

/// Install the global subscriber: human-readable output for local and dev,
/// JSON lines for prod.
pub fn init_tracing(env: Environment) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(env).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env {
        Environment::Prod => builder.json().init(),
        Environment::Local | Environment::Dev => builder.init(),
    }
}
