//! Tracing setup for the Caplit binaries.
//!
//! One subscriber is installed per process, at startup, before any jobs are
//! accepted. Job lifecycle events carry `job_id` and `origin` fields, so the
//! default filter keeps the Caplit crates at the configured level while
//! holding third-party targets at `warn`.

use crate::config::LoggingConfig;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber from `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Repeated calls
/// after the first are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives_for(&config.level)));

    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);
    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).ok();
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).finish()).ok();
    }
}

/// Expand a bare level like `"debug"` into per-crate directives so that
/// dependency noise stays at `warn`. Values that already contain directives
/// (e.g. `"caplit=debug,warn"`) are used as-is.
fn directives_for(level: &str) -> String {
    if level.contains(['=', ',']) {
        return level.to_string();
    }
    let crates = [
        "caplit",
        "caplit_common",
        "caplit_caption_core",
        "caplit_speech",
        "caplit_render_engine",
        "caplit_jobs",
    ];
    let mut directives = String::from("warn");
    for target in crates {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}
