//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::AppEnv;

/// Installs the global subscriber for the given profile.
///
/// `local` logs human-readable text, `dev` and `prod` log JSON lines.
/// The level comes from `RUST_LOG` when set, otherwise from the profile.
pub fn init(app_env: AppEnv) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app_env.default_log_level()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match app_env {
        AppEnv::Local => builder.pretty().init(),
        AppEnv::Dev | AppEnv::Prod => builder.json().with_current_span(true).init(),
    }
}
