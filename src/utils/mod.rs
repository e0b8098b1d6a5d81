use dirs::home_dir;
use std::sync::Once;
use std::{env, path::PathBuf};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("money_manager=info".parse().unwrap());

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

const DEFAULT_DIR_NAME: &str = ".money_manager";
const STORE_DIR: &str = "store";
const EXPORT_DIR: &str = "exports";

/// Environment variable overriding the data directory, mainly for tests.
pub const HOME_ENV: &str = "MONEY_MANAGER_HOME";

/// Returns the application data directory, defaulting to `~/.money_manager`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the JSON blob store.
pub fn store_dir() -> PathBuf {
    app_data_dir().join(STORE_DIR)
}

/// Default directory CSV exports are written to.
pub fn export_dir() -> PathBuf {
    app_data_dir().join(EXPORT_DIR)
}
