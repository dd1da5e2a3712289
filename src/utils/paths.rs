use std::{env, path::PathBuf};

use bakery_config::default_app_base;

/// Environment variable overriding the application base directory.
pub const HOME_ENV: &str = "BAKERY_LEDGER_HOME";

/// Returns the application base directory holding config and saved books.
pub fn app_base_dir() -> PathBuf {
    env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_app_base)
}
