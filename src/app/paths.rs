// SPDX-License-Identifier: MPL-2.0
//! Resolution of the data and config directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`HASKELLITO_DATA_DIR`, `HASKELLITO_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs`, with the application name appended
//!
//! The data directory holds the durable key-value store; the config directory
//! holds `settings.toml`.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Haskellito";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "HASKELLITO_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "HASKELLITO_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` and `--config-dir` arguments.
///
/// Only the first call takes effect. Returns `false` (and logs) when the
/// overrides were already initialized.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> bool {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    if !(data_set && config_set) {
        tracing::warn!("CLI directory overrides already initialized; keeping the first values");
    }
    data_set && config_set
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or_else(|| cli.get().cloned().flatten())
        .or_else(|| env_dir(env_var))
        .or_else(|| {
            platform().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the application data directory path.
///
/// Platform defaults:
/// - Linux: `~/.local/share/Haskellito/`
/// - macOS: `~/Library/Application Support/Haskellito/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\Haskellito\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory path (`settings.toml` lives here).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}
