//! Unified path management for roster files.
//!
//! Paths are resolved via AppPaths from the version-migrate crate, which
//! follows XDG on Linux/macOS and the platform defaults on Windows.

use std::path::PathBuf;

use version_migrate::AppPaths;

use roster_core::error::{Result, RosterError};

/// Directory layout:
///
/// ```text
/// ~/.config/roster/            # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/roster/       # Data directory
/// └── profiles.json            # Profile collection (key "profiles")
/// ```
pub struct RosterPaths;

impl RosterPaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("roster")
    }

    /// Returns the roster configuration directory (e.g. `~/.config/roster/`).
    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| RosterError::config("Cannot determine config directory"))
    }

    /// Returns the roster data directory (e.g. `~/.local/share/roster/`).
    ///
    /// Falls back to the platform-local data directory when AppPaths cannot
    /// resolve one.
    pub fn data_dir() -> Result<PathBuf> {
        Self::app_paths().data_dir().or_else(|_| {
            dirs::data_local_dir()
                .map(|dir| dir.join("roster"))
                .ok_or_else(|| RosterError::config("Cannot determine data directory"))
        })
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
