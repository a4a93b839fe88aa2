mod config;
mod store;

pub use config::{
    AppSettings, SettingsPatch, SoundSettings, TickInterval, TickKind, MAX_POMO_CYCLES,
    MAX_POMO_MINUTES, MAX_TIMER_MINUTES, MAX_TIMER_SECONDS,
};
pub use store::{MemoryBackend, SettingsBackend, SettingsStore, TomlFileBackend, SETTINGS_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the settings directory.
///
/// `ZENFLIP_DATA_DIR` wins when set. Otherwise `~/.config/zenflip[-dev]/`
/// based on `ZENFLIP_ENV` (set `ZENFLIP_ENV=dev` for the development
/// directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ZENFLIP_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ZENFLIP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("zenflip-dev")
            } else {
                base_dir.join("zenflip")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
