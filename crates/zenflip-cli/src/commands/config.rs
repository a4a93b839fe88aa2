use clap::Subcommand;
use zenflip_core::{AppSettings, SettingsBackend, SettingsStore, TomlFileBackend};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting value
    Get {
        /// Dot-separated key (e.g. "pomo_cycles", "sound.tick_volume");
        /// a section key such as "sound" prints the whole section as JSON
        key: String,
    },
    /// Set a setting value (clamped to its valid range)
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings as JSON
    List,
    /// Print every settable key
    Keys,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let backend = TomlFileBackend::open_default()?;

    match action {
        ConfigAction::Get { key } => {
            let store = SettingsStore::open(backend);
            match store.get().get_value(&key) {
                Some(serde_json::Value::String(value)) => println!("{value}"),
                Some(section @ serde_json::Value::Object(_)) => {
                    println!("{}", serde_json::to_string_pretty(&section)?);
                }
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            // Save through the backend so write failures reach the caller.
            let current = SettingsStore::open(backend.clone()).get().clone();
            let next = current.with_field(&key, &value)?;
            backend.save(&next)?;
            tracing::debug!(%key, "setting updated");
            println!("{key} = {}", next.get(&key).unwrap_or_default());
        }
        ConfigAction::List => {
            let store = SettingsStore::open(backend);
            println!("{}", serde_json::to_string_pretty(store.get())?);
        }
        ConfigAction::Keys => {
            for key in AppSettings::keys() {
                println!("{key}");
            }
        }
        ConfigAction::Reset => {
            backend.save(&AppSettings::default())?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", backend.path().display());
        }
    }
    Ok(())
}
