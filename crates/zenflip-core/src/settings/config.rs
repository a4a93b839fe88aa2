//! User-configurable widget parameters.
//!
//! Stores user preferences including:
//! - Theme and font ids (opaque keys resolved by the renderer)
//! - 12/24-hour clock format
//! - Timer and Pomodoro durations
//! - Tick sound kind, interval and volume
//!
//! [`AppSettings`] is an immutable snapshot. Edits produce a new snapshot via
//! [`AppSettings::merged`] or [`AppSettings::with_field`], and every snapshot
//! that leaves this module has been clamped into range.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ValidationError};

/// Largest timer duration accepted from the editor, in minutes.
pub const MAX_TIMER_MINUTES: u32 = 5999;
/// Largest timer duration in seconds.
pub const MAX_TIMER_SECONDS: u32 = MAX_TIMER_MINUTES * 60;
/// Largest focus/break length in minutes.
pub const MAX_POMO_MINUTES: u32 = 5999;
/// Largest number of focus sessions per Pomodoro run.
pub const MAX_POMO_CYCLES: u32 = 99;

/// Sound produced on each audible tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    None,
    Flip,
    Soft,
    Mech,
    Digital,
}

impl TickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickKind::None => "none",
            TickKind::Flip => "flip",
            TickKind::Soft => "soft",
            TickKind::Mech => "mech",
            TickKind::Digital => "digital",
        }
    }
}

/// How often a tick sound is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickInterval {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "1s")]
    EverySecond,
    #[serde(rename = "1m")]
    EveryMinute,
    #[serde(rename = "10m")]
    EveryTenMinutes,
}

/// Audio feedback configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    #[serde(default = "default_tick_kind")]
    pub tick_kind: TickKind,
    #[serde(default = "default_tick_interval")]
    pub tick_interval: TickInterval,
    /// Normalized volume in `[0, 1]`.
    #[serde(default = "default_tick_volume")]
    pub tick_volume: f64,
}

/// Application settings.
///
/// Serialized to/from TOML. Every field has a serde default so a partial
/// document is merged over the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_id")]
    pub theme_id: String,
    #[serde(default = "default_font_id")]
    pub font_id: String,
    #[serde(default = "default_true")]
    pub is_24h: bool,
    #[serde(default = "default_timer_duration_seconds")]
    pub timer_duration_seconds: u32,
    #[serde(default = "default_pomo_focus_minutes")]
    pub pomo_focus_minutes: u32,
    #[serde(default = "default_pomo_break_minutes")]
    pub pomo_break_minutes: u32,
    #[serde(default = "default_pomo_cycles")]
    pub pomo_cycles: u32,
    #[serde(default)]
    pub sound: SoundSettings,
}

/// Partial update. `Some` fields replace the corresponding field wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub theme_id: Option<String>,
    pub font_id: Option<String>,
    pub is_24h: Option<bool>,
    pub timer_duration_seconds: Option<u32>,
    pub pomo_focus_minutes: Option<u32>,
    pub pomo_break_minutes: Option<u32>,
    pub pomo_cycles: Option<u32>,
    pub sound: Option<SoundSettings>,
}

// Default functions
fn default_theme_id() -> String {
    "amoled".into()
}
fn default_font_id() -> String {
    "rob-mono".into()
}
fn default_true() -> bool {
    true
}
fn default_timer_duration_seconds() -> u32 {
    60
}
fn default_pomo_focus_minutes() -> u32 {
    25
}
fn default_pomo_break_minutes() -> u32 {
    5
}
fn default_pomo_cycles() -> u32 {
    4
}
fn default_tick_kind() -> TickKind {
    TickKind::Digital
}
fn default_tick_interval() -> TickInterval {
    TickInterval::EverySecond
}
fn default_tick_volume() -> f64 {
    0.2
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            tick_kind: default_tick_kind(),
            tick_interval: default_tick_interval(),
            tick_volume: default_tick_volume(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_id: default_theme_id(),
            font_id: default_font_id(),
            is_24h: true,
            timer_duration_seconds: default_timer_duration_seconds(),
            pomo_focus_minutes: default_pomo_focus_minutes(),
            pomo_break_minutes: default_pomo_break_minutes(),
            pomo_cycles: default_pomo_cycles(),
            sound: SoundSettings::default(),
        }
    }
}

impl SoundSettings {
    fn sanitized(mut self) -> Self {
        self.tick_volume = if self.tick_volume.is_nan() {
            default_tick_volume()
        } else {
            self.tick_volume.clamp(0.0, 1.0)
        };
        self
    }
}

impl AppSettings {
    /// Clamp every numeric field into its accepted range.
    pub fn sanitized(mut self) -> Self {
        self.timer_duration_seconds = self.timer_duration_seconds.min(MAX_TIMER_SECONDS);
        self.pomo_focus_minutes = self.pomo_focus_minutes.min(MAX_POMO_MINUTES);
        self.pomo_break_minutes = self.pomo_break_minutes.min(MAX_POMO_MINUTES);
        self.pomo_cycles = self.pomo_cycles.clamp(1, MAX_POMO_CYCLES);
        self.sound = self.sound.sanitized();
        self
    }

    /// Return a new snapshot with the patch applied and clamped.
    pub fn merged(&self, patch: SettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.theme_id {
            next.theme_id = v;
        }
        if let Some(v) = patch.font_id {
            next.font_id = v;
        }
        if let Some(v) = patch.is_24h {
            next.is_24h = v;
        }
        if let Some(v) = patch.timer_duration_seconds {
            next.timer_duration_seconds = v;
        }
        if let Some(v) = patch.pomo_focus_minutes {
            next.pomo_focus_minutes = v;
        }
        if let Some(v) = patch.pomo_break_minutes {
            next.pomo_break_minutes = v;
        }
        if let Some(v) = patch.pomo_cycles {
            next.pomo_cycles = v;
        }
        if let Some(v) = patch.sound {
            next.sound = v;
        }
        next.sanitized()
    }

    /// Parse settings from TOML, filling missing keys with defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let parsed: AppSettings = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(parsed.sanitized())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Focus phase length in seconds.
    pub fn focus_seconds(&self) -> u32 {
        self.pomo_focus_minutes.saturating_mul(60)
    }

    /// Break phase length in seconds.
    pub fn break_seconds(&self) -> u32 {
        self.pomo_break_minutes.saturating_mul(60)
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut parts = key.split('.').peekable();

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(n) => {
                    let parsed = value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    if parsed.is_nan() {
                        return Err(ValidationError::NotANumber {
                            field: key.to_string(),
                        }
                        .into());
                    }
                    if n.is_u64() {
                        // Negative and oversized input is clamped here; the
                        // per-field bounds are applied by `sanitized`.
                        let whole = parsed.round().clamp(0.0, f64::from(u32::MAX)) as u64;
                        serde_json::Value::Number(whole.into())
                    } else {
                        // Infinities and overflow land on the finite extremes
                        // so `sanitized` can clamp them like any other value.
                        let finite = parsed.clamp(f64::MIN, f64::MAX);
                        serde_json::Number::from_f64(finite)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot represent '{value}'")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot assign a scalar to a section".into()).into());
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown().into())
    }

    /// Get a settings value as string by dot-separated key.
    ///
    /// Section keys such as `sound` return `None`; use [`Self::get_value`]
    /// for those.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.get_value(key)? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Raw JSON value at a dot-separated key, sections included.
    pub fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        let json = serde_json::to_value(self).ok()?;
        Self::get_json_value_by_path(&json, key).cloned()
    }

    /// Return a new snapshot with one field replaced by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// converted to the field's type.
    pub fn with_field(&self, key: &str, value: &str) -> Result<Self> {
        let mut json = serde_json::to_value(self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: AppSettings = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(next.sanitized())
    }

    /// Every leaf key, sorted.
    pub fn keys() -> Vec<String> {
        let json = serde_json::to_value(Self::default()).unwrap_or_default();
        let mut out = Vec::new();
        collect_keys(&json, "", &mut out);
        out
    }
}

fn collect_keys(value: &serde_json::Value, prefix: &str, out: &mut Vec<String>) {
    if let Some(obj) = value.as_object() {
        for (k, v) in obj {
            let key = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_object() {
                collect_keys(v, &key, out);
            } else {
                out.push(key);
            }
        }
    }
}
