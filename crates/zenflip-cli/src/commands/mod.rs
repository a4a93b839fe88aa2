pub mod config;
pub mod now;
pub mod run;

use zenflip_core::Mode;

/// clap value parser for `--mode`.
pub fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Mode::ALL.iter().map(Mode::as_str).collect();
        format!("unknown mode '{s}' (expected one of: {})", names.join(", "))
    })
}
