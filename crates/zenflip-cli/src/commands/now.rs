use chrono::Local;
use clap::Args;
use serde::Serialize;
use zenflip_core::{Action, DisplayTime, Mode, ModeController, NullAudio, SettingsStore, TomlFileBackend};

use super::parse_mode;

#[derive(Args)]
pub struct NowArgs {
    /// Mode to project
    #[arg(short, long, default_value = "clock", value_parser = parse_mode)]
    mode: Mode,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Snapshot {
    mode: Mode,
    display: DisplayTime,
    text: String,
    status: Option<String>,
}

/// A freshly entered mode: the wall clock, or a countdown/stopwatch at its
/// initial value.
pub fn run(args: NowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open(TomlFileBackend::open_default()?);
    let mut clock = ModeController::new(store.get().clone(), Local::now().naive_local());
    clock.dispatch(Action::SetMode(args.mode), &NullAudio);

    let display = clock.display();
    let snapshot = Snapshot {
        mode: clock.mode(),
        display,
        text: display.to_string(),
        status: clock.status_label(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        match snapshot.status {
            Some(status) => println!("{}  {status}", snapshot.text),
            None => println!("{}", snapshot.text),
        }
    }
    Ok(())
}
