//! Live widget loop.
//!
//! Two [`TickScheduler`]s feed one channel: the 1s time pulse and the 500ms
//! idle poll. Stdin lines stand in for pointer and keyboard input:
//!
//! | line            | effect                                  |
//! |-----------------|-----------------------------------------|
//! | (empty)         | pointer move: reveal controls           |
//! | `space` / ` `   | start/pause                             |
//! | `r`             | reset                                   |
//! | `f`             | fullscreen (reported only)              |
//! | `l`, `lock`     | toggle the idle lock                    |
//! | `leave`         | pointer left the window                 |
//! | `mode <name>`   | switch mode                             |
//! | `set <k> <v>`   | edit a setting (text entry, no shortcut)|
//! | `q`, `quit`     | exit                                    |

use std::io::Write;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use zenflip_core::settings::MAX_TIMER_MINUTES;
use zenflip_core::{
    Action, Event, InputEvent, Mode, PointerKind, SettingsBackend, SettingsPatch, TickScheduler,
    TomlFileBackend, Widget, IDLE_POLL_PERIOD, TICK_PERIOD,
};

use super::parse_mode;
use crate::audio::TerminalBell;

#[derive(Args)]
pub struct RunArgs {
    /// Mode to start in
    #[arg(short, long, default_value = "clock", value_parser = parse_mode)]
    mode: Mode,
    /// Start the countdown or stopwatch immediately
    #[arg(long)]
    start: bool,
    /// Timer duration in minutes (0..=5999, persisted)
    #[arg(long)]
    timer_minutes: Option<u32>,
    /// Exit after this many one-second ticks
    #[arg(long)]
    ticks: Option<u64>,
    /// Print events as JSON lines instead of the clock face
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy)]
enum Pulse {
    Tick,
    IdlePoll,
}

#[derive(Debug, PartialEq)]
enum Command {
    Input(InputEvent),
    Lock,
    SwitchMode(Mode),
    Set { key: String, value: String },
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return if line.is_empty() {
            Command::Input(InputEvent::Pointer(PointerKind::Move))
        } else {
            Command::Input(InputEvent::key(" "))
        };
    }

    let mut words = trimmed.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("q" | "quit"), None, None) => Command::Quit,
        (Some("l" | "lock"), None, None) => Command::Lock,
        (Some("leave"), None, None) => Command::Input(InputEvent::Pointer(PointerKind::Leave)),
        (Some("mode"), Some(name), None) => match Mode::parse(name) {
            Some(mode) => Command::SwitchMode(mode),
            None => Command::Unknown(trimmed.to_string()),
        },
        (Some("set"), Some(key), Some(value)) => Command::Set {
            key: key.to_string(),
            value: value.to_string(),
        },
        (Some(key), None, None) => Command::Input(InputEvent::key(key)),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Clock face plus, while the controls are visible, the status label.
fn render<B: SettingsBackend>(widget: &Widget<B, TerminalBell>) -> String {
    let mut line = widget.display().to_string();
    if widget.idle().is_visible() {
        if let Some(status) = widget.clock().status_label() {
            line.push_str("  ");
            line.push_str(&status);
        }
    }
    if widget.idle().is_locked() {
        line.push_str("  [locked]");
    }
    line
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_widget(args))
}

async fn run_widget(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let backend = TomlFileBackend::open_default()?;
    let mut widget = Widget::new(backend, TerminalBell, Local::now().naive_local(), Instant::now());

    let mut events = Vec::new();
    if let Some(minutes) = args.timer_minutes {
        events.extend(widget.update_settings(SettingsPatch {
            timer_duration_seconds: Some(minutes.min(MAX_TIMER_MINUTES) * 60),
            ..Default::default()
        }));
    }
    events.extend(widget.set_mode(args.mode));
    if args.start {
        events.extend(widget.dispatch(Action::ToggleRun));
    }
    emit(&widget, &events, args.json)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let tick_tx = tx.clone();
    let _ticker = TickScheduler::start(TICK_PERIOD, move || {
        let _ = tick_tx.send(Pulse::Tick);
    });
    let _idle_poll = TickScheduler::start(IDLE_POLL_PERIOD, move || {
        let _ = tx.send(Pulse::IdlePoll);
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            pulse = rx.recv() => {
                let Some(pulse) = pulse else { break };
                match pulse {
                    Pulse::Tick => {
                        let events = widget.tick(Local::now().naive_local());
                        render_tick(&widget, &events, args.json)?;
                        ticks += 1;
                        if args.ticks.is_some_and(|limit| ticks >= limit) {
                            break;
                        }
                    }
                    Pulse::IdlePoll => {
                        let events = widget.poll_idle(Instant::now());
                        if args.json {
                            emit(&widget, &events, true)?;
                        }
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                let events = match parse_command(&line) {
                    Command::Quit => break,
                    Command::Input(input) => widget.handle_input(input, Instant::now()),
                    Command::Lock => widget.toggle_lock(Instant::now()),
                    Command::SwitchMode(mode) => widget.set_mode(mode),
                    Command::Set { key, value } => {
                        let mut events = widget.handle_input(InputEvent::text_entry(""), Instant::now());
                        match widget.set_setting(&key, &value) {
                            Ok(more) => events.extend(more),
                            Err(e) => eprintln!("error: {e}"),
                        }
                        events
                    }
                    Command::Unknown(text) => {
                        eprintln!("unrecognised input: {text}");
                        Vec::new()
                    }
                };
                emit(&widget, &events, args.json)?;
            }
        }
    }

    Ok(())
}

fn render_tick<B: SettingsBackend>(
    widget: &Widget<B, TerminalBell>,
    events: &[Event],
    json: bool,
) -> std::io::Result<()> {
    if json {
        return emit(widget, events, true);
    }
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", render(widget))?;
    out.flush()
}

fn emit<B: SettingsBackend>(
    widget: &Widget<B, TerminalBell>,
    events: &[Event],
    json: bool,
) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        for event in events {
            let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
            writeln!(out, "{line}")?;
        }
    } else if !events.is_empty() {
        writeln!(out, "{}", render(widget))?;
    }
    out.flush()
}
