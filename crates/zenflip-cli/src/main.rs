use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod audio;
mod commands;

#[derive(Parser)]
#[command(name = "zenflip", version, about = "ZenFlip flip clock, timer, stopwatch and pomodoro")]
struct Cli {
    /// Debug logging to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live widget in the terminal
    Run(commands::run::RunArgs),
    /// Print the current display once
    Now(commands::now::NowArgs),
    /// Persisted settings
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Now(args) => commands::now::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "zenflip", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
