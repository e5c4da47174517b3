//! Shadow core cycle-accurate simulator CLI.
//!
//! This binary drives the core from recorded stimulus. It performs:
//! 1. **Run:** Load a JSON stimulus (and optional JSON config), simulate every
//!    cycle, and print one JSON line of outputs per cycle to stdout.
//! 2. **Config:** Print the default configuration as JSON, as a starting point
//!    for a config file.
//!
//! Statistics are written to stderr after a run so stdout stays machine-readable.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shadowline_core::Simulator;
use shadowline_core::config::Config;
use shadowline_core::sim::Stimulus;
use shadowline_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "shadowline",
    author,
    version,
    about = "Cycle-accurate shadow tracking core simulator",
    long_about = "Drive the shadow ring, release queue, and tag set from a JSON stimulus.\n\nExamples:\n  shadowline run --stimulus trace.json\n  shadowline run --stimulus trace.json --config core.json --stats shadow --stats tags\n  shadowline config > core.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a stimulus file and print per-cycle outputs as JSON lines.
    Run {
        /// Stimulus file (JSON cycle list).
        #[arg(short, long)]
        stimulus: PathBuf,

        /// Configuration file (JSON); built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log every cycle at trace level.
        #[arg(long)]
        trace: bool,

        /// Statistics sections to print (summary, shadow, release, tags); all when omitted.
        #[arg(long = "stats", value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS))]
        sections: Vec<String>,
    },

    /// Print the default configuration as JSON.
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            stimulus,
            config,
            trace,
            sections,
        } => cmd_run(&stimulus, config.as_deref(), trace, &sections),
        Commands::Config => cmd_config(),
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs a stimulus to completion, streaming outputs to stdout.
///
/// Exits with code 1 if the config or stimulus cannot be loaded.
fn cmd_run(stimulus_path: &Path, config_path: Option<&Path>, trace: bool, sections: &[String]) {
    init_tracing(trace);

    let mut config = match config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}: {e}", path.display());
            process::exit(1);
        }),
        None => Config::default(),
    };
    config.general.trace |= trace;

    let stimulus = Stimulus::from_file(stimulus_path).unwrap_or_else(|e| {
        eprintln!("Error: {}: {e}", stimulus_path.display());
        process::exit(1);
    });

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    info!(
        cycles = stimulus.len(),
        branches = config.shadow.branches,
        width = config.shadow.width,
        release = config.release.capacity,
        "starting run"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for input in stimulus.iter() {
        let outputs = sim.tick(&input);
        let line = match serde_json::to_string(&outputs) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: cannot encode cycle {}: {e}", outputs.cycle);
                process::exit(1);
            }
        };
        if writeln!(out, "{line}").is_err() {
            // Downstream closed the pipe.
            break;
        }
    }
    let _ = out.flush().ok();

    eprint!("{}", sim.stats.report_sections(sections));
}

/// Prints the default configuration.
fn cmd_config() {
    match serde_json::to_string_pretty(&Config::default()) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
