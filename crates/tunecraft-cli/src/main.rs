//! Tunecraft CLI - tone rendering and the demo music HTTP API
//!
//! This binary renders tones to disk, prints the catalog, and runs the HTTP
//! server.

use clap::Parser;
use std::process::ExitCode;

// Use modules from the library crate
use tunecraft_cli::commands;

mod cli_args;

use cli_args::{tone_spec, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tone {
            output,
            frequency,
            duration,
            sample_rate,
            amplitude,
            fade,
            json,
        } => {
            let spec = tone_spec(frequency, duration, sample_rate, amplitude, fade);
            commands::tone::run(&spec, &output, json)
        }
        Commands::Serve { host, port, config } => {
            commands::serve::run(config.as_deref(), host, port)
        }
        Commands::Catalog { file, json } => commands::catalog::run(file.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
