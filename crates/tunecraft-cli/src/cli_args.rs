//! CLI argument definitions for the Tunecraft command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use tunecraft_spec::ToneSpec;

/// Tunecraft - Demo music generation backend
#[derive(Parser)]
#[command(name = "tunecraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a sine tone with a linear fade to a WAV file
    Tone {
        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 22050)]
        sample_rate: u32,

        /// Peak amplitude in [0, 1]
        #[arg(short, long, default_value_t = 0.3)]
        amplitude: f64,

        /// Fade-in and fade-out length in seconds
        #[arg(long, default_value_t = 0.1)]
        fade: f64,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Address to bind (default: 127.0.0.1)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on (default: 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a JSON configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print the genres, moods and templates on offer
    Catalog {
        /// Catalog JSON file (default: built-in catalog)
        #[arg(long)]
        file: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Builds the tone spec from `tone` arguments.
pub(crate) fn tone_spec(
    frequency: f64,
    duration: f64,
    sample_rate: u32,
    amplitude: f64,
    fade: f64,
) -> ToneSpec {
    ToneSpec::new(sample_rate, duration, frequency, amplitude, fade)
}
