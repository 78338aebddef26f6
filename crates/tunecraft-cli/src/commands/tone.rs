//! Tone command implementation
//!
//! Renders a sine tone with a linear fade to a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tunecraft_backend_audio::{write_tone_file, AudioError};
use tunecraft_spec::{BackendError, ToneSpec};

use super::json_output::{error_codes, invalid_spec_to_json, JsonError, ToneOutput, ToneResult};

/// Run the tone command
///
/// # Arguments
/// * `spec` - Tone to render
/// * `output` - Destination WAV path
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 invalid tone or write failure
pub fn run(spec: &ToneSpec, output: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(spec, output)
    } else {
        run_human(spec, output)
    }
}

fn run_human(spec: &ToneSpec, output: &str) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Rendering tone:".cyan().bold(), output);
    println!(
        "{} {} Hz, {} s @ {} Hz, amplitude {}, fade {} s",
        "Tone:".dimmed(),
        spec.frequency_hz,
        spec.duration_seconds,
        spec.sample_rate,
        spec.amplitude,
        spec.fade_seconds
    );

    let container = match write_tone_file(spec, Path::new(output)) {
        Ok(container) => container,
        Err(AudioError::InvalidSpec(err)) => {
            println!(
                "  {} {}: {}",
                err.code().red(),
                err.field().dimmed(),
                err.message()
            );
            println!("\n{} Tone spec is invalid", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to write tone to {}", output));
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "{} {} bytes, {} samples, pcm {}",
        "Wrote:".dimmed(),
        container.len(),
        container.num_samples(),
        &container.pcm_hash()[..16]
    );
    println!("\n{} Tone written ({}ms)", "SUCCESS".green().bold(), duration_ms);
    Ok(ExitCode::SUCCESS)
}

fn run_json(spec: &ToneSpec, output: &str) -> Result<ExitCode> {
    let (result, code) = match write_tone_file(spec, Path::new(output)) {
        Ok(container) => (
            ToneOutput::success(ToneResult {
                path: output.to_string(),
                bytes: container.len(),
                sample_rate: container.sample_rate(),
                num_samples: container.num_samples(),
                duration_seconds: container.duration_seconds(),
                pcm_hash: container.pcm_hash().to_string(),
            }),
            ExitCode::SUCCESS,
        ),
        Err(AudioError::InvalidSpec(err)) => (
            ToneOutput::failure(vec![invalid_spec_to_json(&err)]),
            ExitCode::from(1),
        ),
        Err(err) => (
            ToneOutput::failure(vec![
                JsonError::new(error_codes::FILE_WRITE, err.to_string()).with_file(output)
            ]),
            ExitCode::from(1),
        ),
    };

    let json = serde_json::to_string_pretty(&result).context("Failed to serialize tone output")?;
    println!("{}", json);
    Ok(code)
}
