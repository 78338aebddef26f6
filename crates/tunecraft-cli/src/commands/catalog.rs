//! Catalog command implementation
//!
//! Prints the genres, moods and templates the service offers.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tunecraft_spec::{BackendError, Catalog};

use super::json_output::{CatalogOutput, JsonError};
use crate::services::catalog_store;

/// Run the catalog command
///
/// # Arguments
/// * `path` - Optional catalog JSON file (default: built-in catalog)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 if the catalog file cannot be loaded
pub fn run(path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let store = catalog_store(path.map(Path::new));
    let loaded = store.load();

    if json_output {
        let (output, code) = match loaded {
            Ok(catalog) => (CatalogOutput::success(catalog), ExitCode::SUCCESS),
            Err(err) => (
                CatalogOutput::failure(vec![
                    JsonError::new(err.code(), err.message()).with_file(store.describe())
                ]),
                ExitCode::from(1),
            ),
        };
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize catalog output")?;
        println!("{}", json);
        return Ok(code);
    }

    let catalog = loaded.with_context(|| format!("Failed to load {}", store.describe()))?;
    print_catalog(&catalog, &store.describe());
    Ok(ExitCode::SUCCESS)
}

fn print_catalog(catalog: &Catalog, source: &str) {
    println!("{} {}", "Catalog:".cyan().bold(), source);

    println!("\n{} ({})", "Genres".bold(), catalog.genres.len());
    for genre in &catalog.genres {
        println!(
            "  {:<12} {:<12} {}-{} bpm  {}",
            genre.id.green(),
            genre.name,
            genre.tempo_bpm[0],
            genre.tempo_bpm[1],
            genre.description.dimmed()
        );
    }

    println!("\n{} ({})", "Moods".bold(), catalog.moods.len());
    for mood in &catalog.moods {
        println!(
            "  {:<12} {:<12} {}",
            mood.id.green(),
            mood.name,
            mood.description.dimmed()
        );
    }

    if !catalog.templates.is_empty() {
        println!("\n{} ({})", "Templates".bold(), catalog.templates.len());
        for template in &catalog.templates {
            println!(
                "  {:<14} {}/{} {}s  {}",
                template.id.green(),
                template.genre,
                template.mood,
                template.duration_seconds,
                template.description.dimmed()
            );
        }
    }
}
