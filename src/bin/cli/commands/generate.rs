use anyhow::{Context, Result};

use cardsmith_lib::{CardGenerator, GenerationReport};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let generator = CardGenerator::from_config(&app.input, &app.config)
        .context("Failed to set up card generation")?;

    let report = generator
        .generate()
        .with_context(|| format!("Failed to generate cards from {}", app.input.display()))?;

    match format {
        OutputFormat::Json => print_json(app, &report)?,
        OutputFormat::Plain => print_plain(app, &report),
    }

    Ok(())
}

fn print_plain(app: &App, report: &GenerationReport) {
    let config = &app.config;

    if report.has_skipped() {
        println!("\n--- Skipped {} phrases (not in dictionary) ---", report.skipped.len());
        for word in &report.skipped {
            println!("  - {}", word);
        }
    }

    println!("\nSuccess! Generated {} Anki cards.", report.cards.len());
    println!("Output file: {}", config.output.display());
    if config.sounds_enabled {
        println!("Sound files: {}/", config.sounds_dir.display());
    }
    if config.images_enabled {
        println!("Image files: {}/", config.images_dir.display());
    }
}

fn print_json(app: &App, report: &GenerationReport) -> Result<()> {
    let config = &app.config;
    let output = serde_json::json!({
        "cards": report.cards.len(),
        "skipped": report.skipped,
        "output": config.output.to_string_lossy(),
        "skippedLog": report.has_skipped().then(|| config.skipped_log.to_string_lossy()),
        "soundsDir": config.sounds_enabled.then(|| config.sounds_dir.to_string_lossy()),
        "imagesDir": config.images_enabled.then(|| config.images_dir.to_string_lossy()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
