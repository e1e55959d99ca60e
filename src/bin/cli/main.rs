mod app;
mod commands;

use std::path::PathBuf;

use clap::Parser;

use cardsmith_lib::translate::TranslatorBackend;

#[derive(Parser)]
#[command(name = "cardsmith", about = "Generate Anki cards from a vocabulary CSV", version)]
pub struct Cli {
    /// Input CSV file path (columns: Keyword,Vietnamese)
    input: PathBuf,

    /// Output CSV file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for sound files
    #[arg(long)]
    sounds_dir: Option<PathBuf>,

    /// Directory for image files
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Dictionary API base URL
    #[arg(long)]
    dictionary_url: Option<String>,

    /// Read settings from a TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// File listing words not found in the dictionary
    #[arg(long)]
    skipped_log: Option<PathBuf>,

    /// Translation backend for rows without a translation
    #[arg(long)]
    translator: Option<TranslatorBackend>,

    /// Target language code for translations
    #[arg(long)]
    target_lang: Option<String>,

    /// Text appended to keywords in media file names
    #[arg(long)]
    media_suffix: Option<String>,

    /// Append each card to the output as it is generated
    #[arg(long)]
    append: bool,

    /// Skip image search and download
    #[arg(long)]
    no_images: bool,

    /// Skip pronunciation downloads
    #[arg(long)]
    no_sounds: bool,

    /// Summary format
    #[arg(long, default_value = "plain")]
    format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let app = app::App::new(&cli)?;
    commands::generate::run(&app, &cli.format)?;

    Ok(())
}
