// ABOUTME: Main entry point for the slidegen program.
// ABOUTME: Provides the CLI interface that turns a JSON slide file into a themed PPTX.

use clap::Parser;
use std::path::PathBuf;

/// Generate a PowerPoint presentation from JSON slide data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Presentation title
    #[arg(long)]
    title: String,

    /// Presentation style (e.g. "Business Professional", "Academic")
    #[arg(long)]
    style: String,

    /// Input JSON file path
    #[arg(long)]
    input: PathBuf,

    /// Output PPTX file path
    #[arg(long)]
    output: PathBuf,

    /// Slide aspect ratio: '4:3' or '16:9'
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    println!("Loading slides data from {}", cli.input.display());
    let slides = slidegen::load_slides(&cli.input)?;

    println!("Creating presentation with {} slides", slides.len());
    let config = slidegen::Config::new().with_aspect_ratio(cli.aspect_ratio.clone());
    let request = slidegen::BuildRequest::new(&cli.title, &cli.style, slides, &cli.output);
    let output = slidegen::build_presentation(&request, &config)?;

    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(output) => println!("Presentation saved to {}", output.display()),
        Err(e) => {
            eprintln!("Error generating presentation: {}", e);
            std::process::exit(1);
        }
    }
}
