use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use mddocx::{Config, DEFAULT_FILE_NAME};

#[derive(Parser)]
#[command(name = "mddocx")]
#[command(version)]
#[command(about = "Convert Markdown files to Word documents")]
struct Cli {
    /// Input Markdown file, or `-` to read stdin
    input: PathBuf,

    /// Output file (defaults to the input name with a .docx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file overriding the default layout settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the HTML preview instead of a document
    #[arg(long)]
    preview: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> mddocx::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let markdown = read_input(&cli.input)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input, cli.preview));

    let bytes = if cli.preview {
        if markdown.trim().is_empty() {
            return Err(mddocx::Error::InvalidInput);
        }
        mddocx::markdown_to_preview_html(&markdown).into_bytes()
    } else {
        mddocx::convert(&markdown, &config)?.bytes
    };

    fs::write(&output, bytes)?;
    println!("Created {}", output.display());
    Ok(())
}

fn read_input(input: &Path) -> mddocx::Result<String> {
    if input == Path::new("-") {
        let mut markdown = String::new();
        io::stdin().read_to_string(&mut markdown)?;
        return Ok(markdown);
    }

    fs::read_to_string(input).map_err(|e| {
        log::error!("reading {}: {}", input.display(), e);
        e.into()
    })
}

fn default_output(input: &Path, preview: bool) -> PathBuf {
    let extension = if preview { "html" } else { "docx" };
    if input == Path::new("-") {
        return PathBuf::from(DEFAULT_FILE_NAME).with_extension(extension);
    }
    input.with_extension(extension)
}
