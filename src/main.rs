use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use mdmend_lib::{DocumentProcessor, FormatMode, PostprocessConfig};

#[derive(Parser)]
#[command(author, version, about = "Repair and reformat Markdown recovered from PDF extraction", long_about = None)]
struct Cli {
    /// Input Markdown file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Output file. Writes stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Code block layout mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Skip the YAML repair pass; only reformat fenced code blocks
    #[arg(long)]
    no_repair: bool,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Recompute indentation from scratch
    Canonical,
    /// Keep extracted layout for unrecognized content
    Preserve,
}

impl From<ModeArg> for FormatMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Canonical => FormatMode::Canonical,
            ModeArg::Preserve => FormatMode::Preserve,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let mut config = match &cli.config {
        Some(path) => PostprocessConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PostprocessConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }

    let document = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let processor = DocumentProcessor::new(&config);
    let result = if cli.no_repair {
        processor.format_blocks(&document)
    } else {
        processor.format_code_blocks(&document)
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &result)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            io::stdout()
                .write_all(result.as_bytes())
                .context("failed to write stdout")?;
        }
    }

    Ok(())
}
