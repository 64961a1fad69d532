//! Cyrtrans CLI tool for transliterating between Cyrillic and ASCII.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cyrtrans::Language;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod generators;
mod translit;

use generators::generate_cyrillic;
use translit::{exit_codes, Direction, TranslitArgs};

#[derive(Debug, Parser)]
#[command(name = "cyrtrans")]
#[command(about = "Round-trip Cyrillic/ASCII transliteration", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overrides CYRTRANS_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Transliterate UTF-8 Cyrillic text to ASCII
    Encode(TranslitArgs),
    /// Transliterate ASCII back to UTF-8 Cyrillic text
    Decode(TranslitArgs),
    /// Generate synthetic Cyrillic text for benchmarking and testing
    Generate(GenerateText),
}

/// Generate synthetic Cyrillic text for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateText {
    /// Size of text to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text pattern to generate
    #[arg(short, long, default_value = "prose")]
    pattern: PatternArg,

    /// Dialect of the generated text
    #[arg(short, long, default_value = "ru")]
    language: Language,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Sentences of words with spaces and punctuation (default)
    Prose,
    /// Letters only (encodes under the rejecting policy)
    Letters,
    /// Prose with Latin words, digits and emoji mixed in
    Mixed,
}

impl From<PatternArg> for generators::Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Prose => generators::Pattern::Prose,
            PatternArg::Letters => generators::Pattern::Letters,
            PatternArg::Mixed => generators::Pattern::Mixed,
        }
    }
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    // Try parsing as plain number first
    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    // Parse with unit suffix
    let (num_str, unit) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .ok_or_else(|| format!("Invalid number in size: '{}'", s))
}

/// Install the stderr log subscriber.
///
/// `CYRTRANS_LOG` takes `EnvFilter` directives; the default level is `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CYRTRANS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Encode(args) => translit::run(args, Direction::Encode),
        Command::Decode(args) => translit::run(args, Direction::Decode),
        Command::Generate(args) => {
            let text = generate_cyrillic(args.size, args.pattern.into(), args.language, args.seed);

            match args.output {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    eprintln!("✓ Wrote {} bytes to {}", text.len(), path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&text)?;
                }
            }

            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            exit_codes::IO_ERROR
        }
    };
    std::process::exit(code);
}
