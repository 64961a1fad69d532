//! CLI handler for the `encode` and `decode` commands.
//!
//! Input is processed line by line. Line terminators (`\n` or `\r\n`) are
//! copied through unchanged and never reach the codec, so error positions are
//! reported as line and column.

use anyhow::{Context, Result};
use clap::Parser;
use cyrtrans::convert;
use cyrtrans::{decode_raw, encode_raw, Error, Language, PolicyPreset, Session, SessionConfig};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Transliterate files between Cyrillic and ASCII.
#[derive(Debug, Parser)]
pub struct TranslitArgs {
    /// Input files (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Dialect: ru, uk (and aliases such as russian, ukrainian, ua)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Validation policy: none, ignore-all, append-all, or a 0x-prefixed word
    #[arg(short, long)]
    pub policy: Option<PolicyPreset>,

    /// JSON session configuration; --language and --policy override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode: exit code only, no error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// Direction of a transliteration command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Exit codes for the encode and decode commands.
pub mod exit_codes {
    /// Every input was transliterated.
    pub const SUCCESS: i32 = 0;
    /// Some input could not be transliterated.
    pub const INVALID: i32 = 1;
    /// I/O or configuration error (file not found, bad config, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    line_num: &'static str,
    caret: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                line_num: colors::LINE_NUM,
                caret: colors::CARET,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                line_num: "",
                caret: "",
                message: "",
                reset: "",
            }
        }
    }
}

/// A transliteration error located in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    error: Error,
    /// 1-based line number.
    line: usize,
    /// 1-based column, in characters.
    column: usize,
    /// The offending line without its terminator.
    line_bytes: Vec<u8>,
}

/// Build the session from `--config`, then `--language` and `--policy`.
fn build_session(args: &TranslitArgs) -> Result<Session> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<SessionConfig>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if !config.language.is_set() {
        anyhow::bail!("language not set (use --language or a config file)");
    }

    // A misconfigured preset is logged when the policy is installed.
    let session = config.build();
    tracing::debug!(language = %session.language(), policy = ?session.policy(), "session ready");
    Ok(session)
}

/// Run the encode or decode command.
pub fn run(args: TranslitArgs, direction: Direction) -> Result<i32> {
    // Determine color output
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };

    let scheme = ColorScheme::new(use_color);
    let session = build_session(&args)?;

    let mut output = Vec::new();
    let mut any_invalid = false;
    let mut any_io_error = false;

    if args.files.is_empty() {
        // Read from stdin
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;

        if !process_input(&session, direction, &input, None, &args, &scheme, &mut output) {
            any_invalid = true;
        }
    } else {
        for path in &args.files {
            match fs::read(path) {
                Ok(input) => {
                    let filename = path.to_string_lossy();
                    let ok = process_input(
                        &session,
                        direction,
                        &input,
                        Some(&filename),
                        &args,
                        &scheme,
                        &mut output,
                    );
                    if !ok {
                        any_invalid = true;
                    }
                }
                Err(e) => {
                    any_io_error = true;
                    if !args.quiet {
                        eprintln!(
                            "{}error{}: {}: {}",
                            scheme.error,
                            scheme.reset,
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&output)?;
            lock.flush()?;
        }
    }

    if any_io_error {
        Ok(exit_codes::IO_ERROR)
    } else if any_invalid {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Transliterate one input, appending to `output` on success.
///
/// Returns `false` (after printing the error) if the input failed; nothing of
/// a failed input is written.
fn process_input(
    session: &Session,
    direction: Direction,
    input: &[u8],
    filename: Option<&str>,
    args: &TranslitArgs,
    scheme: &ColorScheme,
    output: &mut Vec<u8>,
) -> bool {
    match transliterate(session, direction, input) {
        Ok(bytes) => {
            output.extend_from_slice(&bytes);
            true
        }
        Err(failure) => {
            if !args.quiet {
                print_error(&failure, filename, scheme);
            }
            false
        }
    }
}

/// Transliterate `input` line by line.
fn transliterate(
    session: &Session,
    direction: Direction,
    input: &[u8],
) -> std::result::Result<Vec<u8>, Failure> {
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut wide = Vec::new();
    let mut narrow = Vec::new();

    for (index, chunk) in input.split_inclusive(|&b| b == b'\n').enumerate() {
        let (body, terminator) = split_terminator(chunk);
        let locate = |error: Error, byte_offset: usize| Failure {
            error,
            line: index + 1,
            column: column_at(body, byte_offset),
            line_bytes: body.to_vec(),
        };

        match direction {
            Direction::Encode => {
                let units = convert::to_wide(body).map_err(|e| {
                    let offset = e.offset().unwrap_or(0);
                    locate(e, offset)
                })?;
                encode_raw(session.language(), session.policy(), &mut narrow, &units).map_err(
                    |e| {
                        let offset = utf16_to_byte_offset(body, e.offset().unwrap_or(0));
                        locate(e, offset)
                    },
                )?;
                out.extend_from_slice(&narrow);
            }
            Direction::Decode => {
                decode_raw(session.language(), &mut wide, body).map_err(|e| {
                    let offset = e.offset().unwrap_or(0);
                    locate(e, offset)
                })?;
                let text = convert::to_bytes(&wide).map_err(|e| locate(e, 0))?;
                out.extend_from_slice(text.as_bytes());
            }
        }
        out.extend_from_slice(terminator);
    }
    Ok(out)
}

/// Split a line into its body and its `\n` or `\r\n` terminator.
fn split_terminator(chunk: &[u8]) -> (&[u8], &[u8]) {
    let body_len = match chunk {
        [.., b'\r', b'\n'] => chunk.len() - 2,
        [.., b'\n'] => chunk.len() - 1,
        _ => chunk.len(),
    };
    chunk.split_at(body_len)
}

/// Byte offset in UTF-8 `line` of the UTF-16 unit at `offset`.
fn utf16_to_byte_offset(line: &[u8], offset: usize) -> usize {
    let text = String::from_utf8_lossy(line);
    let mut units = 0;
    for (i, ch) in text.char_indices() {
        if units >= offset {
            return i;
        }
        units += ch.len_utf16();
    }
    text.len()
}

/// 1-based character column of `byte_offset` in `line`.
fn column_at(line: &[u8], byte_offset: usize) -> usize {
    let end = byte_offset.min(line.len());
    String::from_utf8_lossy(&line[..end]).chars().count() + 1
}

/// Print a formatted error message with context snippet.
fn print_error(failure: &Failure, filename: Option<&str>, scheme: &ColorScheme) {
    // Print error header
    eprintln!(
        "{}error{}: {}",
        scheme.error,
        scheme.reset,
        format_error(&failure.error)
    );

    // Print location
    let location = match filename {
        Some(f) => format!("{}:{}:{}", f, failure.line, failure.column),
        None => format!("<stdin>:{}:{}", failure.line, failure.column),
    };
    eprintln!("  {}--> {}{}", scheme.location, location, scheme.reset);

    // Print context snippet
    let snippet = get_error_snippet(&failure.line_bytes, failure.column);
    let line_num_width = failure.line.to_string().len().max(3);
    let blank_padding = " ".repeat(line_num_width + 2);

    eprintln!("{}{}|{}", blank_padding, scheme.line_num, scheme.reset);
    eprintln!(
        " {}{:>width$}{} {}|{} {}",
        scheme.line_num,
        failure.line,
        scheme.reset,
        scheme.line_num,
        scheme.reset,
        snippet.line_content,
        width = line_num_width
    );

    let padding = " ".repeat(snippet.caret_offset);
    eprintln!(
        "{}{}|{} {}{}^{}{}",
        blank_padding,
        scheme.line_num,
        scheme.reset,
        padding,
        scheme.caret,
        scheme.reset,
        format_error_hint(&failure.error, scheme)
    );

    eprintln!();
}

/// Format the error as a human-readable message.
fn format_error(error: &Error) -> String {
    match *error {
        Error::InvalidWord { word, .. } => match char::from_u32(word as u32) {
            Some(ch) if !ch.is_control() => format!("invalid word U+{:04X} ('{}')", word, ch),
            _ => format!("invalid word U+{:04X}", word),
        },
        Error::InvalidByte {
            byte: Some(byte), ..
        } => format!("invalid byte 0x{:02X}", byte),
        Error::InvalidByte { byte: None, .. } => "input ends inside an escape".to_string(),
        Error::ConvertFailed { .. } => "invalid UTF-8".to_string(),
        _ => error.kind().message().to_string(),
    }
}

/// Format an additional hint for certain error types.
fn format_error_hint(error: &Error, scheme: &ColorScheme) -> String {
    let hint = match error {
        Error::InvalidWord { .. } => Some("not a Cyrillic letter; see --policy"),
        Error::InvalidByte { byte: Some(_), .. } => Some("not part of any spelling"),
        Error::InvalidByte { byte: None, .. } => Some("expected a letter after `j` or `J`"),
        _ => None,
    };

    match hint {
        Some(h) => format!(" {}{}{}", scheme.message, h, scheme.reset),
        None => String::new(),
    }
}

/// Information about an error snippet.
struct ErrorSnippet {
    /// The content of the line containing the error.
    line_content: String,
    /// Number of spaces before the caret.
    caret_offset: usize,
}

/// Extract the displayable part of `line` around `column`.
fn get_error_snippet(line: &[u8], column: usize) -> ErrorSnippet {
    let text = String::from_utf8_lossy(line);
    let chars: Vec<char> = text.chars().collect();
    let error_col = column.saturating_sub(1);

    // Truncate long lines
    let max_width = 80;
    if chars.len() <= max_width {
        return ErrorSnippet {
            line_content: text.into_owned(),
            caret_offset: error_col,
        };
    }

    let slice = |start: usize, end: usize| chars[start..end].iter().collect::<String>();
    if error_col < max_width / 2 {
        ErrorSnippet {
            line_content: format!("{}...", slice(0, max_width)),
            caret_offset: error_col,
        }
    } else if error_col >= chars.len().saturating_sub(max_width / 2) {
        let start = chars.len() - max_width;
        ErrorSnippet {
            line_content: format!("...{}", slice(start, chars.len())),
            caret_offset: error_col - start + 3,
        }
    } else {
        let start = error_col - max_width / 2;
        let end = (start + max_width).min(chars.len());
        ErrorSnippet {
            line_content: format!("...{}...", slice(start, end)),
            caret_offset: error_col - start + 3,
        }
    }
}
