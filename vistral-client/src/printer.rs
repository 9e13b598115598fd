//! Live console output for the generation stream.
//!
//! Each streamed chunk carries the full cumulative generation, so the latest
//! chunk's text replaces the previous line (carriage return, no newline)
//! rather than appending to it.

use std::io::{self, Write};

/// The instruct-format close tag; generated text follows the last occurrence.
const RESPONSE_MARKER: &str = "[/INST]";

/// The portion of a cumulative `text` after the last response marker.
pub fn latest_segment(text: &str) -> &str {
    text.rsplit(RESPONSE_MARKER).next().unwrap_or(text)
}

/// Echo the prompt without a trailing newline, so the streamed response
/// continues on the same line.
pub fn print_prompt(prompt: &str) -> io::Result<()> {
    print!("{prompt}");
    io::stdout().flush()
}

/// Overwrite the current line with the latest generation state.
pub fn print_chunk(text: &str) -> io::Result<()> {
    print!("{}\r", latest_segment(text));
    io::stdout().flush()
}

/// Terminate the stream display with a newline.
pub fn finish() -> io::Result<()> {
    println!();
    io::stdout().flush()
}
