//! Strip, html and parts command implementations

use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::debug;

use crate::renderer::Renderer;

use super::{InputArgs, EXIT_ERROR, EXIT_SUCCESS};

/// What each input line is rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Stripped,
    Html,
    Parts { pretty: bool },
}

/// Collect the strings to render: positional texts, else file lines, else stdin lines.
fn read_inputs(input: &InputArgs) -> io::Result<Vec<String>> {
    if !input.texts.is_empty() {
        return Ok(input.texts.clone());
    }

    let bytes = match &input.file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(split_lines(&bytes))
}

/// Split raw input into lines. Invalid UTF-8 becomes U+FFFD instead of failing the batch.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);

    bytes
        .split(|&b| b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8_lossy(line).into_owned()
        })
        .collect()
}

fn render_line(
    renderer: &Renderer,
    line: &str,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Stripped => Ok(renderer.stripped(line)),
        OutputFormat::Html => Ok(renderer.to_html(line)),
        OutputFormat::Parts { pretty: false } => serde_json::to_string(&renderer.color_parts(line)),
        OutputFormat::Parts { pretty: true } => {
            serde_json::to_string_pretty(&renderer.color_parts(line))
        }
    }
}

/// Execute the strip, html or parts command
pub fn run_render(renderer: &Renderer, input: &InputArgs, format: OutputFormat) -> ExitCode {
    let lines = match read_inputs(input) {
        Ok(lines) => lines,
        Err(e) => {
            match &input.file {
                Some(path) => eprintln!("Error: Failed to read '{}': {}", path.display(), e),
                None => eprintln!("Error: Failed to read stdin: {}", e),
            }
            return ExitCode::from(EXIT_ERROR);
        }
    };

    debug!(lines = lines.len(), ?format, "rendering");

    // Order is preserved by the indexed parallel collect
    let rendered: Result<Vec<String>, _> =
        lines.par_iter().map(|line| render_line(renderer, line, format)).collect();

    let rendered = match rendered {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: Failed to serialize segments: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &rendered {
        if let Err(e) = writeln!(out, "{}", line) {
            eprintln!("Error: Failed to write output: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
