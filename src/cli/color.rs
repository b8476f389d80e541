//! Color and palette command implementations

use std::process::ExitCode;

use crate::color::parse_hex_code;
use crate::palette::{basic_color, PALETTE_SIZE};
use crate::renderer::open_span;

use super::{EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the color command
pub fn run_color(hex: &str, floor: Option<f64>, ceiling: Option<f64>) -> ExitCode {
    let color = match parse_hex_code(hex) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: '{}': {}", hex, e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let color = match (floor, ceiling) {
        (Some(floor), Some(ceiling)) => {
            if !(floor >= 0.0 && floor < ceiling && ceiling <= 1.0) {
                eprintln!(
                    "Warning: lightness bounds {}..{} are invalid, color left unchanged",
                    floor, ceiling
                );
            }
            color.cap_lightness(floor, ceiling)
        }
        _ => color,
    };

    println!("{}", color);
    println!("{}", color.to_hsl());
    println!("{}", open_span(color));
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the palette command
pub fn run_palette() -> ExitCode {
    for index in 0..PALETTE_SIZE as u8 {
        if let Some(color) = basic_color(index) {
            println!("^{}  {:<18} {}", index, color.to_string(), color.to_hsl());
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
