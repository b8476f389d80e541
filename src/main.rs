//! qstr - Command-line tool for rendering Quake-style color-coded strings

use std::process::ExitCode;

use qstr::cli;

fn main() -> ExitCode {
    cli::run()
}
