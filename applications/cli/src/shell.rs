//! Line-oriented command shell

use crate::app::App;
use crate::commands::Command;
use crate::error::Result;
use std::io::{BufRead, Write};

const PROMPT: &str = "cadence> ";

/// Read commands from `input` until `quit` or end of input
///
/// Command failures are printed and the shell keeps going; only I/O errors
/// end the loop early.
pub fn run_shell<R: BufRead, W: Write>(app: &mut App, input: R, output: &mut W) -> Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;

        if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(Command::Quit) => {
                    tracing::debug!("Shell quit");
                    return Ok(());
                }
                Ok(command) => match app.execute(command) {
                    Ok(text) => writeln!(output, "{text}")?,
                    Err(err) => writeln!(output, "error: {err}")?,
                },
                Err(err) => writeln!(output, "error: {err}")?,
            }
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    Ok(())
}
