//! Output formatting.

use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    write_json(&mut std::io::stdout().lock(), value)
}
