//! Writing captured output to the terminal.

use crate::cli::OutputFormat;
use shellexec::decode::JsonDecoder;
use shellexec::{Captured, ExecError, Result};
use std::io::Write;

/// Render `captured` in `format` and write it to `out`.
pub fn emit(captured: Captured, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Bytes => out.write_all(&captured.bytes()).map_err(write_error)?,
        OutputFormat::Text => {
            let text = captured.text()?;
            out.write_all(text.as_bytes()).map_err(write_error)?;
            if !text.is_empty() && !text.ends_with('\n') {
                out.write_all(b"\n").map_err(write_error)?;
            }
        }
        OutputFormat::Json => {
            let value: serde_json::Value = captured.decode(&JsonDecoder)?;
            serde_json::to_writer_pretty(&mut *out, &value)
                .map_err(|e| ExecError::Io(format!("failed to write output: {}", e)))?;
            out.write_all(b"\n").map_err(write_error)?;
        }
    }

    out.flush().map_err(write_error)
}

fn write_error(e: std::io::Error) -> ExecError {
    ExecError::Io(format!("failed to write output: {}", e))
}
