use anyhow::{Context, Result};
use std::io::Write;

use crate::reference::ReferenceSeed;

/// Pretty JSON rendering of a seed, newline-terminated. Only the seed is
/// written, so the output can be piped straight into a JSON consumer.
pub fn write_preview<W: Write>(seed: &ReferenceSeed, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, seed).context("Failed to serialize seed preview")?;
    writeln!(writer).context("Failed to write seed preview")?;
    writer.flush().context("Failed to flush seed preview")?;
    Ok(())
}
