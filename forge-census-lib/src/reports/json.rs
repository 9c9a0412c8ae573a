use crate::Result;
use crate::facts::Report;
use core::fmt::Write;

pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
