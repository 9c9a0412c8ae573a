use crate::Result;
use crate::facts::Report;
use core::fmt::Write;

pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_yaml::to_string(report)?)?;
    Ok(())
}
