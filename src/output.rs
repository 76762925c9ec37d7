//! Writing rendered reports

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::report::{RenderMode, Report};

fn render(report: &Report, mode: RenderMode) -> io::Result<String> {
    report.to_json(mode).map_err(io::Error::other)
}

/// Print the report as JSON to stdout.
///
/// A closed stdout surfaces as an error instead of a panic.
pub fn print_report(report: &Report, mode: RenderMode) -> io::Result<()> {
    write_json_to(report, mode, &mut io::stdout().lock())
}

/// Write the report as JSON plus a trailing newline to `out`.
pub fn write_json_to<W: Write>(report: &Report, mode: RenderMode, out: &mut W) -> io::Result<()> {
    let json = render(report, mode)?;
    writeln!(out, "{}", json)?;
    out.flush()
}

/// Write the report as JSON to `dest`, replacing any existing file.
pub fn write_report(report: &Report, mode: RenderMode, dest: &Path) -> io::Result<()> {
    let mut json = render(report, mode)?;
    json.push('\n');
    fs::write(dest, json)
}
