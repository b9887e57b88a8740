// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Console report printer
//!
//! All report text goes through a `Printer` so the same sections can be
//! written to stdout or captured in tests. Styling comes from `colored` and
//! is switched off globally by `configure_color(true)`.

use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Heading underline width
pub const RULE_WIDTH: usize = 60;

/// Diagnostics go to stderr through `log`; `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Force plain output. `colored` already drops styling when stdout is not
/// a terminal or `NO_COLOR` is set.
pub fn configure_color(no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Miss,
    Warn,
}

impl Status {
    pub fn marker(&self) -> ColoredString {
        match self {
            Status::Ok => "[OK]".green(),
            Status::Miss => "[MISS]".red(),
            Status::Warn => "[WARN]".yellow(),
        }
    }

    /// `[OK]` when the item was seen at least once
    pub fn found(count: usize) -> Self {
        if count > 0 {
            Status::Ok
        } else {
            Status::Miss
        }
    }
}

/// Traffic-light band for a form coverage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    High,
    Partial,
    Low,
}

impl CoverageBand {
    pub fn of(coverage: f64) -> Self {
        if coverage > 50.0 {
            CoverageBand::High
        } else if coverage > 20.0 {
            CoverageBand::Partial
        } else {
            CoverageBand::Low
        }
    }

    pub fn symbol(&self) -> ColoredString {
        match self {
            CoverageBand::High => "●".green(),
            CoverageBand::Partial => "●".yellow(),
            CoverageBand::Low => "●".red(),
        }
    }
}

pub struct Printer<W: Write> {
    out: W,
}

impl Printer<io::Stdout> {
    pub fn stdout() -> Self {
        Printer { out: io::stdout() }
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Printer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Title line followed by a rule of `=`
    pub fn title(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.bold().cyan())?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    /// Section heading preceded by a blank line
    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", format!("🔍 {text}").bold().blue())?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    pub fn subheading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", text.bold().magenta())
    }

    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.cyan())
    }

    /// Indented dashed rule
    pub fn rule(&mut self, width: usize) -> io::Result<()> {
        writeln!(self.out, "   {}", "-".repeat(width))
    }

    pub fn status(&mut self, status: Status, text: &str) -> io::Result<()> {
        writeln!(self.out, "{} {text}", status.marker())
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Write for Printer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn render(f: impl FnOnce(&mut Printer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut printer = Printer::new(Vec::new());
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    #[serial]
    fn test_plain_heading_and_markers() {
        configure_color(true);
        let text = render(|p| {
            p.heading("TAG ANALYSIS")?;
            p.status(Status::Miss, "No tags found in questions")
        });
        assert_eq!(
            text,
            format!("\n🔍 TAG ANALYSIS\n{}\n[MISS] No tags found in questions\n", "=".repeat(60))
        );
        colored::control::unset_override();
    }

    #[test]
    #[serial]
    fn test_colored_marker_has_escape_codes() {
        colored::control::set_override(true);
        let text = render(|p| p.status(Status::Ok, "loaded"));
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("[OK]"));
        colored::control::unset_override();
    }

    #[test]
    fn test_coverage_bands() {
        assert_eq!(CoverageBand::of(50.1), CoverageBand::High);
        assert_eq!(CoverageBand::of(50.0), CoverageBand::Partial);
        assert_eq!(CoverageBand::of(20.0), CoverageBand::Low);
        assert_eq!(Status::found(0), Status::Miss);
    }
}
