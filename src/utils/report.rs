//! Console narration
//!
//! Probes describe what happened through a `Reporter`: each line is printed
//! to stdout as it is produced (when echoing) and kept for inspection.
//! Every line is mirrored to `tracing` at debug level.

use std::fmt;

use tracing::debug;

/// Line status, rendered as a leading symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Plain detail line
    Info,
    Pass,
    Warn,
    Fail,
    /// Section heading, preceded by a blank line
    Heading,
}

impl Status {
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Info | Status::Heading => "",
            Status::Pass => "✓ ",
            Status::Warn => "⚠ ",
            Status::Fail => "✗ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub status: Status,
    /// Nesting level, two spaces each
    pub indent: usize,
    pub text: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == Status::Heading {
            writeln!(f)?;
        }
        write!(f, "{:width$}{}{}", "", self.status.symbol(), self.text, width = self.indent * 2)
    }
}

#[derive(Debug, Default)]
pub struct Reporter {
    echo: bool,
    lines: Vec<ReportLine>,
}

impl Reporter {
    /// Print every line to stdout as it arrives
    pub fn stdout() -> Self {
        Self {
            echo: true,
            lines: Vec::new(),
        }
    }

    /// Keep lines in memory only
    pub fn buffered() -> Self {
        Self::default()
    }

    pub fn line(&mut self, status: Status, indent: usize, text: impl Into<String>) {
        let line = ReportLine {
            status,
            indent,
            text: text.into(),
        };
        debug!(status = ?line.status, "{}", line.text);
        if self.echo {
            println!("{}", line);
        }
        self.lines.push(line);
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.line(Status::Heading, 0, text);
    }

    pub fn info(&mut self, indent: usize, text: impl Into<String>) {
        self.line(Status::Info, indent, text);
    }

    pub fn pass(&mut self, indent: usize, text: impl Into<String>) {
        self.line(Status::Pass, indent, text);
    }

    pub fn warn(&mut self, indent: usize, text: impl Into<String>) {
        self.line(Status::Warn, indent, text);
    }

    pub fn fail(&mut self, indent: usize, text: impl Into<String>) {
        self.line(Status::Fail, indent, text);
    }

    /// Whether any line's text contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    /// Number of lines with the given status
    pub fn count(&self, status: Status) -> usize {
        self.lines.iter().filter(|l| l.status == status).count()
    }
}
