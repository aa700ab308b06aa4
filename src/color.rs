use colored::Colorize;
use std::io::{self, Write};

/// Symbolic rendering styles resolved by the sink.
///
/// The renderer only ever speaks in these tags; mapping them to actual
/// terminal escape sequences is the sink's concern.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorTag {
    /// Bold pass color, used for the pass glyph and passing test names.
    NeutralBold,
    /// Bold failure color, used for failure/error glyphs and failing names.
    HighSeverityBold,
    /// Failure color, used for trace text and slow timings.
    HighSeverity,
    /// Warning color, used for borderline timings and skip glyphs.
    MediumSeverity,
    /// Calm color, used for fast timings.
    LowSeverity,
    /// Inverse block used by the exception banner.
    HighSeverityInverse,
}

/// Line-buffered colorized text output.
///
/// `write_colored` and `write_plain` append to the current line. Write
/// failures are returned to the caller, never swallowed: a broken sink means
/// the run's live feedback is lost and the operator must know.
pub trait ColorSink {
    fn write_colored(&mut self, tag: ColorTag, text: &str) -> io::Result<()>;
    fn write_plain(&mut self, text: &str) -> io::Result<()>;
    fn write_newline(&mut self) -> io::Result<()>;
}

/// Terminal sink mapping [`ColorTag`]s to ANSI styling with `colored`.
pub struct AnsiSink<W: Write> {
    target: W,
}

impl AnsiSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            target: io::stdout(),
        }
    }
}

impl<W: Write> AnsiSink<W> {
    pub fn new(target: W) -> Self {
        Self { target }
    }
}

impl<W: Write> ColorSink for AnsiSink<W> {
    fn write_colored(&mut self, tag: ColorTag, text: &str) -> io::Result<()> {
        let styled = match tag {
            ColorTag::NeutralBold => text.green().bold(),
            ColorTag::HighSeverityBold => text.red().bold(),
            ColorTag::HighSeverity => text.red(),
            ColorTag::MediumSeverity => text.yellow(),
            ColorTag::LowSeverity => text.green(),
            ColorTag::HighSeverityInverse => text.white().on_red(),
        };
        write!(self.target, "{}", styled)
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        write!(self.target, "{}", text)
    }

    fn write_newline(&mut self) -> io::Result<()> {
        writeln!(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sink_writes_text_to_target() {
        let mut sink = AnsiSink::new(Vec::new());

        sink.write_colored(ColorTag::NeutralBold, "passed").unwrap();
        sink.write_plain(" in ").unwrap();
        sink.write_newline().unwrap();

        let written = String::from_utf8(sink.target).unwrap();
        assert!(written.contains("passed"));
        assert!(written.contains(" in "));
        assert!(written.ends_with('\n'));
    }
}
