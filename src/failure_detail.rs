use crate::color::{ColorSink, ColorTag};
use regex::Regex;
use similar::{ChangeTag, TextDiff};
use std::fmt;
use std::io;
use std::sync::OnceLock;

/// What kind of payload a [`FailureDetail`] carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DetailKind {
    /// Assertion-style failure text produced by the test itself.
    Failure,
    /// An exception distinct from a test assertion failure.
    Error,
}

/// Expected/actual pair attached to an assertion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    expected: String,
    actual: String,
}

impl Comparison {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }
}

/// Captured description of a failed or errored test.
///
/// The summary holds the headline text (for errors typically
/// `"ExceptionClass: message"`, possibly followed by chained-exception
/// lines); frames hold the stack trace, one line each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    kind: DetailKind,
    summary: String,
    frames: Vec<String>,
    comparison: Option<Comparison>,
}

fn frame_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#\d+ |\s+at |\{main\}$)").unwrap())
}

impl FailureDetail {
    pub fn failure(summary: impl Into<String>) -> Self {
        Self {
            kind: DetailKind::Failure,
            summary: summary.into(),
            frames: vec![],
            comparison: None,
        }
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            kind: DetailKind::Error,
            summary: summary.into(),
            frames: vec![],
            comparison: None,
        }
    }

    pub fn with_frames(mut self, frames: Vec<String>) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Splits an unavoidably textual exception dump into summary and frames.
    ///
    /// Leading lines up to the first frame-shaped line form the summary;
    /// everything from there on is kept as frames. Frame detection is a
    /// heuristic over common trace shapes (`#0 …`, `    at …`, `{main}`).
    pub fn from_text(kind: DetailKind, text: &str) -> Self {
        let mut summary = Vec::new();
        let mut frames: Vec<String> = Vec::new();

        for line in text.lines() {
            if !frames.is_empty() || frame_regex().is_match(line) {
                frames.push(line.to_string());
            } else {
                summary.push(line.to_string());
            }
        }

        Self {
            kind,
            summary: summary.join("\n"),
            frames,
            comparison: None,
        }
    }

    pub fn kind(&self) -> DetailKind {
        self.kind
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        self.comparison.as_ref()
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        for frame in &self.frames {
            write!(f, "\n{}", frame)?;
        }
        Ok(())
    }
}

struct Gutter(Option<usize>);

impl fmt::Display for Gutter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => write!(f, "    "),
            Some(idx) => write!(f, "{:<4}", idx + 1),
        }
    }
}

/// Writes an expected/actual line diff with old/new line-number gutters.
pub(crate) fn write_comparison<S: ColorSink>(
    sink: &mut S,
    comparison: &Comparison,
) -> io::Result<()> {
    let diff = TextDiff::from_lines(comparison.expected(), comparison.actual());

    for change in diff.iter_all_changes() {
        let (sign, tag) = match change.tag() {
            ChangeTag::Delete => ("-", Some(ColorTag::HighSeverity)),
            ChangeTag::Insert => ("+", Some(ColorTag::LowSeverity)),
            ChangeTag::Equal => (" ", None),
        };

        sink.write_plain(&format!(
            "{} {} |",
            Gutter(change.old_index()),
            Gutter(change.new_index())
        ))?;

        let line = format!("{}{}", sign, change.value().trim_end_matches('\n'));
        match tag {
            Some(tag) => sink.write_colored(tag, &line)?,
            None => sink.write_plain(&line)?,
        }
        sink.write_newline()?;
    }

    Ok(())
}
