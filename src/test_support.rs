use crate::color::{ColorSink, ColorTag};
use std::io;

/// One recorded sink write.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SinkOp {
    Colored(ColorTag, String),
    Plain(String),
    NewLine,
}

/// Sink double that records every write for assertion.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Flattens the recorded writes into plain text.
    pub(crate) fn transcript(&self) -> String {
        let mut text = String::new();
        for op in &self.ops {
            match op {
                SinkOp::Colored(_, s) | SinkOp::Plain(s) => text.push_str(s),
                SinkOp::NewLine => text.push('\n'),
            }
        }
        text
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.transcript().lines().map(str::to_string).collect()
    }

    pub(crate) fn colored_ops(&self) -> Vec<(ColorTag, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::Colored(tag, s) => Some((*tag, s.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl ColorSink for RecordingSink {
    fn write_colored(&mut self, tag: ColorTag, text: &str) -> io::Result<()> {
        self.ops.push(SinkOp::Colored(tag, text.to_string()));
        Ok(())
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(SinkOp::Plain(text.to_string()));
        Ok(())
    }

    fn write_newline(&mut self) -> io::Result<()> {
        self.ops.push(SinkOp::NewLine);
        Ok(())
    }
}
