use std::io::Write;

use chrono::Utc;
use color_print::cformat;
use crossterm::style::{style, Stylize};
use eyre::Result;
use regex::Regex;
use serde::Serialize;

use super::config::OutputMode;
use crate::dialogue::ResponseDescriptor;

/// Who a rendered message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    /// Front-end notices such as help and status output
    System,
}

/// A piece of message body after markup parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Bold(&'a str),
    LineBreak,
}

/// Splits a body into text, `**bold**` spans, and line breaks.
///
/// Unpaired `**` and single `*` stay literal.
pub fn parse_markup(body: &str) -> Vec<Segment<'_>> {
    let bold = Regex::new(r"\*\*(.*?)\*\*").ok();
    let mut segments = Vec::new();

    for (index, line) in body.split('\n').enumerate() {
        if index > 0 {
            segments.push(Segment::LineBreak);
        }

        let mut last_end = 0;
        if let Some(re) = &bold {
            for captures in re.captures_iter(line) {
                let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                if whole.start() > last_end {
                    segments.push(Segment::Text(&line[last_end..whole.start()]));
                }
                segments.push(Segment::Bold(inner.as_str()));
                last_end = whole.end();
            }
        }
        if last_end < line.len() {
            segments.push(Segment::Text(&line[last_end..]));
        }
    }

    segments
}

#[derive(Serialize)]
struct MessageRecord<'a> {
    sender: Sender,
    body: &'a str,
    quick_replies: &'a [String],
    timestamp: String,
}

/// Writes messages to the terminal in the configured form.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn render_message(
        &self,
        output: &mut dyn Write,
        descriptor: &ResponseDescriptor,
        sender: Sender,
    ) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                let record = MessageRecord {
                    sender,
                    body: &descriptor.body,
                    quick_replies: &descriptor.quick_replies,
                    timestamp: Utc::now().to_rfc3339(),
                };
                writeln!(output, "{}", serde_json::to_string(&record)?)?;
            }
            OutputMode::Styled | OutputMode::Plain => {
                match sender {
                    Sender::User => writeln!(output, "> {}", descriptor.body)?,
                    Sender::System => writeln!(output, "{}", descriptor.body)?,
                    Sender::Bot => {
                        self.write_body(output, &descriptor.body)?;
                        self.write_quick_replies(output, &descriptor.quick_replies)?;
                    }
                }
            }
        }
        output.flush()?;
        Ok(())
    }

    fn write_body(&self, output: &mut dyn Write, body: &str) -> Result<()> {
        writeln!(output)?;
        for segment in parse_markup(body) {
            match segment {
                Segment::Text(text) => write!(output, "{}", text)?,
                Segment::Bold(text) if self.mode == OutputMode::Styled => {
                    write!(output, "{}", style(text).bold())?
                }
                Segment::Bold(text) => write!(output, "{}", text)?,
                Segment::LineBreak => writeln!(output)?,
            }
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_quick_replies(&self, output: &mut dyn Write, quick_replies: &[String]) -> Result<()> {
        if quick_replies.is_empty() {
            return Ok(());
        }
        writeln!(output)?;
        for (index, label) in quick_replies.iter().enumerate() {
            let chip = if self.mode == OutputMode::Styled {
                cformat!("  <cyan>[{}]</> {}", index + 1, label)
            } else {
                format!("  [{}] {}", index + 1, label)
            };
            writeln!(output, "{}", chip)?;
        }
        Ok(())
    }
}
