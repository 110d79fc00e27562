//! InfluxDB Line Protocol Output
//!
//! Every record is a single line:
//!
//! ```text
//! measurement[,tag=value...] field=value[,field=value...]
//! ```
//!
//! # Formatting Rules
//!
//! - **Tags**: spaces in tag values are escaped as `\ `; nothing else is rewritten
//! - **Integers**: plain decimal without the `i` suffix
//! - **Floats**: fixed six decimal places
//!
//! # Sinks
//!
//! Collectors write through a [`LineSink`]. The binary uses [`StdoutSink`], which
//! emits each record with one locked write so concurrent collectors never produce
//! torn lines. [`MemorySink`] captures records for inspection.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// A single field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// Flags are written as 0/1 integers
impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v:.6}"),
        }
    }
}

/// Escape a tag value so it can not split the record
pub fn escape_tag_value(value: &str) -> String {
    value.replace(' ', "\\ ")
}

/// One line-protocol record
///
/// Tags and fields keep insertion order.
///
/// ```
/// use syncthing_stats::line_protocol::Line;
///
/// let line = Line::new("syncthing_folder")
///     .tag("folder_label", "My Photos")
///     .field("errors", 0i64);
/// assert_eq!(line.to_string(), "syncthing_folder,folder_label=My\\ Photos errors=0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    measurement: &'static str,
    tags: Vec<(&'static str, String)>,
    fields: Vec<(&'static str, FieldValue)>,
}

impl Line {
    pub fn new(measurement: &'static str) -> Self {
        Self {
            measurement,
            tags: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn tag(mut self, key: &'static str, value: &str) -> Self {
        self.tags.push((key, escape_tag_value(value)));
        self
    }

    pub fn field(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn measurement(&self) -> &str {
        self.measurement
    }

    /// Escaped tag value for `key`, if present
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field_value(&self, key: &str) -> Option<FieldValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.measurement)?;
        for (key, value) in &self.tags {
            write!(f, ",{key}={value}")?;
        }
        for (idx, (key, value)) in self.fields.iter().enumerate() {
            let sep = if idx == 0 { ' ' } else { ',' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Destination for finished records
pub trait LineSink: Send + Sync {
    fn write_line(&self, line: &Line) -> io::Result<()>;
}

/// Writes records to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&self, line: &Line) -> io::Result<()> {
        let text = format!("{line}\n");
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<Line>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record written so far, in write order
    pub fn lines(&self) -> Vec<Line> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records for one measurement
    pub fn measurement(&self, name: &str) -> Vec<Line> {
        self.lines()
            .into_iter()
            .filter(|line| line.measurement() == name)
            .collect()
    }

    /// All records rendered as text, one per line
    pub fn render(&self) -> String {
        self.lines()
            .iter()
            .map(|line| format!("{line}\n"))
            .collect()
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &Line) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.clone());
        Ok(())
    }
}
