//! Post model

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::{FrontMatter, FrontMatterError, Metadata};

/// A blog post as read from disk
///
/// Serializes as `{ "content", "data", "filePath" }`, the shape page
/// renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Raw markdown body, after the front-matter block
    pub content: String,

    /// Front-matter fields
    #[serde(rename = "data")]
    pub metadata: Metadata,

    /// File name relative to the posts directory
    #[serde(rename = "filePath")]
    pub file_path: String,
}

impl PostRecord {
    /// Build a post from the raw text of `file_path`
    pub fn from_source(file_path: impl Into<String>, source: &str) -> Result<Self, FrontMatterError> {
        let (fm, body) = FrontMatter::parse(source)?;
        Ok(Self {
            content: body.to_string(),
            metadata: fm.data,
            file_path: file_path.into(),
        })
    }

    /// The `date` field, when present as a string
    pub fn date(&self) -> Option<&str> {
        self.metadata.get("date").and_then(Value::as_str)
    }

    /// The `date` field as a sort key, when it is a string or a number
    pub fn date_key(&self) -> Option<DateKey<'_>> {
        match self.metadata.get("date")? {
            Value::String(s) => Some(DateKey::Text(s)),
            Value::Number(n) => n.as_f64().map(DateKey::Number),
            _ => None,
        }
    }

    /// The `title` field, when present as a string
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// Reassemble the source document
    pub fn to_source(&self) -> Result<String, FrontMatterError> {
        super::stringify(&self.metadata, &self.content)
    }
}

/// A post date as written in front matter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateKey<'a> {
    Text(&'a str),
    Number(f64),
}

impl DateKey<'_> {
    /// Loose `<`: strings compare by code unit, numbers numerically, and a
    /// string compared with a number is read as a decimal number first.
    /// Anything unreadable is never before anything.
    pub fn is_before(self, other: DateKey<'_>) -> bool {
        match (self, other) {
            (DateKey::Text(a), DateKey::Text(b)) => less_by_code_unit(a, b),
            (DateKey::Number(a), DateKey::Number(b)) => a < b,
            (DateKey::Text(a), DateKey::Number(b)) => text_to_number(a) < b,
            (DateKey::Number(a), DateKey::Text(b)) => a < text_to_number(b),
        }
    }
}

/// Strings ordered by UTF-16 code unit
fn less_by_code_unit(a: &str, b: &str) -> bool {
    a.encode_utf16().lt(b.encode_utf16())
}

/// Blank text reads as zero; anything but a decimal literal or `Infinity`
/// reads as NaN.
fn text_to_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            text.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}
