//! Front-matter parsing
//!
//! A document carries front matter when its first line is `---`, optionally
//! followed by a language tag (`yaml`, `yml` or `json`). The block runs until
//! the next line that is exactly `---`. Everything after that line, minus one
//! leading line break, is the body.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde_yaml::Value;
use std::fmt;
use thiserror::Error;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// Front-matter key/value pairs, in declaration order
pub type Metadata = IndexMap<String, Value>;

/// Errors raised while splitting or parsing a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("unclosed front-matter block, missing closing ---")]
    Unclosed,

    #[error("unsupported front-matter language: {0}")]
    UnsupportedLanguage(String),

    #[error("invalid YAML front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Yaml,
    Json,
}

impl Language {
    fn from_tag(tag: &str) -> Result<Self, FrontMatterError> {
        match tag {
            "" | "yaml" | "yml" => Ok(Language::Yaml),
            "json" => Ok(Language::Json),
            other => Err(FrontMatterError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Front-matter data from a post or project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub data: Metadata,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix(BOM).unwrap_or(content);

        let Some(after_open) = content.strip_prefix(DELIMITER) else {
            return Ok((FrontMatter::default(), content));
        };

        // `----` and longer rules are markdown, not a delimiter
        if after_open.starts_with('-') {
            return Ok((FrontMatter::default(), content));
        }

        let (tag, block) = match after_open.find('\n') {
            Some(pos) => (&after_open[..pos], &after_open[pos + 1..]),
            None => (after_open, ""),
        };
        let language = Language::from_tag(tag.trim())?;

        let (matter, rest) = split_closing(block).ok_or(FrontMatterError::Unclosed)?;
        let body = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);

        let data = match language {
            Language::Yaml => parse_yaml(matter)?,
            Language::Json => parse_json(matter)?,
        };

        Ok((FrontMatter { data }, body))
    }

    /// Get a raw front-matter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The `date` field, when it is a string
    pub fn date(&self) -> Option<&str> {
        self.get("date").and_then(Value::as_str)
    }

    /// Render this front-matter and `body` back into a source document.
    ///
    /// An empty mapping produces the body alone.
    pub fn stringify(&self, body: &str) -> Result<String, FrontMatterError> {
        stringify(&self.data, body)
    }
}

/// Render `data` as a YAML front-matter block followed by `body`
pub fn stringify(data: &Metadata, body: &str) -> Result<String, FrontMatterError> {
    if data.is_empty() {
        return Ok(body.to_string());
    }

    let yaml = serde_yaml::to_string(data)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

/// Find the closing delimiter line.
/// Returns (front-matter text, text after the delimiter)
fn split_closing(block: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            let rest = &block[offset + DELIMITER.len()..];
            return Some((&block[..offset], rest));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(matter: &str) -> Result<Metadata, FrontMatterError> {
    if matter.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_yaml::from_str::<Value>(matter)? {
        Value::Null => Ok(Metadata::new()),
        Value::Mapping(mapping) => {
            let mut data = Metadata::with_capacity(mapping.len());
            for (key, value) in mapping {
                data.insert(key_to_string(key)?, value);
            }
            Ok(data)
        }
        _ => Err(FrontMatterError::NotAMapping),
    }
}

fn parse_json(matter: &str) -> Result<Metadata, FrontMatterError> {
    if matter.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_json::from_str::<serde_json::Value>(matter)? {
        serde_json::Value::Null => Ok(Metadata::new()),
        serde_json::Value::Object(object) => {
            let mut data = Metadata::with_capacity(object.len());
            for (key, value) in object {
                data.insert(key, serde_yaml::to_value(value)?);
            }
            Ok(data)
        }
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Scalar keys such as `2024: ...` become their textual form
fn key_to_string(key: Value) -> Result<String, FrontMatterError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Custom deserializer that handles both a single string and a list of strings
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
