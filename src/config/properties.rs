//! In-memory and file-backed properties
//!
//! Files use the `.properties` format build tools share: `key=value` or
//! `key: value` per line, `#` and `!` start comments, and an odd number of
//! trailing `\` continues the value on the next line. A backslash escapes the
//! next character (`\=`, `\:`, `\ `, `\\`); `\t`, `\n`, `\r`, `\f` and
//! `\uXXXX` decode as usual.

use crate::config::PropertySource;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// An ordered set of properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Properties::set`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Define `key`, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of defined keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are defined
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `.properties` text
    ///
    /// Later definitions of the same key replace earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut props = Self::new();
        let mut logical = String::new();
        let mut continuing = false;

        for raw in text.lines() {
            let line = raw.trim_start();
            if !continuing && (line.is_empty() || line.starts_with(['#', '!'])) {
                continue;
            }

            continuing = ends_with_continuation(line);
            if continuing {
                logical.push_str(&line[..line.len() - 1]);
                continue;
            }

            logical.push_str(line);
            props.insert_entry(&logical);
            logical.clear();
        }

        // Continuation on the final line
        if continuing {
            props.insert_entry(&logical);
        }

        props
    }

    fn insert_entry(&mut self, line: &str) {
        if let Some((key, value)) = split_entry(line) {
            self.set(key, value);
        }
    }

    /// Load a `.properties` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::PropertiesFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }
}

/// An odd run of trailing backslashes; `\\` alone is an escaped backslash
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=` or `:`; a bare key gets
/// an empty value
fn split_entry(line: &str) -> Option<(String, String)> {
    let mut sep = None;
    let mut chars = line.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                sep = Some(idx);
                break;
            }
            _ => {}
        }
    }

    let (key, value) = match sep {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, ""),
    };

    let key = unescape(key.trim_start());
    if key.is_empty() {
        return None;
    }
    Some((key, unescape(value.trim_start())))
}

/// Resolve escapes and drop unescaped trailing whitespace
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut keep = 0;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            if !c.is_whitespace() {
                keep = out.len();
            }
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    // Malformed escapes stay literal
                    _ => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
        keep = out.len();
    }

    out.truncate(keep);
    out
}

impl PropertySource for Properties {
    fn property(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
