//! Property-file parser for gateway responses.
//!
//! Gateway responses are flat `KEY=VALUE` text with the classic
//! property-file syntax:
//!
//! - lines end with `\n`, `\r` or `\r\n`
//! - lines whose first non-blank character is `#` or `!` are comments
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line,
//!   whose leading whitespace is dropped
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded, and any other
//!   escaped character stands for itself
//! - consecutive `\uXXXX` escapes are read as UTF-16, so a surrogate pair
//!   yields one character and an unpaired surrogate yields U+FFFD
//!
//! When a key appears more than once the last value wins.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Errors raised while parsing property text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertiesError {
    /// A `\u` escape was not followed by four hexadecimal digits.
    #[error("malformed \\uXXXX encoding on line {line}")]
    MalformedUnicodeEscape {
        /// One-based line number of the logical line.
        line: usize,
    },
}

/// A decoded set of response fields, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: BTreeMap<String, String>,
}

impl PropertyMap {
    /// Parses property text.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError`] if an escape sequence is malformed.
    pub fn parse(text: &str) -> Result<Self, PropertiesError> {
        let mut entries = BTreeMap::new();
        for (line, logical) in logical_lines(text) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key, line)?;
            let value = unescape(value, line)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value stored under `key`, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Returns `true` if `key` is present, even with an empty value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no field was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for PropertyMap {
    type Err = PropertiesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyMap {
    /// Renders one `KEY=VALUE` line per field, sorted by key, without escaping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Appends one escaped `key=value` line to `out`, so that
/// [`PropertyMap::parse`] reads back exactly `key` and `value`.
pub fn write_entry(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    escape_into(out, key, true);
    out.push('=');
    escape_into(out, value, false);
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn natural_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                let line = &rest[..pos];
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn trailing_backslashes(line: &str) -> usize {
    line.chars().rev().take_while(|&c| c == '\\').count()
}

/// Joins continuation lines and drops blanks and comments. Yields the
/// one-based number of the first natural line of each logical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in natural_lines(text).enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);
        let mut current = match pending.take() {
            Some(partial) => partial,
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        if trailing_backslashes(trimmed) % 2 == 1 {
            current.1.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some(current);
        } else {
            current.1.push_str(trimmed);
            out.push(current);
        }
    }

    if let Some(partial) = pending {
        out.push(partial);
    }
    out
}

/// Splits a logical line into its still-escaped key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                separator = Some(c);
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if separator.is_some() {
        rest = &rest[1..];
    } else {
        rest = rest.trim_start_matches(is_blank);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }
    (key, rest.trim_start_matches(is_blank))
}

fn unescape(text: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    // `\uXXXX` escapes are UTF-16 code units; a character above U+FFFF spans two.
    let mut units: Vec<u16> = Vec::new();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out);
            out.push(c);
            continue;
        }
        let escaped = chars.next();
        if escaped != Some('u') {
            flush_units(&mut units, &mut out);
        }
        match escaped {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                if digits.len() != 4 || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
                    return Err(PropertiesError::MalformedUnicodeEscape { line });
                }
                let unit = u16::from_str_radix(&digits, 16)
                    .map_err(|_| PropertiesError::MalformedUnicodeEscape { line })?;
                units.push(unit);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

/// Decodes pending code units; an unpaired surrogate becomes U+FFFD.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
