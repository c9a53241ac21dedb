// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reading `msgid`/`msgstr` pairs out of PO and POT files.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use polib::po_file;
use regex::Regex;

use crate::error::{Error, Result};

/// A single translated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// The source text, used as the lookup key.
    pub msgid: String,
    /// The translated text.
    pub msgstr: String,
}

impl TranslationEntry {
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgstr: msgstr.into(),
        }
    }
}

/// How translations are read from the input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parser {
    /// Single-line `msgid "..." msgstr "..."` pairs matched with a
    /// regular expression. Everything else in the file is ignored.
    #[default]
    Regex,
    /// A full Gettext catalog parse. Understands strings continued
    /// over several lines but rejects malformed files.
    Catalog,
}

impl Parser {
    /// Read the translated entries from `path`.
    pub fn parse(self, path: &Path) -> Result<Vec<TranslationEntry>> {
        match self {
            Parser::Regex => parse_pot_file(path),
            Parser::Catalog => parse_catalog_file(path),
        }
    }
}

/// Undo the quote and backslash escapes of a PO string.
///
/// Only `\"` and `\\` are recognized. Other sequences such as `\n`
/// are kept as-is so the shell sees them unchanged.
pub fn unescape(text: &str) -> String {
    text.replace("\\\"", "\"").replace("\\\\", "\\")
}

/// Extract all translated entries from the text of a PO or POT file.
///
/// Entries with a blank `msgstr` are dropped. The remaining entries
/// are returned in file order, duplicates included.
///
/// # Examples
///
/// ```
/// use pot_lang_pack::{extract_entries, TranslationEntry};
///
/// let content = "msgid \"Hello\"\nmsgstr \"你好\"\n\nmsgid \"Bye\"\nmsgstr \"\"\n";
/// assert_eq!(
///     extract_entries(content),
///     vec![TranslationEntry::new("Hello", "你好")]
/// );
/// ```
pub fn extract_entries(content: &str) -> Vec<TranslationEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        let pattern = r#"(?s)msgid\s+"([^"]*(?:\\.[^"]*)*)"\s*msgstr\s+"([^"]*(?:\\.[^"]*)*)""#;
        Regex::new(pattern).expect("well-formed regex")
    });

    re.captures_iter(content)
        .map(|captures| TranslationEntry::new(unescape(&captures[1]), unescape(&captures[2])))
        .filter(|entry| !entry.msgstr.trim().is_empty())
        .collect()
}

/// Read `path` and extract its translated entries.
///
/// A missing file is reported as [`Error::NotFound`], any other I/O or
/// decoding problem as [`Error::Read`].
pub fn parse_pot_file(path: &Path) -> Result<Vec<TranslationEntry>> {
    let content = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    Ok(extract_entries(&content))
}

/// Header fields the catalog parser requires.
const REQUIRED_HEADER_FIELDS: &[&str] = &[
    "Project-Id-Version",
    "POT-Creation-Date",
    "PO-Revision-Date",
    "Language-Team",
    "MIME-Version",
    "Content-Type",
    "Content-Transfer-Encoding",
    "Language",
    "Plural-Forms",
];

/// Returns the required header fields missing from the catalog header
/// in `content`. Without a header, every field is missing.
fn missing_header_fields(content: &str) -> Vec<&'static str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        let pattern = r#"(?m)^msgid\s+""\s*\n\s*msgstr\s+""[ \t]*\n((?:[ \t]*"[^\n]*"[ \t]*(?:\n|$))*)"#;
        Regex::new(pattern).expect("well-formed regex")
    });

    let header = re
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map_or("", |header| header.as_str());
    REQUIRED_HEADER_FIELDS
        .iter()
        .copied()
        .filter(|field| !header.contains(&format!("\"{field}:")))
        .collect()
}

/// Read `path` as a Gettext catalog and return its translated entries.
///
/// The file needs a header with the standard fields, from
/// `Project-Id-Version` through `Plural-Forms`; otherwise
/// [`Error::Catalog`] lists the missing ones.
/// Plural messages are skipped. Messages sharing a `msgid` are merged
/// by the catalog, so only one entry survives per key.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<TranslationEntry>> {
    let content = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    let missing = missing_header_fields(&content);
    if !missing.is_empty() {
        return Err(Error::Catalog {
            path: path.to_path_buf(),
            message: format!("header is missing {}", missing.join(", ")),
        });
    }

    let catalog = po_file::parse(path).map_err(|err| Error::Catalog {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut entries = Vec::new();
    for message in catalog.messages() {
        if message.is_plural() {
            continue;
        }
        let Ok(msgstr) = message.msgstr() else {
            continue;
        };
        if msgstr.trim().is_empty() {
            continue;
        }
        entries.push(TranslationEntry::new(message.msgid(), msgstr));
    }
    Ok(entries)
}

fn read_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Read {
            path: path.to_path_buf(),
            source: err,
        },
    }
}
