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

//! Rendering translation entries as a Bash associative array.

use crate::extract::TranslationEntry;

/// Variable name used for the generated pack unless told otherwise.
pub const DEFAULT_PACK_NAME: &str = "LANG_PACK_ZH_CN";

/// Escape `text` for use inside a double-quoted shell string.
///
/// Only `"` is escaped.
pub fn escape_shell(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Returns `true` if `name` can be used as a Bash variable name.
pub fn is_valid_pack_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render `entries` as a `declare -A` block named `pack_name`.
///
/// Entries are written in the given order. Without any entries, a
/// comment and an empty declaration are produced.
///
/// # Examples
///
/// ```
/// use pot_lang_pack::{generate_shell_lang_pack, TranslationEntry};
///
/// let entries = [TranslationEntry::new("Hello", "你好")];
/// assert_eq!(
///     generate_shell_lang_pack(&entries, "PACK"),
///     "declare -A PACK\n\
///      \n\
///      ## Initialize language pack\n\
///      PACK=(\n    [\"Hello\"]=\"你好\"\n)\n"
/// );
/// ```
pub fn generate_shell_lang_pack(entries: &[TranslationEntry], pack_name: &str) -> String {
    if entries.is_empty() {
        return format!(
            "# No valid translation entries found\ndeclare -A {pack_name}\n{pack_name}=()\n"
        );
    }

    let mut output = format!("declare -A {pack_name}\n\n");
    output.push_str("# Initialize language pack\n");
    output.push_str(&format!("{pack_name}=(\n"));
    for entry in entries {
        output.push_str(&format!(
            "    [\"{}\"]=\"{}\"\n",
            escape_shell(&entry.msgid),
            escape_shell(&entry.msgstr)
        ));
    }
    output.push_str(")\n");
    output
}
