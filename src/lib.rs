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

//! Helpers for embedding Gettext translations in shell scripts.
//!
//! The functions here turn the `msgid`/`msgstr` pairs of a PO or POT
//! file into a Bash associative array. The generated block is meant
//! to be pasted into a script which then looks up messages at
//! runtime:
//!
//! ```text
//! declare -A LANG_PACK_ZH_CN
//!
//! # Initialize language pack
//! LANG_PACK_ZH_CN=(
//!     ["Hello"]="你好"
//! )
//! ```
//!
//! Extraction lives in [`extract`], rendering in [`format`].

pub mod error;
pub mod extract;
pub mod format;

pub use error::{Error, Result};
pub use extract::{
    extract_entries, parse_catalog_file, parse_pot_file, Parser, TranslationEntry,
};
pub use format::{generate_shell_lang_pack, DEFAULT_PACK_NAME};
