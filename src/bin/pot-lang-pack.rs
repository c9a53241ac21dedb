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

//! Convert a POT file into a shell language pack.
//!
//! This program reads the translated `msgid`/`msgstr` pairs of a POT
//! (or PO) file and prints a Bash associative array holding them. Run
//! it after updating the translations and paste the result into the
//! script which needs the messages.
//!
//! Progress is logged to stderr, so the generated code can be
//! redirected from stdout. Set `RUST_LOG=warn` to silence it.

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::{Parser as _, ValueEnum};
use pot_lang_pack::format::is_valid_pack_name;
use pot_lang_pack::{generate_shell_lang_pack, Parser, DEFAULT_PACK_NAME};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Convert a .pot file into a shell script language pack.
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
struct Args {
    /// Path to the .pot file.
    #[arg(value_name = "POT_FILE")]
    pot_file: PathBuf,
    /// Name of the generated shell variable.
    #[arg(short, long, default_value = DEFAULT_PACK_NAME, value_parser = parse_pack_name)]
    name: String,
    /// File to write the language pack to. Prints to stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// How to read translations from the input file.
    #[arg(short, long, value_enum, default_value_t)]
    parser: ParserArg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum ParserArg {
    /// Match single-line `msgid`/`msgstr` pairs; ignore everything else.
    #[default]
    Regex,
    /// Parse the file as a full Gettext catalog with a complete header.
    Catalog,
}

impl From<ParserArg> for Parser {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Regex => Parser::Regex,
            ParserArg::Catalog => Parser::Catalog,
        }
    }
}

fn parse_pack_name(name: &str) -> Result<String, String> {
    if is_valid_pack_name(name) {
        Ok(String::from(name))
    } else {
        Err(format!("{name:?} is not a valid shell variable name"))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let args = Args::parse();
    if let Some(output) = generate(&args)? {
        info!("Output saved to: {}", output.display());
    }
    Ok(())
}

/// Read the input file and render it as a shell language pack.
fn render(args: &Args) -> anyhow::Result<String> {
    let pot_file = &args.pot_file;
    ensure!(pot_file.exists(), "File {} does not exist", pot_file.display());

    info!("Parsing file: {}", pot_file.display());
    let entries = Parser::from(args.parser)
        .parse(pot_file)
        .with_context(|| format!("Could not parse {}", pot_file.display()))?;
    if entries.is_empty() {
        warn!("No valid translation entries found");
    } else {
        info!("Found {} translation entries", entries.len());
    }

    Ok(generate_shell_lang_pack(&entries, &args.name))
}

/// Generate the language pack described by `args`.
///
/// Returns the path written to, or `None` if the pack was printed.
#[allow(clippy::print_stdout)]
fn generate(args: &Args) -> anyhow::Result<Option<&PathBuf>> {
    let shell_code = render(args)?;
    match &args.output {
        Some(output) => {
            fs::write(output, shell_code).with_context(|| {
                format!("Could not write language pack to {}", output.display())
            })?;
            Ok(Some(output))
        }
        None => {
            info!("Generated shell language pack:");
            print!("{shell_code}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const CATALOG_HEADER: &str = "msgid \"\"\n\
         msgstr \"\"\n\
         \"Project-Id-Version: demo 1.0\\n\"\n\
         \"POT-Creation-Date: 2024-01-01 00:00+0000\\n\"\n\
         \"PO-Revision-Date: 2024-01-02 00:00+0000\\n\"\n\
         \"Last-Translator: Translator <translator@example.com>\\n\"\n\
         \"Language-Team: Chinese\\n\"\n\
         \"Language: zh_CN\\n\"\n\
         \"MIME-Version: 1.0\\n\"\n\
         \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
         \"Content-Transfer-Encoding: 8bit\\n\"\n\
         \"Plural-Forms: nplurals=1; plural=0;\\n\"\n\
         \n";

    fn args(pot_file: &Path, output: &Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "pot-lang-pack".to_string(),
            pot_file.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|arg| arg.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["pot-lang-pack", "messages.pot"]).unwrap();
        assert_eq!(args.pot_file, PathBuf::from("messages.pot"));
        assert_eq!(args.name, DEFAULT_PACK_NAME);
        assert_eq!(args.output, None);
        assert_eq!(args.parser, ParserArg::Regex);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::try_parse_from([
            "pot-lang-pack",
            "messages.pot",
            "-n",
            "LANG_PACK_DE",
            "-o",
            "pack.sh",
            "-p",
            "catalog",
        ])
        .unwrap();
        assert_eq!(args.name, "LANG_PACK_DE");
        assert_eq!(args.output, Some(PathBuf::from("pack.sh")));
        assert_eq!(args.parser, ParserArg::Catalog);
    }

    #[test]
    fn test_args_rejects_invalid_name() {
        let result = Args::try_parse_from(["pot-lang-pack", "messages.pot", "--name", "not-valid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_requires_pot_file() {
        assert!(Args::try_parse_from(["pot-lang-pack"]).is_err());
    }

    #[test]
    fn test_generate_writes_output() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.pot");
        let output = tmpdir.path().join("pack.sh");
        fs::write(
            &pot_file,
            "msgid \"Hello\"\nmsgstr \"你好\"\n\nmsgid \"Bye\"\nmsgstr \"\"\n",
        )?;

        let args = args(&pot_file, &output, &[]);
        assert_eq!(generate(&args)?, Some(&output));
        assert_eq!(
            fs::read_to_string(&output)?,
            "declare -A LANG_PACK_ZH_CN\n\
             \n\
             # Initialize language pack\n\
             LANG_PACK_ZH_CN=(\n\
             \x20   [\"Hello\"]=\"你好\"\n\
             )\n"
        );
        Ok(())
    }

    #[test]
    fn test_generate_empty_pack_succeeds() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.pot");
        let output = tmpdir.path().join("pack.sh");
        fs::write(&pot_file, "# Only a comment\n")?;

        let args = args(&pot_file, &output, &["--name", "EMPTY"]);
        generate(&args)?;
        assert_eq!(
            fs::read_to_string(&output)?,
            "# No valid translation entries found\ndeclare -A EMPTY\nEMPTY=()\n"
        );
        Ok(())
    }

    #[test]
    fn test_generate_missing_input() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("missing.pot");
        let output = tmpdir.path().join("pack.sh");

        let args = args(&pot_file, &output, &[]);
        assert!(generate(&args).is_err());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_generate_unwritable_output() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.pot");
        let output = tmpdir.path().join("no-such-dir").join("pack.sh");
        fs::write(&pot_file, "msgid \"Hello\"\nmsgstr \"你好\"\n")?;

        let args = args(&pot_file, &output, &[]);
        assert!(generate(&args).is_err());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_generate_unreadable_input() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.pot");
        let output = tmpdir.path().join("pack.sh");
        fs::write(&pot_file, b"msgid \"\xff\xfe\"\nmsgstr \"x\"\n")?;

        let args = args(&pot_file, &output, &[]);
        assert!(generate(&args).is_err());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_generate_prints_without_output() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.pot");
        fs::write(&pot_file, "msgid \"Hello\"\nmsgstr \"你好\"\n")?;

        let args = Args::try_parse_from([
            "pot-lang-pack".to_string(),
            pot_file.display().to_string(),
            "-n".to_string(),
            "PACK".to_string(),
        ])?;
        assert_eq!(
            render(&args)?,
            "declare -A PACK\n\
             \n\
             # Initialize language pack\n\
             PACK=(\n\
             \x20   [\"Hello\"]=\"你好\"\n\
             )\n"
        );
        assert_eq!(generate(&args)?, None);
        Ok(())
    }

    #[test]
    fn test_generate_with_catalog_parser() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.po");
        let output = tmpdir.path().join("pack.sh");
        fs::write(
            &pot_file,
            format!("{CATALOG_HEADER}msgid \"Hello\"\nmsgstr \"\"\n\"你好\"\n"),
        )?;

        let args = args(&pot_file, &output, &["--parser", "catalog"]);
        generate(&args)?;
        assert!(fs::read_to_string(&output)?.contains("    [\"Hello\"]=\"你好\"\n"));
        Ok(())
    }

    #[test]
    fn test_generate_catalog_with_partial_header() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let pot_file = tmpdir.path().join("messages.po");
        let output = tmpdir.path().join("pack.sh");
        fs::write(
            &pot_file,
            "msgid \"\"\n\
             msgstr \"\"\n\
             \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
             \n\
             msgid \"Hello\"\n\
             msgstr \"你好\"\n",
        )?;

        let args = args(&pot_file, &output, &["--parser", "catalog"]);
        assert!(generate(&args).is_err());
        assert!(!output.exists());
        Ok(())
    }
}
