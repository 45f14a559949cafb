//! Dead key mask command.
//!
//! Reads a QMK info.json from standard input and prints the per-row dead key
//! masks for one of its layouts.

use crate::cli::common::{CliError, CliResult};
use crate::constants::DEFAULT_DEFINE_NAME;
use crate::models::DeadKeyMasks;
use crate::services::DeadKeyService;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{Read, Write};

/// Output rendering for the computed masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated hex values, e.g. `0x2, 0x1`
    #[default]
    List,
    /// C preprocessor definition for beam_config.h
    Define,
    /// JSON object with layout, dimensions and masks
    Json,
}

/// Compute dead key bitmasks from a QMK info.json read on stdin
#[derive(Debug, Clone, Args)]
pub struct DeadKeysArgs {
    /// Layout to use (defaults to the first layout name in sorted order)
    #[arg(short, long, value_name = "NAME")]
    pub layout: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,

    /// Macro name used with `--format define`
    #[arg(long, value_name = "IDENT", default_value = DEFAULT_DEFINE_NAME)]
    pub define_name: String,
}

impl Default for DeadKeysArgs {
    fn default() -> Self {
        Self {
            layout: None,
            format: OutputFormat::List,
            define_name: DEFAULT_DEFINE_NAME.to_string(),
        }
    }
}

/// JSON response for `--format json`
#[derive(Debug, Clone, Serialize)]
struct DeadKeysResponse {
    /// Selected layout name
    layout: String,
    /// Number of matrix rows
    matrix_rows: usize,
    /// Number of matrix columns
    matrix_cols: usize,
    /// One mask per row
    dead_keys: Vec<u64>,
    /// Masks as 0x-prefixed hex strings
    dead_keys_hex: Vec<String>,
    /// Total dead positions
    dead_key_count: u32,
}

impl From<&DeadKeyMasks> for DeadKeysResponse {
    fn from(masks: &DeadKeyMasks) -> Self {
        Self {
            layout: masks.layout_name.clone(),
            matrix_rows: masks.matrix_rows,
            matrix_cols: masks.matrix_cols,
            dead_keys: masks.masks.clone(),
            dead_keys_hex: masks.hex_values(),
            dead_key_count: masks.dead_key_count(),
        }
    }
}

impl DeadKeysArgs {
    /// Execute the command against the process's stdin and stdout
    pub fn execute(&self) -> CliResult<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    /// Reads the whole of `input`, computes the masks and writes them to `output`.
    pub fn run<R: Read, W: Write>(&self, mut input: R, mut output: W) -> CliResult<()> {
        let mut content = Vec::new();
        input
            .read_to_end(&mut content)
            .map_err(|e| CliError::io(format!("Failed to read standard input: {e}")))?;

        let rendered = self.render(&content)?;

        writeln!(output, "{rendered}")
            .and_then(|()| output.flush())
            .map_err(|e| CliError::io(format!("Failed to write output: {e}")))?;

        Ok(())
    }

    /// Computes the masks for `content` and renders them in the selected format.
    ///
    /// The result carries no trailing newline.
    pub fn render(&self, content: &[u8]) -> CliResult<String> {
        if self.format == OutputFormat::Define && !is_c_identifier(&self.define_name) {
            return Err(CliError::validation(format!(
                "Invalid macro name '{}': expected a C identifier",
                self.define_name
            )));
        }

        let masks = DeadKeyService::compute_from_slice(content, self.layout.as_deref())
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        match self.format {
            OutputFormat::List => Ok(masks.to_hex_list()),
            OutputFormat::Define => Ok(masks.to_c_define(&self.define_name)),
            OutputFormat::Json => serde_json::to_string_pretty(&DeadKeysResponse::from(&masks))
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}"))),
        }
    }
}

/// Returns true if `name` is usable as a C preprocessor macro name.
fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
