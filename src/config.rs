use crate::constants::DEFAULT_DEFINE_PREFIX;
use crate::error::{ScanForgeError, SfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Output path meaning "write to stdout".
pub const STDOUT_SINK: &str = "-";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Raw block image, ready to be loaded by the driver.
    #[default]
    Binary,
    /// Offset-prefixed hex dump, 16 bytes per line.
    Hex,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// C header holding the key event constants
    #[arg(long, default_value = "data/kbd_constants.h")]
    pub constants: String,

    /// Scancode CSV (header row = prefix groups)
    #[arg(short, long, default_value = "data/sc2_101.csv")]
    pub table: String,

    /// Artifact path, or "-" for stdout
    #[arg(short, long, default_value = "sc2.bin")]
    pub output: String,

    #[arg(long, default_value = DEFAULT_DEFINE_PREFIX)]
    pub define_prefix: String,

    #[arg(long, default_value_t = OutputFormat::Binary)]
    pub format: OutputFormat,

    /// Skip the decode check of every record after building
    #[arg(long, default_value_t = false)]
    pub skip_verify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            constants: "data/kbd_constants.h".to_string(),
            table: "data/sc2_101.csv".to_string(),
            output: "sc2.bin".to_string(),
            define_prefix: DEFAULT_DEFINE_PREFIX.to_string(),
            format: OutputFormat::Binary,
            skip_verify: false,
        }
    }
}

impl BuildConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ScanForgeError::Config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_SINK
    }

    /// Overwrites fields that were given explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &BuildConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(constants, "constants");
        update_if_present!(table, "table");
        update_if_present!(output, "output");
        update_if_present!(define_prefix, "define_prefix");
        update_if_present!(format, "format");
        update_if_present!(skip_verify, "skip_verify");
    }
}
