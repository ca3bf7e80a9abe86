// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::path::{Path, PathBuf};

use clap::builder::ValueHint;
use clap_derive::Parser;
use eyre::eyre;
use figment::Figment;
use figment::providers::{Format as ProviderFormat, Serialized, Yaml};
use kmp_printer::PrinterOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIVIDER: &str = "/* ------------------------------------------------- */\n";

#[derive(Parser, Debug)]
#[command(
    name = "kmprint",
    about = "Print the Kotlin metadata of a decoded artifact pool in a human-readable format"
)]
pub struct Args {
    #[arg(
        long,
        value_name = "input",
        help = "JSON artifact pool to process",
        value_hint = ValueHint::FilePath
    )]
    pub input: PathBuf,

    #[arg(
        long,
        value_name = "output",
        help = "Write output to this file instead of stdout",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "Class name filter, e.g. `com.example.**,!com.example.internal.*`"
    )]
    pub filter: Option<String>,

    #[arg(long, help = "Output a JSON report instead of text")]
    pub json: bool,

    #[arg(long, help = "Text to print in between Kotlin metadata items")]
    pub divider: Option<String>,

    #[arg(
        long,
        value_name = "config",
        help = "Path to configuration (YAML) file to use, if any. If not specified, defaults are used.\
                Configuration file values can be overridden by command line arguments.",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Skip synthetic classes and multi-file class parts at top level; they are still printed inside their owners"
    )]
    pub exclude_embedded: Option<bool>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub divider: String,
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            divider: DEFAULT_DIVIDER.to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub printer: PrinterOptions,
    pub output: OutputConfig,
}

impl Args {
    fn merge_config(&self, mut config: Config) -> Result<Config, eyre::Report> {
        if let Some(exclude_embedded) = self.exclude_embedded {
            config.printer.exclude_embedded = exclude_embedded;
        }
        if let Some(divider) = self.divider.as_ref() {
            config.output.divider = divider.clone();
        }
        if self.json {
            config.output.json = true;
        }
        Ok(config)
    }

    /// Load the configuration file if we have it, and then merge the arguments into it.
    pub fn load_config(&self) -> Result<Config, eyre::Report> {
        let config = match self.config.as_deref() {
            Some(path) => load_config_file(path)?,
            None => Config::default(),
        };
        self.merge_config(config)
    }
}

fn load_config_file(path: &Path) -> Result<Config, eyre::Report> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .extract::<Config>()
        .map_err(|e| eyre!("Failed to parse configuration from {:?}: {}", path, e))
}
