//! Formatter configuration, loaded from `config.toml`.
//!
//! [`FormatterConfig::load_with_overrides`] picks the config path: CLI
//! `--config` > `<config_dir>/replot/config.toml` if present > the embedded
//! defaults. Individual fields are then overridden by command-line flags.

use anyhow::{Context, Result};
use replot_core::{
    exec::HARMLESS_PREFIXES,
    table::{LabelNamer, LocationNamer},
    Suffixer, TableNamer, TextFormatter,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How input tables are named in the rendered command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamerChoice {
    #[default]
    Location,
    Label,
}

impl NamerChoice {
    pub fn namer(self) -> &'static dyn TableNamer {
        match self {
            Self::Location => &LocationNamer,
            Self::Label => &LabelNamer,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    /// Words written before the task name.
    pub invocation: String,
    pub indent: usize,
    pub wrap: usize,
    pub include_defaults: bool,
    pub layer_suffixer: Suffixer,
    pub zone_suffixer: Suffixer,
    pub table_namer: NamerChoice,
    pub harmless_prefixes: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let formatter = TextFormatter::default();
        Self {
            invocation: formatter.invocation,
            indent: formatter.indent,
            wrap: formatter.wrap,
            include_defaults: formatter.include_defaults,
            layer_suffixer: Suffixer::default_layer(),
            zone_suffixer: Suffixer::default_zone(),
            table_namer: NamerChoice::default(),
            harmless_prefixes: HARMLESS_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl FormatterConfig {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FormatterConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    /// `<config_dir>/replot/config.toml`, if it exists.
    pub fn discover() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("replot").join("config.toml");
        path.is_file().then_some(path)
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../config.toml");
        toml::from_str(source).context("Failed to parse embedded config.toml")
    }

    pub fn formatter(&self) -> TextFormatter {
        TextFormatter {
            invocation: self.invocation.clone(),
            indent: self.indent,
            wrap: self.wrap,
            include_defaults: self.include_defaults,
        }
    }

    pub fn harmless_prefixes(&self) -> Vec<&str> {
        self.harmless_prefixes.iter().map(String::as_str).collect()
    }
}
