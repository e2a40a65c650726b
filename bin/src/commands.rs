pub mod check;
pub mod format;
pub mod types;

use crate::{config::FormatterConfig, document::PlotDocument};
use anyhow::Result;
use replot_core::{Assembler, Command, FormatRegistry, PlotSpec, Registry};
use std::path::Path;

/// Loads a plot document and assembles its command.
pub fn assemble(path: &Path, config: &FormatterConfig) -> Result<Command> {
    let spec = PlotDocument::load(path)?.to_spec(Registry::standard())?;
    assemble_spec(&spec, config)
}

pub fn assemble_spec(spec: &PlotSpec, config: &FormatterConfig) -> Result<Command> {
    let command = Assembler::new(
        Registry::standard(),
        FormatRegistry::standard(),
        config.table_namer.namer(),
    )
    .with_layer_suffixer(config.layer_suffixer.clone())
    .with_zone_suffixer(config.zone_suffixer.clone())
    .assemble(spec)?;
    Ok(command)
}
