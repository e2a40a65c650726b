//! Reconstruction of plot command invocations.
//!
//! A [`PlotSpec`] describes a plot as the plotting UI holds it: zones,
//! layers and their configuration. The [`Assembler`] turns it into a
//! [`Command`], a task name plus grouped `key=value` settings with
//! defaults suppressed and settings shared by all zones or layers
//! factored out. A command is rendered as shell text by
//! [`TextFormatter`] or run in-process through [`exec::execute`].

pub mod adjust;
pub mod assemble;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod factor;
pub mod format;
pub mod keys;
pub mod matrix;
pub mod plot;
pub mod project;
pub mod registry;
pub mod setting;
pub mod suffix;
pub mod table;

pub use assemble::Assembler;
pub use command::Command;
pub use config::{ConfigKey, ConfigMap, ConfigValue};
pub use error::{Error, Result};
pub use format::TextFormatter;
pub use plot::{CoordSpec, LayerSpec, PlotSpec};
pub use registry::Registry;
pub use setting::{Credibility, Setting, SettingGroup};
pub use suffix::Suffixer;
pub use table::{FormatRegistry, TableNamer, TableRef};
