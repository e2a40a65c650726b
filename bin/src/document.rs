//! Plot documents: TOML descriptions of a plot, converted to a [`PlotSpec`].
//!
//! Config tables map parameter names to TOML scalars or arrays. Each value
//! is turned into text and read back through its [`ConfigKey`], so a value
//! is accepted exactly when the command parser would accept it.

use anyhow::{bail, Context, Result};
use replot_core::{
    keys, matrix,
    plot::{Dimension, LegendSpec, Padding, ShadeSpec, TrimmingSpec},
    registry::{PlotFlavor, PlotTypeDef},
    table::CredibleString,
    ConfigKey, ConfigMap, CoordSpec, Credibility, LayerSpec, PlotSpec, Registry, TableRef,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotDocument {
    pub plot_type: String,
    pub size: Option<SizeDoc>,
    #[serde(default)]
    pub padding: PaddingDoc,
    #[serde(default)]
    pub global: toml::Table,
    /// Trimming shared by all zones.
    pub trimming: Option<TrimmingDoc>,
    /// Shading shared by all zones.
    pub shade: Option<ShadeDoc>,
    #[serde(default)]
    pub zones: Vec<ZoneDoc>,
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
    pub layer_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeDoc {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingDoc {
    pub top: Option<u32>,
    pub left: Option<u32>,
    pub bottom: Option<u32>,
    pub right: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneDoc {
    pub config: toml::Table,
    pub trimming: Option<TrimmingDoc>,
    pub shade: Option<ShadeDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrimmingDoc {
    pub title: Option<String>,
    pub legend: Option<LegendDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendDoc {
    pub border: bool,
    pub opaque: bool,
    pub position: Option<[f64; 2]>,
}

impl Default for LegendDoc {
    fn default() -> Self {
        let legend = LegendSpec::default();
        Self {
            border: legend.border,
            opaque: legend.opaque,
            position: legend.position,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadeDoc {
    pub config: toml::Table,
    pub visible: bool,
    pub label: Option<String>,
    pub crowding: f64,
}

impl Default for ShadeDoc {
    fn default() -> Self {
        let shade = ShadeSpec::default();
        Self {
            config: toml::Table::new(),
            visible: shade.visible,
            label: shade.label,
            crowding: shade.crowding,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDoc {
    pub plotter: String,
    pub mode: Option<String>,
    pub zone: Option<usize>,
    pub table: Option<TableDoc>,
    #[serde(default)]
    pub coords: Vec<CoordDoc>,
    pub geom: Option<String>,
    pub select: Option<String>,
    pub legend_label: Option<String>,
    #[serde(default)]
    pub config: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDoc {
    pub label: String,
    pub location: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoordDoc {
    pub name: String,
    pub expr: String,
    pub mapper: Option<String>,
    pub default_mapper: Option<String>,
}

impl PlotDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plot document: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse plot document: {}", path.display()))
    }

    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Resolves plotters and config keys against `registry`.
    pub fn to_spec(&self, registry: &Registry) -> Result<PlotSpec> {
        let def = registry.plot_type(&self.plot_type)?;

        let zone_keys = zone_keys(def);
        let mut zone_configs = Vec::with_capacity(self.zones.len());
        for (iz, zone) in self.zones.iter().enumerate() {
            let config = config_map(&zone.config, &zone_keys)
                .with_context(|| format!("In zone {iz}"))?;
            zone_configs.push(config);
        }

        let trimming_specs = match &self.trimming {
            Some(trimming) => vec![Some(trimming.to_spec())],
            None if self.zones.iter().any(|z| z.trimming.is_some()) => self
                .zones
                .iter()
                .map(|z| z.trimming.as_ref().map(TrimmingDoc::to_spec))
                .collect(),
            None => Vec::new(),
        };

        let shade_keys = keys::shade_keys();
        let shade_specs = match &self.shade {
            Some(shade) => vec![Some(shade.to_spec(&shade_keys).context("In shading")?)],
            None if self.zones.iter().any(|z| z.shade.is_some()) => {
                let mut specs = Vec::with_capacity(self.zones.len());
                for (iz, zone) in self.zones.iter().enumerate() {
                    let spec = match &zone.shade {
                        Some(shade) => Some(
                            shade
                                .to_spec(&shade_keys)
                                .with_context(|| format!("In shading of zone {iz}"))?,
                        ),
                        None => None,
                    };
                    specs.push(spec);
                }
                specs
            },
            None => Vec::new(),
        };

        let mut layer_specs = Vec::with_capacity(self.layers.len());
        for (il, layer) in self.layers.iter().enumerate() {
            let spec = layer
                .to_spec(registry, def)
                .with_context(|| format!("In layer {} ({})", il + 1, layer.plotter))?;
            layer_specs.push(spec);
        }

        let spec = PlotSpec {
            plot_type: self.plot_type.clone(),
            ext_size: self.size.map(|size| Dimension {
                width: size.width,
                height: size.height,
            }),
            padding: Padding {
                top: self.padding.top,
                left: self.padding.left,
                bottom: self.padding.bottom,
                right: self.padding.right,
            },
            global_config: config_map(&self.global, &global_keys(def))
                .context("In global settings")?,
            zone_configs,
            trimming_specs,
            shade_specs,
            layer_specs,
            layer_order: self.layer_order.clone(),
        };
        debug!(
            plot_type = %spec.plot_type,
            zones = spec.zone_count(),
            layers = spec.layer_specs.len(),
            "loaded plot document"
        );
        Ok(spec)
    }
}

impl TrimmingDoc {
    fn to_spec(&self) -> TrimmingSpec {
        TrimmingSpec {
            title: self.title.clone(),
            legend: self.legend.as_ref().map(|legend| LegendSpec {
                border: legend.border,
                opaque: legend.opaque,
                position: legend.position,
            }),
        }
    }
}

impl ShadeDoc {
    fn to_spec(&self, keys: &[ConfigKey]) -> Result<ShadeSpec> {
        Ok(ShadeSpec {
            config: config_map(&self.config, keys)?,
            visible: self.visible,
            label: self.label.clone(),
            crowding: self.crowding,
        })
    }
}

impl LayerDoc {
    fn to_spec(&self, registry: &Registry, def: &PlotTypeDef) -> Result<LayerSpec> {
        let mut layer = LayerSpec::new(registry.plotter(&self.plotter, self.mode.as_deref())?);
        let keys: Vec<ConfigKey> = layer
            .plotter
            .style_keys
            .iter()
            .chain(&def.layer_keys)
            .cloned()
            .collect();
        layer.config = config_map(&self.config, &keys)?;
        layer.legend_label = self.legend_label.clone();
        layer.zone = self.zone;
        layer.table = self.table.as_ref().map(|table| TableRef {
            label: table.label.clone(),
            location: table.location.clone(),
            format: table.format.clone(),
        });
        layer.coords = self
            .coords
            .iter()
            .map(|coord| CoordSpec {
                input_name: coord.name.clone(),
                value_expr: coord.expr.clone(),
                domain_mapper: coord.mapper.clone(),
                default_domain_mapper: coord.default_mapper.clone(),
            })
            .collect();
        layer.data_geom = self.geom.clone();
        layer.select = self
            .select
            .as_ref()
            .map(|select| CredibleString::new(select.as_str(), Credibility::Yes));
        Ok(layer)
    }
}

/// Every key a zone config of this plot type may hold.
fn zone_keys(def: &PlotTypeDef) -> Vec<ConfigKey> {
    let mut keys: Vec<ConfigKey> = def.zone_keys().cloned().collect();
    for pair in &def.xy_pairs {
        for key in [pair.key_x(), pair.key_y()] {
            if !keys.iter().any(|k| k.short_name() == key.short_name()) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Keys the global table may hold. A matrix also reads its non-axis
/// profile keys from there.
fn global_keys(def: &PlotTypeDef) -> Vec<ConfigKey> {
    let mut keys = def.ganger_keys.clone();
    if def.flavor == PlotFlavor::Matrix {
        keys.extend(matrix::global_profile_keys(&def.profile_keys, &def.xy_pairs));
    }
    keys
}

fn config_map(table: &toml::Table, keys: &[ConfigKey]) -> Result<ConfigMap> {
    let mut config = ConfigMap::new();
    for (name, value) in table {
        let Some(key) = keys.iter().find(|key| key.short_name() == name) else {
            let known: Vec<&str> = keys.iter().map(ConfigKey::short_name).collect();
            bail!("Unknown key '{name}' (known: {})", known.join(", "));
        };
        let text = value_text(name, value)?;
        config.put(key, key.string_to_value(&text)?);
    }
    Ok(config)
}

fn value_text(name: &str, value: &toml::Value) -> Result<String> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if item.is_array() || item.is_table() {
                    bail!("Nested value for key '{name}'");
                }
                parts.push(value_text(name, item)?);
            }
            parts.join(",")
        },
        toml::Value::Datetime(_) | toml::Value::Table(_) => {
            bail!("Unsupported value for key '{name}'")
        },
    };
    Ok(text)
}
