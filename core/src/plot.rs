//! Structured description of a plot, as handed over by the plotting UI.

use crate::{
    config::{ConfigKey, ConfigMap},
    table::{CredibleString, TableRef},
};
use compact_str::CompactString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

/// Space reserved around the plot data area. Unset sides are chosen
/// automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: Option<u32>,
    pub left: Option<u32>,
    pub bottom: Option<u32>,
    pub right: Option<u32>,
}

impl Padding {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `top,left,bottom,right`, blank for unset sides; empty if all unset.
    pub fn to_param_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .map(|side| side.map(|v| v.to_string()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub border: bool,
    pub opaque: bool,
    /// Fractional position inside the plot, or external placement if unset.
    pub position: Option<[f64; 2]>,
}

impl Default for LegendSpec {
    fn default() -> Self {
        Self {
            border: true,
            opaque: true,
            position: None,
        }
    }
}

/// Title and legend decorations of a zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimmingSpec {
    pub title: Option<String>,
    pub legend: Option<LegendSpec>,
}

/// Colour ramp configuration of a zone's aux axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeSpec {
    pub config: ConfigMap,
    pub visible: bool,
    pub label: Option<String>,
    pub crowding: f64,
}

impl Default for ShadeSpec {
    fn default() -> Self {
        Self {
            config: ConfigMap::new(),
            visible: true,
            label: None,
            crowding: 1.0,
        }
    }
}

/// How a layer's plotter is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// `layerN=<name>`.
    Simple { name: CompactString },
    /// `layerN=<form> shadingN=<mode>`.
    ShapeFamily {
        form: CompactString,
        mode: CompactString,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plotter {
    pub kind: LayerKind,
    pub style_keys: Vec<ConfigKey>,
}

impl Plotter {
    /// Value of the `layer` parameter.
    pub fn layer_type(&self) -> &str {
        match &self.kind {
            LayerKind::Simple { name } => name,
            LayerKind::ShapeFamily { form, .. } => form,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordSpec {
    pub input_name: String,
    pub value_expr: String,
    pub domain_mapper: Option<String>,
    pub default_domain_mapper: Option<String>,
}

impl CoordSpec {
    pub fn new(input_name: impl Into<String>, value_expr: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            value_expr: value_expr.into(),
            domain_mapper: None,
            default_domain_mapper: None,
        }
    }

    pub fn with_mapper(mut self, mapper: impl Into<String>, default: Option<&str>) -> Self {
        self.domain_mapper = Some(mapper.into());
        self.default_domain_mapper = default.map(str::to_owned);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub plotter: Plotter,
    pub config: ConfigMap,
    pub legend_label: Option<String>,
    /// Index into the plot's zones, or `None` for zone-less layers.
    pub zone: Option<usize>,
    pub table: Option<TableRef>,
    pub coords: Vec<CoordSpec>,
    pub data_geom: Option<String>,
    pub select: Option<CredibleString>,
}

impl LayerSpec {
    pub fn new(plotter: Plotter) -> Self {
        Self {
            plotter,
            config: ConfigMap::new(),
            legend_label: None,
            zone: None,
            table: None,
            coords: Vec::new(),
            data_geom: None,
            select: None,
        }
    }
}

/// Everything needed to rebuild one plot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSpec {
    pub plot_type: String,
    pub ext_size: Option<Dimension>,
    pub padding: Padding,
    pub global_config: ConfigMap,
    pub zone_configs: Vec<ConfigMap>,
    /// One per zone, a single shared spec, or none.
    pub trimming_specs: Vec<Option<TrimmingSpec>>,
    /// One per zone, a single shared spec, or none.
    pub shade_specs: Vec<Option<ShadeSpec>>,
    pub layer_specs: Vec<LayerSpec>,
    /// Explicit drawing order as layer suffixes.
    pub layer_order: Option<Vec<String>>,
}

impl PlotSpec {
    pub fn new(plot_type: impl Into<String>) -> Self {
        Self {
            plot_type: plot_type.into(),
            ..Self::default()
        }
    }

    pub fn zone_count(&self) -> usize {
        self.zone_configs.len()
    }
}
