//! Plot types and plotters known to the command assembler.

use crate::{
    config::{ConfigKey, XyKeyPair},
    error::{Result, UnknownPlotTypeSnafu, UnknownPlotterSnafu},
    keys,
    plot::{LayerKind, Plotter},
};
use compact_str::CompactString;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Plot-type specific behaviour beyond the key tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFlavor {
    Standard,
    /// Layers may declare a data sky system differing from the view.
    Sky,
    /// Zones are the cells of a scatter-plot matrix.
    Matrix,
}

#[derive(Debug, Clone)]
pub struct PlotTypeDef {
    pub name: &'static str,
    pub task_name: &'static str,
    pub flavor: PlotFlavor,
    /// Zones carry their own surface settings.
    pub independent_zones: bool,
    pub ganger_keys: Vec<ConfigKey>,
    pub profile_keys: Vec<ConfigKey>,
    pub aspect_keys: Vec<ConfigKey>,
    /// Keys a layer config may hold besides its plotter's style keys.
    pub layer_keys: Vec<ConfigKey>,
    pub xy_pairs: Vec<XyKeyPair>,
    /// Default of the `geom` parameter, if the task has one.
    pub geom_default: Option<&'static str>,
}

impl PlotTypeDef {
    /// Whether zone lists carry per-zone surface settings.
    pub fn has_zone_settings(&self, zone_count: usize) -> bool {
        self.independent_zones || (zone_count == 1 && self.flavor != PlotFlavor::Matrix)
    }

    /// Every key a zone config may hold.
    pub fn zone_keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.profile_keys.iter().chain(&self.aspect_keys)
    }
}

/// A plotter as offered to the user: either a standalone plotter or a
/// shape form, combined with a shading mode at layer creation.
#[derive(Debug, Clone)]
enum PlotterDef {
    Simple { style_keys: Vec<ConfigKey> },
    Form { style_keys: Vec<ConfigKey> },
}

#[derive(Debug, Clone)]
pub struct Registry {
    plot_types: IndexMap<&'static str, PlotTypeDef>,
    plotters: IndexMap<CompactString, PlotterDef>,
    modes: IndexMap<CompactString, Vec<ConfigKey>>,
}

impl Registry {
    pub fn plot_type(&self, name: &str) -> Result<&PlotTypeDef> {
        match self.plot_types.get(name) {
            Some(def) => Ok(def),
            None => UnknownPlotTypeSnafu { name }.fail(),
        }
    }

    pub fn plot_types(&self) -> impl Iterator<Item = &PlotTypeDef> {
        self.plot_types.values()
    }

    pub fn plotter_names(&self) -> impl Iterator<Item = &str> {
        self.plotters.keys().map(CompactString::as_str)
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(CompactString::as_str)
    }

    /// Builds the plotter `name`, in shading `mode` for shape forms.
    ///
    /// Shape forms default to the first registered mode.
    pub fn plotter(&self, name: &str, mode: Option<&str>) -> Result<Plotter> {
        match self.plotters.get(name) {
            Some(PlotterDef::Simple { style_keys }) if mode.is_none() => Ok(Plotter {
                kind: LayerKind::Simple { name: name.into() },
                style_keys: style_keys.clone(),
            }),
            Some(PlotterDef::Form { style_keys }) => {
                let found = match mode {
                    Some(mode) => self.modes.get_key_value(mode),
                    None => self.modes.first(),
                };
                let Some((mode, mode_keys)) = found else {
                    let name = format!("{name} (shading {})", mode.unwrap_or_default());
                    return UnknownPlotterSnafu { name }.fail();
                };
                let mut keys = style_keys.clone();
                keys.extend(mode_keys.iter().cloned());
                Ok(Plotter {
                    kind: LayerKind::ShapeFamily {
                        form: name.into(),
                        mode: mode.clone(),
                    },
                    style_keys: keys,
                })
            },
            _ => UnknownPlotterSnafu { name }.fail(),
        }
    }

    /// The built-in plot types and plotters.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(build_standard)
    }
}

fn build_standard() -> Registry {
    let plane_pairs = vec![
        keys::LOG_PAIR,
        keys::FLIP_PAIR,
        keys::LABEL_PAIR,
        keys::CROWD_PAIR,
    ];
    let standard = |name, task_name, profile_keys, aspect_keys| PlotTypeDef {
        name,
        task_name,
        flavor: PlotFlavor::Standard,
        independent_zones: true,
        ganger_keys: Vec::new(),
        profile_keys,
        aspect_keys,
        layer_keys: Vec::new(),
        xy_pairs: Vec::new(),
        geom_default: None,
    };

    let plot_types = [
        PlotTypeDef {
            xy_pairs: plane_pairs.clone(),
            ..standard(
                "plane",
                "plot2plane",
                keys::plane_profile(),
                keys::plane_aspect(),
            )
        },
        PlotTypeDef {
            flavor: PlotFlavor::Sky,
            layer_keys: vec![keys::datasys()],
            geom_default: Some("sky"),
            ..standard("sky", "plot2sky", keys::sky_profile(), keys::sky_aspect())
        },
        PlotTypeDef {
            geom_default: Some("cartesian"),
            ..standard(
                "cube",
                "plot2cube",
                keys::cube_profile(),
                keys::cube_aspect(),
            )
        },
        PlotTypeDef {
            geom_default: Some("sky"),
            ..standard(
                "sphere",
                "plot2sphere",
                keys::sphere_profile(),
                keys::sphere_aspect(),
            )
        },
        standard(
            "time",
            "plot2time",
            keys::time_profile(),
            keys::time_aspect(),
        ),
        PlotTypeDef {
            flavor: PlotFlavor::Matrix,
            independent_zones: false,
            ganger_keys: vec![keys::matrix_format(), keys::cell_gap()],
            xy_pairs: plane_pairs,
            ..standard("matrix", "plot2corner", keys::matrix_profile(), Vec::new())
        },
    ];

    let simple = |keys: Vec<ConfigKey>| PlotterDef::Simple { style_keys: keys };
    let plotters = [
        (
            "mark",
            PlotterDef::Form {
                style_keys: vec![keys::shape(), keys::size()],
            },
        ),
        (
            "size",
            PlotterDef::Form {
                style_keys: vec![keys::shape(), keys::scale()],
            },
        ),
        (
            "line",
            simple(vec![keys::color("red"), keys::thick(), keys::dash()]),
        ),
        ("label", simple(vec![keys::color("black"), keys::font_size()])),
        (
            "histogram",
            simple(vec![keys::color("red"), keys::bin_size(), keys::bar_form()]),
        ),
        (
            "function",
            simple(vec![keys::color("grey"), keys::thick(), keys::dash()]),
        ),
    ];

    let modes = [
        ("auto", vec![keys::color("red")]),
        ("flat", vec![keys::color("red"), keys::opaque()]),
        (
            "density",
            vec![keys::color("red"), keys::dense_map(), keys::dense_func()],
        ),
    ];

    Registry {
        plot_types: plot_types.into_iter().map(|def| (def.name, def)).collect(),
        plotters: plotters
            .into_iter()
            .map(|(name, def)| (name.into(), def))
            .collect(),
        modes: modes
            .into_iter()
            .map(|(name, keys)| (name.into(), keys))
            .collect(),
    }
}
