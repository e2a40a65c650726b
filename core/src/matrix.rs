//! Scatter-plot matrix layout and its numbered-axis settings.

use crate::{
    config::{ConfigKey, ConfigMap, ConfigValue, XyKeyPair},
    error::{MatrixShapeSnafu, Result},
    keys,
    project::{project_entries, project_named},
    setting::{Entry, Setting},
};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Diagonal and below.
    Lower,
    /// Diagonal and above.
    Upper,
    Full,
}

impl MatrixFormat {
    pub fn from_config(config: &ConfigMap) -> Self {
        match config.get(&keys::matrix_format()) {
            ConfigValue::Text(text) if text == "upper" => Self::Upper,
            ConfigValue::Text(text) if text == "full" => Self::Full,
            _ => Self::Lower,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Full => "full",
        }
    }

    fn cell_count(self, width: usize) -> usize {
        match self {
            Self::Full => width * width,
            Self::Lower | Self::Upper => width * (width + 1) / 2,
        }
    }

    fn includes(self, ix: usize, iy: usize) -> bool {
        match self {
            Self::Lower => ix <= iy,
            Self::Upper => ix >= iy,
            Self::Full => true,
        }
    }
}

/// Cells of an `n x n` matrix in zone order (row major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixShape {
    width: usize,
    cells: Vec<(usize, usize)>,
}

impl MatrixShape {
    pub fn new(format: MatrixFormat, width: usize) -> Self {
        let cells = (0..width)
            .flat_map(|iy| (0..width).map(move |ix| (ix, iy)))
            .filter(|&(ix, iy)| format.includes(ix, iy))
            .collect();
        Self { width, cells }
    }

    /// The shape whose cell count is `zone_count`.
    pub fn for_zones(format: MatrixFormat, zone_count: usize) -> Result<Self> {
        let width = (0..=zone_count)
            .find(|&w| format.cell_count(w) >= zone_count)
            .filter(|&w| format.cell_count(w) == zone_count);
        match width {
            Some(width) => Ok(Self::new(format, width)),
            None => MatrixShapeSnafu {
                format: format.name(),
                zone_count,
            }
            .fail(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `(x, y)` column and row of zone `index`.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        self.cells.get(index).copied()
    }
}

/// Name of the `index`th numbered matrix coordinate: `x1`, `x2`, ...
pub fn coord_name(index: usize) -> String {
    format!("x{}", index + 1)
}

/// Global settings of a matrix plot.
///
/// Axis settings are read from off-diagonal cells only and renamed to the
/// numbered axes; the first value seen for each numbered axis wins.
/// Non-axis profile keys are taken from the global config.
pub fn global_settings(
    global_config: &ConfigMap,
    zone_configs: &[ConfigMap],
    profile_keys: &[ConfigKey],
    xy_pairs: &[XyKeyPair],
) -> Result<Vec<Entry>> {
    let format = MatrixFormat::from_config(global_config);
    let shape = MatrixShape::for_zones(format, zone_configs.len())?;
    let coord_names: Vec<String> = (0..shape.width()).map(coord_name).collect();

    let mut axis_settings: Vec<IndexMap<String, Setting>> =
        vec![IndexMap::new(); shape.width()];
    for (iz, zconfig) in zone_configs.iter().enumerate() {
        let Some((ix, iy)) = shape.cell(iz) else {
            continue;
        };
        if ix == iy {
            continue;
        }
        for pair in xy_pairs {
            let xname = pair.create_key(&coord_names[ix]).short_name().to_owned();
            let yname = pair.create_key(&coord_names[iy]).short_name().to_owned();
            axis_settings[ix]
                .entry(xname.clone())
                .or_insert_with(|| project_named(&pair.key_x(), zconfig, &xname));
            axis_settings[iy]
                .entry(yname.clone())
                .or_insert_with(|| project_named(&pair.key_y(), zconfig, &yname));
        }
    }

    let mut settings = Vec::new();
    for axis in axis_settings {
        settings.extend(axis.into_values().map(Entry::Setting));
        settings.push(Entry::Gap);
    }
    settings.push(Entry::Gap);

    settings.extend(project_entries(
        global_config,
        &global_profile_keys(profile_keys, xy_pairs),
    ));
    Ok(settings)
}

/// Profile keys a matrix takes from its global config: those not belonging
/// to an x/y axis family.
pub fn global_profile_keys(profile_keys: &[ConfigKey], xy_pairs: &[XyKeyPair]) -> Vec<ConfigKey> {
    let xy_names: Vec<String> = xy_pairs
        .iter()
        .flat_map(|pair| [pair.key_x(), pair.key_y()])
        .map(|key| key.short_name().to_owned())
        .collect();
    profile_keys
        .iter()
        .filter(|key| !xy_names.iter().any(|name| name == key.short_name()))
        .cloned()
        .collect()
}
