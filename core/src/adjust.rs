//! Plot-type specific touch-ups of zone and layer settings.

use crate::{
    config::{ConfigMap, ConfigValue},
    keys,
    plot::LayerSpec,
    project::project_named,
    registry::PlotFlavor,
    setting::{Entry, Setting},
};

/// Adjusts the settings of one zone and of the layers plotted in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneAdjuster {
    Noop,
    SkySys(SkySysAdjuster),
}

impl ZoneAdjuster {
    pub fn for_zone(flavor: PlotFlavor, zone_config: &ConfigMap, layers: &[&LayerSpec]) -> Self {
        match flavor {
            PlotFlavor::Sky => Self::SkySys(SkySysAdjuster::new(zone_config, layers)),
            PlotFlavor::Standard | PlotFlavor::Matrix => Self::Noop,
        }
    }

    pub fn adjust_zone_settings(&self, settings: &mut [Entry]) {
        match self {
            Self::Noop => {},
            Self::SkySys(adjuster) => adjuster.adjust_zone_settings(settings),
        }
    }

    pub fn adjust_layer_settings(&self, layer: &LayerSpec, settings: &mut Vec<Entry>) {
        match self {
            Self::Noop => {},
            Self::SkySys(adjuster) => adjuster.adjust_layer_settings(layer, settings),
        }
    }
}

/// Keeps view and data sky systems explicit whenever they disagree.
///
/// The view system defaults to the data system, so while every layer agrees
/// with the view both may be left out. Once some layer's data system
/// differs, the systems keep their registry defaults and any explicit
/// value is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkySysAdjuster {
    view_sys: Option<ConfigValue>,
    sys_differs: bool,
}

impl SkySysAdjuster {
    pub fn new(zone_config: &ConfigMap, layers: &[&LayerSpec]) -> Self {
        let view_sys = zone_config
            .explicit(&keys::viewsys())
            .filter(|value| !value.is_null())
            .cloned();
        let sys_differs = layers.iter().any(|layer| {
            layer
                .config
                .entries()
                .filter(|(key, _)| key.is_view_comparison())
                .any(|(_, value)| !value.is_null() && Some(value) != view_sys.as_ref())
        });
        Self {
            view_sys,
            sys_differs,
        }
    }

    pub fn view_sys(&self) -> Option<&ConfigValue> {
        self.view_sys.as_ref()
    }

    pub fn sys_differs(&self) -> bool {
        self.sys_differs
    }

    /// Hides `setting` unless some layer disagrees with the view.
    fn reset(&self, setting: &mut Setting) {
        if !self.sys_differs {
            *setting = setting.clone().as_default();
        }
    }

    pub fn adjust_zone_settings(&self, settings: &mut [Entry]) {
        let viewsys = keys::viewsys();
        for setting in settings.iter_mut().filter_map(Entry::as_setting_mut) {
            if setting.key() == viewsys.short_name() {
                self.reset(setting);
            }
        }
    }

    pub fn adjust_layer_settings(&self, layer: &LayerSpec, settings: &mut Vec<Entry>) {
        let comparison_keys: Vec<_> = layer
            .config
            .keys()
            .filter(|key| key.is_view_comparison())
            .cloned()
            .collect();
        for key in comparison_keys {
            let name = key.short_name();
            let existing = settings
                .iter_mut()
                .filter_map(Entry::as_setting_mut)
                .rev()
                .find(|setting| setting.key() == name);
            match existing {
                Some(setting) => self.reset(setting),
                None => {
                    let mut setting = project_named(&key, &layer.config, name);
                    self.reset(&mut setting);
                    settings.push(Entry::Setting(setting));
                },
            }
        }
    }
}
