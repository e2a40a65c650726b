//! Projection of configuration maps and task parameters onto settings.

use crate::{
    config::{ConfigKey, ConfigMap},
    setting::{Entry, Setting},
};

/// Projects `keys` from `config` onto settings named `short_name + suffix`.
pub fn project(config: &ConfigMap, keys: &[ConfigKey], suffix: &str) -> Vec<Setting> {
    keys.iter()
        .map(|key| {
            let name = format!("{}{suffix}", key.short_name());
            project_named(key, config, &name)
        })
        .collect()
}

/// Projects a single key under an explicit setting name.
pub fn project_named(key: &ConfigKey, config: &ConfigMap, name: &str) -> Setting {
    let value = key.value_to_string(&config.get(key));
    let default = key.value_to_string(key.default_value());
    Setting::new(name, value, Some(default))
}

/// [`project`] with an empty suffix, wrapped as working-list entries.
pub fn project_entries(config: &ConfigMap, keys: &[ConfigKey]) -> Vec<Entry> {
    project(config, keys, "")
        .into_iter()
        .map(Entry::Setting)
        .collect()
}

/// A task parameter, known by name and the text of its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    name: &'static str,
    default: Option<&'static str>,
}

impl Param {
    pub const fn new(name: &'static str, default: Option<&'static str>) -> Self {
        Self { name, default }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn setting(&self, value: impl Into<String>) -> Setting {
        Setting::new(self.name, value, self.default.map(str::to_owned))
    }

    /// Setting named `name + suffix`, e.g. `layer_1` or `in_2`.
    pub fn suffixed(&self, suffix: &str, value: impl Into<String>) -> Setting {
        self.setting(value).append_suffix(suffix)
    }
}

pub mod params {
    //! Parameters understood by every plot task.

    use super::Param;

    pub const XPIX: Param = Param::new("xpix", Some("500"));
    pub const YPIX: Param = Param::new("ypix", Some("400"));
    pub const INSETS: Param = Param::new("insets", Some(""));
    pub const TITLE: Param = Param::new("title", Some(""));
    pub const LEGEND: Param = Param::new("legend", None);
    pub const LEGBORDER: Param = Param::new("legborder", Some("true"));
    pub const LEGOPAQUE: Param = Param::new("legopaque", Some("true"));
    pub const LEGPOS: Param = Param::new("legpos", Some(""));
    pub const AUXVISIBLE: Param = Param::new("auxvisible", None);
    pub const AUXLABEL: Param = Param::new("auxlabel", Some(""));
    pub const AUXCROWD: Param = Param::new("auxcrowd", Some("1"));
    pub const SEQ: Param = Param::new("seq", Some(""));
    pub const LEGSEQ: Param = Param::new("legseq", Some(""));
    pub const LEGLABEL: Param = Param::new("leglabel", None);
    pub const OUT: Param = Param::new("out", Some(""));
    pub const ZONE: Param = Param::new("zone", Some(""));
    pub const LAYER: Param = Param::new("layer", None);
    pub const SHADING: Param = Param::new("shading", None);
    pub const IN: Param = Param::new("in", None);
    pub const IFMT: Param = Param::new("ifmt", Some(AUTO_FORMAT));
    pub const ICMD: Param = Param::new("icmd", None);
    pub const GEOM: Param = Param::new("geom", None);

    /// Format name meaning "detect from the data".
    pub const AUTO_FORMAT: &str = "(auto)";

    /// Appended to a coordinate name for its domain mapper parameter.
    pub const DOMAIN_MAPPER_SUFFIX: &str = "type";
}
