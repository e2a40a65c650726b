//! Parameter settings and the groups they are presented in.

use serde::Serialize;
use std::{any::Any, fmt, sync::Arc};

/// How much a setting's textual value can be trusted to reproduce the
/// object it stands for when the command is re-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Credibility {
    #[default]
    Yes,
    Maybe,
    No,
}

impl Credibility {
    /// The weaker of two credibilities.
    pub fn weaker(self, other: Self) -> Self {
        match (self, other) {
            (Self::No, _) | (_, Self::No) => Self::No,
            (Self::Maybe, _) | (_, Self::Maybe) => Self::Maybe,
            _ => Self::Yes,
        }
    }
}

impl fmt::Display for Credibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        })
    }
}

/// Opaque in-memory object carried alongside a setting's text, used by the
/// executable renderer in place of the text.
#[derive(Clone)]
pub struct ObjectValue(Arc<dyn Any + Send + Sync>);

impl ObjectValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ObjectValue(..)")
    }
}

/// A single `key=value` parameter assignment.
///
/// An unset value is the empty string. `default` is the value the task
/// would assume if the parameter were omitted; `None` means the setting is
/// always written out.
#[derive(Debug, Clone, Serialize)]
pub struct Setting {
    key: String,
    value: String,
    default: Option<String>,
    #[serde(skip)]
    object: Option<ObjectValue>,
    credibility: Credibility,
}

impl PartialEq for Setting {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Setting {}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>, default: Option<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            default,
            object: None,
            credibility: Credibility::Yes,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn object(&self) -> Option<&ObjectValue> {
        self.object.as_ref()
    }

    pub fn credibility(&self) -> Credibility {
        self.credibility
    }

    pub fn is_default_value(&self) -> bool {
        self.default.as_deref() == Some(self.value.as_str())
    }

    pub fn with_object(mut self, object: ObjectValue) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_credibility(mut self, credibility: Credibility) -> Self {
        self.credibility = credibility;
        self
    }

    /// Same setting under `key + suffix`.
    pub fn append_suffix(&self, suffix: &str) -> Self {
        Self {
            key: format!("{}{suffix}", self.key),
            ..self.clone()
        }
    }

    pub fn reset_default(self, default: Option<String>) -> Self {
        Self { default, ..self }
    }

    /// Marks the current value as the default, so it is omitted from
    /// compact output.
    pub fn as_default(self) -> Self {
        let default = Some(self.value.clone());
        Self { default, ..self }
    }
}

/// Element of a working settings list. Gaps mark group boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Setting(Setting),
    Gap,
}

impl Entry {
    pub fn as_setting(&self) -> Option<&Setting> {
        match self {
            Self::Setting(setting) => Some(setting),
            Self::Gap => None,
        }
    }

    pub fn as_setting_mut(&mut self) -> Option<&mut Setting> {
        match self {
            Self::Setting(setting) => Some(setting),
            Self::Gap => None,
        }
    }
}

impl From<Setting> for Entry {
    fn from(setting: Setting) -> Self {
        Self::Setting(setting)
    }
}

/// Consecutive settings rendered together at one indentation level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingGroup {
    level: usize,
    settings: Vec<Setting>,
}

impl SettingGroup {
    pub fn new(level: usize, settings: Vec<Setting>) -> Self {
        Self { level, settings }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }
}

/// Splits a working list at its gaps, dropping empty runs.
pub fn to_groups(level: usize, entries: impl IntoIterator<Item = Entry>) -> Vec<SettingGroup> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for entry in entries {
        match entry {
            Entry::Setting(setting) => current.push(setting),
            Entry::Gap => {
                if !current.is_empty() {
                    groups.push(SettingGroup::new(level, std::mem::take(&mut current)));
                }
            },
        }
    }
    if !current.is_empty() {
        groups.push(SettingGroup::new(level, current));
    }
    groups
}

/// Appends `suffix` to the key of every setting, keeping gaps.
pub fn add_suffixes(entries: Vec<Entry>, suffix: &str) -> Vec<Entry> {
    entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Setting(setting) => Entry::Setting(setting.append_suffix(suffix)),
            Entry::Gap => Entry::Gap,
        })
        .collect()
}
