//! Typed configuration keys and the maps holding their values.

use crate::error::{InvalidValueSnafu, Result};
use compact_str::CompactString;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// Sky coordinate systems accepted by sky-system keys.
pub const SKY_SYSTEMS: &[&str] = &[
    "icrs",
    "fk5",
    "fk4",
    "galactic",
    "supergalactic",
    "ecliptic",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
    Floats(Vec<OrderedFloat<f64>>),
}

impl ConfigValue {
    pub fn float(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Color,
    Floats,
    Choice(Vec<CompactString>),
    /// A sky coordinate system. `view_comparison` marks keys whose value
    /// is compared against the zone's view system.
    SkySys { view_comparison: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMeta {
    pub short_name: CompactString,
    pub long_name: CompactString,
}

/// A typed configuration key with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    meta: KeyMeta,
    kind: ValueKind,
    default: ConfigValue,
}

impl ConfigKey {
    pub fn new(
        short_name: impl Into<CompactString>,
        long_name: impl Into<CompactString>,
        kind: ValueKind,
        default: ConfigValue,
    ) -> Self {
        Self {
            meta: KeyMeta {
                short_name: short_name.into(),
                long_name: long_name.into(),
            },
            kind,
            default,
        }
    }

    pub fn short_name(&self) -> &str {
        &self.meta.short_name
    }

    /// Human-readable name, e.g. `Log Scale` for `xlog`.
    pub fn long_name(&self) -> &str {
        &self.meta.long_name
    }

    pub fn meta(&self) -> &KeyMeta {
        &self.meta
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn default_value(&self) -> &ConfigValue {
        &self.default
    }

    pub fn is_view_comparison(&self) -> bool {
        matches!(
            self.kind,
            ValueKind::SkySys {
                view_comparison: true
            }
        )
    }

    /// Canonical text for `value`; `Null` becomes the empty string.
    pub fn value_to_string(&self, value: &ConfigValue) -> String {
        match value {
            ConfigValue::Null => String::new(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Int(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Text(s) => s.clone(),
            ConfigValue::Floats(values) => values
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Inverse of [`Self::value_to_string`]; the empty string is `Null`.
    pub fn string_to_value(&self, text: &str) -> Result<ConfigValue> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(ConfigValue::Null);
        }
        let invalid = |reason: &str| {
            InvalidValueSnafu {
                key: self.short_name(),
                text,
                reason,
            }
            .fail()
        };
        match &self.kind {
            ValueKind::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => Ok(ConfigValue::Bool(true)),
                "false" | "no" | "off" => Ok(ConfigValue::Bool(false)),
                _ => invalid("expected true or false"),
            },
            ValueKind::Int => match text.parse() {
                Ok(i) => Ok(ConfigValue::Int(i)),
                Err(_) => invalid("expected an integer"),
            },
            ValueKind::Float => match text.parse::<f64>() {
                Ok(f) => Ok(ConfigValue::float(f)),
                Err(_) => invalid("expected a number"),
            },
            ValueKind::Floats => {
                let mut values = Vec::new();
                for part in text.split(',') {
                    match part.trim().parse::<f64>() {
                        Ok(f) => values.push(OrderedFloat(f)),
                        Err(_) => return invalid("expected comma-separated numbers"),
                    }
                }
                Ok(ConfigValue::Floats(values))
            },
            ValueKind::Text | ValueKind::Color => Ok(ConfigValue::text(text)),
            ValueKind::Choice(options) => {
                match options.iter().find(|o| o.eq_ignore_ascii_case(text)) {
                    Some(option) => Ok(ConfigValue::text(option.as_str())),
                    None => invalid(&format!("expected one of {}", options.join(", "))),
                }
            },
            ValueKind::SkySys { .. } => {
                match SKY_SYSTEMS.iter().find(|s| s.eq_ignore_ascii_case(text)) {
                    Some(sys) => Ok(ConfigValue::text(*sys)),
                    None => invalid(&format!("expected one of {}", SKY_SYSTEMS.join(", "))),
                }
            },
        }
    }
}

/// Insertion-ordered map of explicit key assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: IndexMap<CompactString, (ConfigKey, ConfigValue)>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: &ConfigKey, value: ConfigValue) {
        self.entries
            .insert(key.meta.short_name.clone(), (key.clone(), value));
    }

    pub fn with(mut self, key: &ConfigKey, value: ConfigValue) -> Self {
        self.put(key, value);
        self
    }

    /// Explicit value if present, otherwise the key's default.
    pub fn get(&self, key: &ConfigKey) -> ConfigValue {
        self.explicit(key)
            .cloned()
            .unwrap_or_else(|| key.default.clone())
    }

    pub fn explicit(&self, key: &ConfigKey) -> Option<&ConfigValue> {
        self.entries.get(key.short_name()).map(|(_, value)| value)
    }

    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.entries.contains_key(key.short_name())
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.values().map(|(key, _)| key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.entries.values().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A family of keys parameterised by axis name, e.g. `xlog`, `ylog`, `x2log`.
#[derive(Clone, Copy)]
pub struct XyKeyPair {
    make: fn(&str) -> ConfigKey,
}

impl XyKeyPair {
    pub const fn new(make: fn(&str) -> ConfigKey) -> Self {
        Self { make }
    }

    pub fn key_x(&self) -> ConfigKey {
        (self.make)("x")
    }

    pub fn key_y(&self) -> ConfigKey {
        (self.make)("y")
    }

    pub fn create_key(&self, axis: &str) -> ConfigKey {
        (self.make)(axis)
    }
}

impl std::fmt::Debug for XyKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("XyKeyPair")
            .field(&self.key_x().short_name())
            .finish()
    }
}
