//! Input tables and how they are named in a command.

use crate::setting::Credibility;
use compact_str::CompactString;
use indexmap::IndexSet;
use std::sync::OnceLock;

/// Reference to a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Human-readable label, e.g. the name shown in a table list.
    pub label: String,
    /// Where the table was loaded from, if known.
    pub location: Option<String>,
    /// Input format the table was read with, if known.
    pub format: Option<String>,
}

impl TableRef {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: None,
            format: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Text paired with how reliably it reproduces what it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredibleString {
    pub value: String,
    pub credibility: Credibility,
}

impl CredibleString {
    pub fn new(value: impl Into<String>, credibility: Credibility) -> Self {
        Self {
            value: value.into(),
            credibility,
        }
    }
}

/// Names tables in a way the command parser can load them again.
pub trait TableNamer: Send + Sync {
    fn name_table(&self, table: &TableRef) -> CredibleString;

    /// Format the table should be read with, `None` if unknown.
    fn table_format(&self, table: &TableRef) -> Option<String>;
}

/// Names tables by their load location, falling back to the label.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNamer;

impl TableNamer for LocationNamer {
    fn name_table(&self, table: &TableRef) -> CredibleString {
        match &table.location {
            Some(location) => CredibleString::new(location.as_str(), Credibility::Yes),
            None => CredibleString::new(table.label.as_str(), Credibility::No),
        }
    }

    fn table_format(&self, table: &TableRef) -> Option<String> {
        table.format.clone()
    }
}

/// Names tables by label. The label may or may not be loadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelNamer;

impl TableNamer for LabelNamer {
    fn name_table(&self, table: &TableRef) -> CredibleString {
        CredibleString::new(table.label.as_str(), Credibility::Maybe)
    }

    fn table_format(&self, table: &TableRef) -> Option<String> {
        table.format.clone()
    }
}

/// Input formats and whether the reader can detect them unaided.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    auto_detected: IndexSet<CompactString>,
    known: IndexSet<CompactString>,
}

impl FormatRegistry {
    pub fn new(
        auto_detected: impl IntoIterator<Item = &'static str>,
        others: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        let auto_detected: IndexSet<CompactString> =
            auto_detected.into_iter().map(CompactString::from).collect();
        let mut known = auto_detected.clone();
        known.extend(others.into_iter().map(CompactString::from));
        Self {
            auto_detected,
            known,
        }
    }

    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<FormatRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::new(
                ["fits", "colfits", "votable", "cdf", "ecsv", "parquet", "gbin", "feather"],
                ["ascii", "csv", "tst", "ipac", "hdf5", "mrt", "gaiatap"],
            )
        })
    }

    pub fn is_auto_detected(&self, format: &str) -> bool {
        self.auto_detected
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format))
    }

    pub fn is_known(&self, format: &str) -> bool {
        self.known.iter().any(|f| f.eq_ignore_ascii_case(format))
    }
}

/// Double-quotes a filter expression argument unless it is a single plain
/// token. Backslashes and double quotes inside are escaped.
pub fn arg_quote(text: &str) -> String {
    let plain = !text.is_empty()
        && !text.contains(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if plain {
        text.to_owned()
    } else {
        let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
}
