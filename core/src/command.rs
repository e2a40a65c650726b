use crate::setting::{Credibility, Setting, SettingGroup};
use serde::Serialize;

/// A reconstructed task invocation: task name plus grouped settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    task_name: String,
    groups: Vec<SettingGroup>,
}

impl Command {
    pub fn new(task_name: impl Into<String>, groups: Vec<SettingGroup>) -> Self {
        Self {
            task_name: task_name.into(),
            groups,
        }
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn groups(&self) -> &[SettingGroup] {
        &self.groups
    }

    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.groups.iter().flat_map(|group| group.settings())
    }

    /// Settings that must appear for the command to reproduce the plot.
    pub fn explicit_settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings().filter(|setting| !setting.is_default_value())
    }

    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.settings().find(|setting| setting.key() == key)
    }

    /// Weakest credibility among the settings written out.
    pub fn credibility(&self) -> Credibility {
        self.explicit_settings()
            .map(Setting::credibility)
            .fold(Credibility::Yes, Credibility::weaker)
    }
}
