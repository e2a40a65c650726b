//! Direct execution of a [`Command`] without going through text.

use crate::{
    command::Command,
    error::{DuplicateParameterSnafu, Result, TaskSnafu, UnusedArgumentSnafu},
    setting::ObjectValue,
};
use indexmap::IndexMap;
use snafu::ResultExt;
use tracing::warn;

/// Unused parameters with these prefixes only produce a warning.
pub const HARMLESS_PREFIXES: &[&str] = &["ifmt", "istream"];

/// A parameter value: the setting's text, or the object it stands for.
#[derive(Debug, Clone)]
pub enum EnvValue {
    Text(String),
    Object(ObjectValue),
}

/// Parameter assignments for one task run, recording which were read.
#[derive(Debug, Default)]
pub struct MapEnvironment {
    values: IndexMap<String, (EnvValue, bool)>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: EnvValue) -> Result<()> {
        let key = key.into();
        if self.values.contains_key(&key) {
            return DuplicateParameterSnafu { key }.fail();
        }
        self.values.insert(key, (value, false));
        Ok(())
    }

    /// Reads a parameter, marking it used.
    pub fn get(&mut self, key: &str) -> Option<&EnvValue> {
        let (value, used) = self.values.get_mut(key)?;
        *used = true;
        Some(&*value)
    }

    pub fn get_text(&mut self, key: &str) -> Option<&str> {
        match self.get(key)? {
            EnvValue::Text(text) => Some(text.as_str()),
            EnvValue::Object(_) => None,
        }
    }

    pub fn unused(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, (_, used))| !used)
            .map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Runs a named task against a parameter environment.
pub trait TaskRunner {
    fn run(
        &mut self,
        task_name: &str,
        env: &mut MapEnvironment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Feeds the command's explicit settings to `runner` and rejects
/// parameters the task did not read, except those with a harmless prefix.
pub fn execute(
    command: &Command,
    runner: &mut dyn TaskRunner,
    harmless_prefixes: &[&str],
) -> Result<()> {
    let mut env = MapEnvironment::new();
    for setting in command.explicit_settings() {
        let value = match setting.object() {
            Some(object) => EnvValue::Object(object.clone()),
            None => EnvValue::Text(setting.value().to_owned()),
        };
        env.insert(setting.key(), value)?;
    }

    runner
        .run(command.task_name(), &mut env)
        .context(TaskSnafu {
            task: command.task_name(),
        })?;

    let mut unused = Vec::new();
    for key in env.unused() {
        if harmless_prefixes.iter().any(|prefix| key.starts_with(prefix)) {
            warn!(key, "ignoring unused parameter");
        } else {
            unused.push(key);
        }
    }
    if !unused.is_empty() {
        return UnusedArgumentSnafu {
            keys: unused.join(", "),
        }
        .fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::{Setting, SettingGroup};

    /// Reads every parameter named in `reads`.
    struct Recorder {
        reads: Vec<&'static str>,
        seen: Vec<String>,
    }

    impl TaskRunner for Recorder {
        fn run(
            &mut self,
            task_name: &str,
            env: &mut MapEnvironment,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.seen.push(task_name.to_owned());
            for key in &self.reads {
                if env.get(key).is_none() {
                    return Err(format!("missing {key}").into());
                }
            }
            Ok(())
        }
    }

    fn command() -> Command {
        Command::new(
            "plot2plane",
            vec![SettingGroup::new(
                1,
                vec![
                    Setting::new("xpix", "500", Some("500".into())),
                    Setting::new("layer_1", "mark", None),
                    Setting::new("in_1", "cat.fits", None)
                        .with_object(ObjectValue::new("table".to_string())),
                    Setting::new("ifmt_1", "csv", Some("(auto)".into())),
                ],
            )],
        )
    }

    #[test]
    fn runs_with_explicit_settings_only() {
        let mut runner = Recorder {
            reads: vec!["layer_1", "in_1"],
            seen: Vec::new(),
        };
        execute(&command(), &mut runner, HARMLESS_PREFIXES).unwrap();
        assert_eq!(runner.seen, vec!["plot2plane"]);
    }

    #[test]
    fn default_settings_are_not_fed() {
        let mut runner = Recorder {
            reads: vec!["xpix"],
            seen: Vec::new(),
        };
        let err = execute(&command(), &mut runner, HARMLESS_PREFIXES).unwrap_err();
        assert_eq!(err.to_string(), "Task plot2plane failed");
    }

    #[test]
    fn unused_parameters_are_fatal_unless_harmless() {
        let mut runner = Recorder {
            reads: vec!["layer_1"],
            seen: Vec::new(),
        };
        let err = execute(&command(), &mut runner, HARMLESS_PREFIXES).unwrap_err();
        assert_eq!(err.to_string(), "Unused parameters: in_1");

        let mut runner = Recorder {
            reads: vec!["layer_1"],
            seen: Vec::new(),
        };
        let err = execute(&command(), &mut runner, &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unused parameters: in_1, ifmt_1");
    }

    #[test]
    fn object_values_take_precedence() {
        let mut env = MapEnvironment::new();
        let object = ObjectValue::new(7u8);
        env.insert("in", EnvValue::Object(object)).unwrap();
        assert!(env.get_text("in").is_none());
        match env.get("in") {
            Some(EnvValue::Object(object)) => assert_eq!(object.downcast_ref::<u8>(), Some(&7)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(env.unused().count(), 0);
    }

    #[test]
    fn duplicate_assignment_is_rejected() {
        let mut env = MapEnvironment::new();
        env.insert("seq", EnvValue::Text("_1".into())).unwrap();
        let err = env
            .insert("seq", EnvValue::Text("_2".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Parameter seq assigned more than once");
    }
}
