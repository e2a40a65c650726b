//! Round-trip check: the rendered text must parse back to exactly the
//! parameters the command would feed to the task when run directly.

use crate::{cli::CheckArgs, config::FormatterConfig};
use anyhow::{bail, ensure, Context, Result};
use replot_cmdline::{format_errors, CommandLine};
use replot_core::{
    exec::{self, EnvValue, MapEnvironment, TaskRunner},
    Command, Setting,
};
use tracing::info;

pub fn run(args: &CheckArgs, config: &FormatterConfig) -> Result<()> {
    let command = super::assemble(&args.document, config)?;
    let count = verify(&command, config)?;
    println!(
        "ok: {} {count} parameters (credibility {})",
        command.task_name(),
        command.credibility()
    );
    Ok(())
}

/// Renders `command`, parses the text and executes the command against the
/// parsed assignments. Returns the number of parsed assignments.
pub fn verify(command: &Command, config: &FormatterConfig) -> Result<usize> {
    let text = config.formatter().format(command);
    let (parsed, errors) = replot_cmdline::parse(&text);
    if !errors.is_empty() {
        bail!(
            "Rendered command does not parse:\n{}",
            format_errors(&text, &errors)
        );
    }
    let parsed = parsed.context("Rendered command does not parse")?;
    ensure!(
        parsed.invocation().eq(config.invocation.split_whitespace()),
        "Invocation rendered as '{}'",
        parsed.invocation().collect::<Vec<_>>().join(" ")
    );

    let mut runner = ReparseRunner {
        command,
        parsed: &parsed,
    };
    exec::execute(command, &mut runner, &config.harmless_prefixes())?;
    info!(
        task = command.task_name(),
        parameters = parsed.assignments.len(),
        "command round trip verified"
    );
    Ok(parsed.assignments.len())
}

/// Consumes every parsed assignment, comparing it with the value the
/// command feeds for the same parameter.
struct ReparseRunner<'a> {
    command: &'a Command,
    parsed: &'a CommandLine,
}

impl TaskRunner for ReparseRunner<'_> {
    fn run(
        &mut self,
        task_name: &str,
        env: &mut MapEnvironment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if task_name != self.parsed.task() {
            return Err(format!("task {task_name} rendered as {}", self.parsed.task()).into());
        }
        for (key, text) in self.parsed.assignments() {
            match env.get(key) {
                Some(EnvValue::Text(value)) if value == text => {},
                Some(EnvValue::Object(_)) => {},
                Some(EnvValue::Text(value)) => {
                    return Err(format!("{key}: assembled '{value}', rendered '{text}'").into());
                },
                None if self
                    .command
                    .get(key)
                    .is_some_and(Setting::is_default_value) => {},
                None => return Err(format!("{key}: rendered but never assembled").into()),
            }
        }
        Ok(())
    }
}
