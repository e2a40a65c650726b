use crate::{cli::FormatArgs, config::FormatterConfig};
use anyhow::Result;
use replot_core::{Command, Credibility};
use tracing::warn;

pub fn run(args: &FormatArgs, config: &FormatterConfig) -> Result<()> {
    let command = super::assemble(&args.document, config)?;
    let credibility = command.credibility();
    if credibility != Credibility::Yes {
        warn!(%credibility, "command may not reproduce the plot");
    }
    println!("{}", render(&command, config, args.json)?);
    Ok(())
}

pub fn render(command: &Command, config: &FormatterConfig, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(command)?)
    } else {
        Ok(config.formatter().format(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{command, PLANE};
    use replot_core::Suffixer;

    #[test]
    fn renders_shell_text() {
        let config = FormatterConfig::default();
        let text = render(&command(PLANE, &config), &config, false).unwrap();
        assert_eq!(
            text,
            "stilts plot2plane \\\n   xlog=true \\\n   in='my cat.fits' x=RA y=DEC shading=flat color=blue \\\n   layer_1=mark \\\n      size_1=3 \\\n   layer_2=mark \\\n      icmd_2='select \"vmag < 12\"' \\\n      size_2=5"
        );
    }

    #[test]
    fn configured_suffixes_and_invocation() {
        let config = FormatterConfig {
            invocation: "java -jar stilts.jar".into(),
            layer_suffixer: Suffixer::alpha("", false, true),
            ..FormatterConfig::default()
        };
        let text = render(&command(PLANE, &config), &config, false).unwrap();
        assert!(text.starts_with("java -jar stilts.jar plot2plane \\\n"));
        assert!(text.contains("layerA=mark"));
        assert!(text.contains("sizeB=5"));
    }

    #[test]
    fn renders_json_groups() {
        let config = FormatterConfig::default();
        let json = render(&command(PLANE, &config), &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["task_name"], "plot2plane");
        let first = &value["groups"][0];
        assert_eq!(first["level"], 1);
        assert_eq!(first["settings"][0]["key"], "insets");
        assert_eq!(first["settings"][0]["default"], "");
    }
}
