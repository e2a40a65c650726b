//! Parser for rendered plot command lines.
//!
//! Splits shell-style text into words, honouring single quotes, double
//! quotes, backslash escapes and backslash-newline continuations, then reads
//! the words as an invocation, a task name and `key=value` assignments.

mod ast;
mod error;
mod parser;

pub use ast::{Assignment, CommandLine, Span, Spanned};
pub use error::{format_errors, ParseError};

pub fn parse(source: &str) -> (Option<CommandLine>, Vec<ParseError>) {
    parser::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use replot_core::{
        format::shell_quote,
        keys,
        registry::Registry,
        table::{LocationNamer, TableRef},
        Assembler, ConfigMap, ConfigValue, CoordSpec, LayerSpec, PlotSpec, Setting, SettingGroup,
        TextFormatter,
    };

    fn parse_ok(source: &str) -> CommandLine {
        let (result, errors) = parse(source);
        if !errors.is_empty() {
            panic!("parse errors:\n{}", format_errors(source, &errors));
        }
        result.expect("expected successful parse")
    }

    fn parse_err(source: &str) -> (Option<CommandLine>, Vec<ParseError>) {
        let (result, errors) = parse(source);
        assert!(!errors.is_empty(), "expected errors for {source:?}");
        (result, errors)
    }

    #[test]
    fn simple_command() {
        let cmd = parse_ok("stilts plot2plane x=RA y=DEC");
        assert_eq!(cmd.invocation().collect::<Vec<_>>(), vec!["stilts"]);
        assert_eq!(cmd.task(), "plot2plane");
        assert_eq!(
            cmd.assignments().collect::<Vec<_>>(),
            vec![("x", "RA"), ("y", "DEC")]
        );
        assert_eq!(cmd.get("y"), Some("DEC"));
        assert_eq!(cmd.get("z"), None);
    }

    #[test]
    fn spans_cover_words() {
        let source = "stilts plot2plane x=RA";
        let cmd = parse_ok(source);
        assert_eq!(cmd.task.span, 7..17);
        assert_eq!(cmd.assignments[0].span, 18..22);
    }

    #[test]
    fn multi_word_invocation() {
        let cmd = parse_ok("java -Xmx4G -Djava.awt.headless=true -jar stilts.jar plot2sky in=a.fits");
        assert_eq!(
            cmd.invocation().collect::<Vec<_>>(),
            vec!["java", "-Xmx4G", "-Djava.awt.headless=true", "-jar", "stilts.jar"]
        );
        assert_eq!(cmd.task(), "plot2sky");
        assert_eq!(cmd.get("in"), Some("a.fits"));
    }

    #[test]
    fn bare_task_without_invocation() {
        let cmd = parse_ok("plot2time");
        assert_eq!(cmd.invocation().count(), 0);
        assert_eq!(cmd.task(), "plot2time");
        assert!(cmd.assignments.is_empty());
    }

    #[test]
    fn continuation_lines() {
        let source = "stilts plot2plane \\\n   in=cat.fits \\\r\n      x_1=RA y_1=DEC \\\n";
        let cmd = parse_ok(source);
        assert_eq!(
            cmd.assignments().collect::<Vec<_>>(),
            vec![("in", "cat.fits"), ("x_1", "RA"), ("y_1", "DEC")]
        );
    }

    #[test]
    fn quoting() {
        let cmd = parse_ok(
            r#"stilts plot2plane title='My Plot' icmd_1='select "vmag < 12"' label=it'\''s"#,
        );
        assert_eq!(cmd.get("title"), Some("My Plot"));
        assert_eq!(cmd.get("icmd_1"), Some(r#"select "vmag < 12""#));
        assert_eq!(cmd.get("label"), Some("it's"));

        let cmd = parse_ok(r#"stilts plot2plane title="a \"b\" \c $x" leglabel=a\ b"#);
        assert_eq!(cmd.get("title"), Some(r#"a "b" \c $x"#));
        assert_eq!(cmd.get("leglabel"), Some("a b"));
    }

    #[test]
    fn empty_and_embedded_equals() {
        let cmd = parse_ok("stilts plot2plane out= icmd=select\\ x==1 legseq=''");
        assert_eq!(cmd.get("out"), Some(""));
        assert_eq!(cmd.get("icmd"), Some("select x==1"));
        assert_eq!(cmd.get("legseq"), Some(""));
    }

    #[test]
    fn missing_task() {
        let (result, errors) = parse_err("   ");
        assert!(result.is_none());
        assert_eq!(errors[0].message, "missing task name");

        let (_, errors) = parse_err("x=1 y=2");
        assert_eq!(errors[0].span, 0..3);
    }

    #[test]
    fn stray_words_and_duplicates() {
        let (result, errors) = parse_err("stilts plot2plane x=1 stray =2 x=3");
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "expected key=value, found 'stray'",
                "missing parameter name",
                "parameter 'x' assigned more than once",
            ]
        );
        let cmd = result.unwrap();
        assert_eq!(cmd.assignments().collect::<Vec<_>>(), vec![("x", "1")]);
    }

    #[test]
    fn unclosed_quote() {
        let (result, _) = parse_err("stilts plot2plane title='oops");
        assert!(result.is_none());
    }

    #[test]
    fn error_report_mentions_message() {
        let source = "stilts plot2plane x=1 x=2";
        let (_, errors) = parse_err(source);
        let report = format_errors(source, &errors);
        assert!(report.contains("parameter 'x' assigned more than once"));
        assert!(report.contains("each parameter may be given only once"));
    }

    fn explicit_pairs<'a>(settings: impl Iterator<Item = &'a Setting>) -> Vec<(String, String)> {
        settings
            .map(|s| (s.key().to_owned(), s.value().to_owned()))
            .collect()
    }

    fn parsed_pairs(cmd: &CommandLine) -> Vec<(String, String)> {
        cmd.assignments()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn formatted_commands_parse_back() {
        let command = replot_core::Command::new(
            "plot2plane",
            vec![
                SettingGroup::new(
                    1,
                    vec![
                        Setting::new("title", "Tom's \"best\" plot", Some(String::new())),
                        Setting::new("xpix", "500", Some("500".into())),
                    ],
                ),
                SettingGroup::new(1, vec![Setting::new("layer_1", "mark", None)]),
                SettingGroup::new(
                    2,
                    vec![
                        Setting::new("icmd_1", "select \"vmag < 12\"", None),
                        Setting::new("leglabel_1", "", None),
                    ],
                ),
            ],
        );
        let formatter = TextFormatter {
            wrap: 20,
            ..TextFormatter::default()
        };
        let cmd = parse_ok(&formatter.format(&command));
        assert_eq!(cmd.task(), "plot2plane");
        assert_eq!(parsed_pairs(&cmd), explicit_pairs(command.explicit_settings()));
    }

    #[test]
    fn assembled_plot_parses_back() {
        let plotter = Registry::standard().plotter("mark", Some("flat")).unwrap();
        let layers = ["blue", "dark green"]
            .into_iter()
            .map(|color| {
                let mut layer = LayerSpec::new(plotter.clone());
                layer.zone = Some(0);
                layer.table = Some(TableRef::new("cat").with_location("my cat.fits"));
                layer.coords = vec![CoordSpec::new("x", "RA"), CoordSpec::new("y", "DEC")];
                layer.config = ConfigMap::new().with(&keys::color("red"), ConfigValue::text(color));
                layer
            })
            .collect();
        let spec = PlotSpec {
            zone_configs: vec![ConfigMap::new()],
            layer_specs: layers,
            ..PlotSpec::new("plane")
        };
        let command = Assembler::new(
            Registry::standard(),
            replot_core::FormatRegistry::standard(),
            &LocationNamer,
        )
        .assemble(&spec)
        .unwrap();

        let cmd = parse_ok(&TextFormatter::default().format(&command));
        assert_eq!(cmd.get("in"), Some("my cat.fits"));
        assert_eq!(cmd.get("color_2"), Some("dark green"));
        assert_eq!(parsed_pairs(&cmd), explicit_pairs(command.explicit_settings()));
    }

    proptest! {
        #[test]
        fn shell_quoted_values_round_trip(value in "\\PC*") {
            let source = format!("stilts plot2plane k={}", shell_quote(&value));
            let (result, errors) = parse(&source);
            prop_assert!(errors.is_empty(), "{:?}", errors);
            let cmd = result.unwrap();
            prop_assert_eq!(cmd.get("k"), Some(value.as_str()));
        }

        #[test]
        fn rendered_settings_parse_back_to_their_values(
            entries in prop::collection::vec(
                ("[a-z0-9 '\"\\\\$=\t]{0,8}", prop::option::of("[a-z ]{0,3}")),
                0..10,
            ),
            wrap in 10usize..60,
            include_defaults in any::<bool>(),
        ) {
            let settings: Vec<Setting> = entries
                .iter()
                .enumerate()
                .map(|(i, (value, default))| Setting::new(format!("k{i}"), value.as_str(), default.clone()))
                .collect();
            let command = replot_core::Command::new(
                "plot2plane",
                vec![SettingGroup::new(1, settings)],
            );
            let formatter = TextFormatter {
                wrap,
                include_defaults,
                ..TextFormatter::default()
            };
            let expected = if include_defaults {
                explicit_pairs(command.settings())
            } else {
                explicit_pairs(command.explicit_settings())
            };

            let source = formatter.format(&command);
            let (result, errors) = parse(&source);
            prop_assert!(errors.is_empty(), "{:?}", errors);
            let cmd = result.unwrap();
            prop_assert_eq!(cmd.task(), "plot2plane");
            prop_assert_eq!(parsed_pairs(&cmd), expected);
        }
    }
}
