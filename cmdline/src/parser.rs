use crate::{
    ast::{Assignment, CommandLine, Spanned},
    error::ParseError,
};
use chumsky::prelude::*;

/// Whitespace and backslash-newline continuations between words.
fn separator() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    filter(|c: &char| c.is_whitespace())
        .ignored()
        .or(just('\\')
            .then(just('\r').or_not())
            .then(just('\n'))
            .ignored())
        .repeated()
        .at_least(1)
        .ignored()
}

fn bare() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    filter(|c: &char| !c.is_whitespace() && !matches!(c, '\'' | '"' | '\\'))
        .or(just('\\').ignore_then(filter(|c: &char| *c != '\n' && *c != '\r')))
        .repeated()
        .at_least(1)
        .collect()
}

fn single_quoted() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    just('\'')
        .ignore_then(filter(|c: &char| *c != '\'').repeated())
        .then_ignore(just('\''))
        .collect()
}

/// Backslash only escapes `$`, `` ` ``, `"` and `\` inside double quotes.
fn double_quoted() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    just('"')
        .ignore_then(
            filter(|c: &char| *c != '"' && *c != '\\')
                .or(just('\\').ignore_then(one_of("$`\"\\")))
                .or(just('\\'))
                .repeated(),
        )
        .then_ignore(just('"'))
        .collect()
}

/// One shell word: adjacent bare and quoted runs, unquoted and joined.
fn word() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    bare()
        .or(single_quoted())
        .or(double_quoted())
        .repeated()
        .at_least(1)
        .map(|parts: Vec<String>| parts.concat())
}

pub fn parser() -> impl Parser<char, Vec<Spanned<String>>, Error = Simple<char>> {
    separator()
        .or_not()
        .ignore_then(
            word()
                .map_with_span(Spanned::new)
                .separated_by(separator())
                .allow_trailing(),
        )
        .then_ignore(end())
}

/// Words before the first assignment belong to the invocation, except that
/// option-like words such as `-Dname=value` never start the parameters.
fn is_head_word(word: &str) -> bool {
    !word.contains('=') || word.starts_with('-')
}

fn build(words: Vec<Spanned<String>>, source_len: usize) -> (Option<CommandLine>, Vec<ParseError>) {
    let mut errors = Vec::new();
    let head_len = words
        .iter()
        .take_while(|word| is_head_word(&word.node))
        .count();
    let mut words = words.into_iter();
    let mut invocation: Vec<Spanned<String>> = words.by_ref().take(head_len).collect();

    let Some(task) = invocation.pop() else {
        let span = words
            .as_slice()
            .first()
            .map_or(source_len..source_len, |word| word.span.clone());
        errors.push(
            ParseError::new(span, "missing task name")
                .with_label("expected a task name before the parameters"),
        );
        return (None, errors);
    };

    let mut assignments: Vec<Spanned<Assignment>> = Vec::new();
    for word in words {
        let Some((key, value)) = word.node.split_once('=') else {
            errors.push(
                ParseError::new(word.span, format!("expected key=value, found '{}'", word.node))
                    .with_label("not a parameter assignment"),
            );
            continue;
        };
        if key.is_empty() {
            errors.push(
                ParseError::new(word.span, "missing parameter name")
                    .with_label("nothing before '='"),
            );
            continue;
        }
        if assignments.iter().any(|assignment| assignment.node.key == key) {
            errors.push(
                ParseError::new(
                    word.span,
                    format!("parameter '{key}' assigned more than once"),
                )
                .with_label("reassigned here")
                .with_note("each parameter may be given only once"),
            );
            continue;
        }
        let assignment = Assignment {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        assignments.push(Spanned::new(assignment, word.span));
    }

    let command_line = CommandLine {
        invocation,
        task,
        assignments,
    };
    (Some(command_line), errors)
}

pub fn parse(source: &str) -> (Option<CommandLine>, Vec<ParseError>) {
    let (result, errs) = parser().parse_recovery(source);

    let mut errors: Vec<ParseError> = errs
        .into_iter()
        .map(|e| {
            let span = e.span();
            let message = match e.reason() {
                chumsky::error::SimpleReason::Unexpected => {
                    let found = e
                        .found()
                        .map(|c| format!("'{c}'"))
                        .unwrap_or_else(|| "end of input".to_string());
                    let expected: Vec<_> = e
                        .expected()
                        .filter_map(|exp| exp.as_ref().map(|c| format!("'{c}'")))
                        .collect();
                    if expected.is_empty() {
                        format!("unexpected {found}")
                    } else {
                        format!("expected {}, found {}", expected.join(" or "), found)
                    }
                },
                chumsky::error::SimpleReason::Unclosed { span: _, delimiter } => {
                    format!("unclosed delimiter '{delimiter}'")
                },
                chumsky::error::SimpleReason::Custom(msg) => msg.clone(),
            };
            ParseError::new(span, message)
        })
        .collect();

    let Some(words) = result else {
        return (None, errors);
    };
    let (command_line, build_errors) = build(words, source.chars().count());
    errors.extend(build_errors);
    (command_line, errors)
}
