use std::ops::Range;

pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A `key=value` word with quoting already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

/// A command line split into the words before the task, the task name and
/// the parameter assignments following it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub invocation: Vec<Spanned<String>>,
    pub task: Spanned<String>,
    pub assignments: Vec<Spanned<Assignment>>,
}

impl CommandLine {
    pub fn invocation(&self) -> impl Iterator<Item = &str> {
        self.invocation.iter().map(|word| word.node.as_str())
    }

    pub fn task(&self) -> &str {
        &self.task.node
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|assignment| assignment.node.key == key)
            .map(|assignment| assignment.node.value.as_str())
    }

    /// Assignments as `(key, value)` pairs in command-line order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|assignment| (assignment.node.key.as_str(), assignment.node.value.as_str()))
    }
}
