use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unknown plot type: {name}"))]
    UnknownPlotType { name: String },

    #[snafu(display("Unknown plotter: {name}"))]
    UnknownPlotter { name: String },

    #[snafu(display("{kind} suffixer produced {actual} suffixes for {expected} entities"))]
    SuffixCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[snafu(display("Ambiguous {kind} suffixes: '{shorter}' is a prefix of '{longer}'"))]
    AmbiguousSuffix {
        kind: &'static str,
        shorter: String,
        longer: String,
    },

    #[snafu(display("Layer order names unknown layer suffix '{suffix}' (known: {known})"))]
    UnknownLayerSuffix { suffix: String, known: String },

    #[snafu(display("Layer {layer} refers to zone {zone}, but the plot has {zone_count} zones"))]
    ZoneIndex {
        layer: usize,
        zone: usize,
        zone_count: usize,
    },

    #[snafu(display("Got {actual} {what} specs for {zone_count} zones (expected 0, 1 or {zone_count})"))]
    SpecCount {
        what: &'static str,
        actual: usize,
        zone_count: usize,
    },

    #[snafu(display("Matrix format '{format}' cannot lay out {zone_count} zones"))]
    MatrixShape { format: String, zone_count: usize },

    #[snafu(display("Invalid value '{text}' for {key}: {reason}"))]
    InvalidValue {
        key: String,
        text: String,
        reason: String,
    },

    #[snafu(display("Parameter {key} assigned more than once"))]
    DuplicateParameter { key: String },

    #[snafu(display("Unused parameters: {keys}"))]
    UnusedArgument { keys: String },

    #[snafu(display("Task {task} failed"))]
    Task {
        task: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
