//! Errors raised while configuring a wheel.
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("segments must be a sequence, got {found}"))]
    SegmentsNotSequence { found: String },

    #[snafu(display("'{property}' is not a wheel property"))]
    UnknownProperty { property: String },

    #[snafu(display("invalid value for '{property}': {source}"))]
    InvalidValue {
        property: String,
        source: serde_json::Error,
    },

    #[snafu(display("'{property}' expects {expected}"))]
    WrongKind {
        property: String,
        expected: &'static str,
    },

    #[snafu(display("no handler named '{name}' has been registered"))]
    UnknownHandler { name: String },

    #[snafu(display("could not parse JSON: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("could not parse '{value}': {message}"))]
    Parse { value: String, message: String },

    #[snafu(display("DOM error: {message}"))]
    Dom { message: String },
}
