use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A named file could not be opened or a named object was not found in it.
    #[error("input missing: {resource}")]
    InputMissing { resource: String },

    /// A normalization range integrates to a non-positive value.
    #[error("histogram `{name}` has a non-positive integral in the normalization range")]
    EmptyHistogram { name: String },

    #[error("binning mismatch between `{left}` and `{right}`")]
    ShapeMismatch { left: String, right: String },

    #[error("unknown routine `{0}`")]
    UnknownRoutine(String),

    #[error("index {index} out of range for `{field}` (len={len})")]
    OutOfRangeIndex {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("`{operation}` is not allowed in state {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PlotError {
    pub(crate) fn missing(resource: impl Into<String>) -> Self {
        Self::InputMissing {
            resource: resource.into(),
        }
    }
}
