use thiserror::Error;

/// Error type for fatal model failures.
///
/// Soft failures in the variable exchange protocol (unknown names passed to
/// `get_value` / `set_value` and friends) are reported through
/// [`ExchangeStatus`](crate::model::ExchangeStatus) codes instead and never
/// surface here.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{stage} failed: {source}")]
    Collaborator {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("variable {0} not found in model input/output definition")]
    UnknownVariable(String),
    #[error("{0} is not supported; the grid is uniform rectilinear, not a mesh")]
    Unsupported(&'static str),
    #[error("invalid lifecycle state: expected {expected}, model is {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("no streamflow schedule entry for period {0}")]
    ScheduleGap(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Wrap an arbitrary collaborator failure with the update-sequence stage
    /// it occurred in.
    pub fn collaborator<E>(stage: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ModelError::Collaborator {
            stage,
            source: Box::new(source),
        }
    }
}

/// Convenience type for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
