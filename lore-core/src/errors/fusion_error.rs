/// Fusion-engine errors.
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("discovery is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("discovery payload must be a JSON object")]
    NotAnObject,
}
