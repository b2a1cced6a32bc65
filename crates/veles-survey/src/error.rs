use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("option '{key}' on '{block}' collides with a built-in field")]
    ReservedOption { block: String, key: String },

    #[error("options must serialize to a JSON object, got {0}")]
    NotAnObject(&'static str),
}
