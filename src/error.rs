use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("unknown subgroup '{0}', expected 'all' or 1-7")]
    InvalidSubgroup(String),

    #[error("invalid category '{0}': {1}")]
    InvalidCategory(String, String),

    #[error("page {0} does not exist (1-{1})")]
    PageOutOfRange(usize, usize),

    #[error("entity #{0} could not be fetched")]
    EntityUnavailable(u32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DexError>;
