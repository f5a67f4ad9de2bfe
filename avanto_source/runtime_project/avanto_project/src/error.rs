use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading `avanto.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{0}`: {1}")]
    InvalidField(&'static str, String),
}
