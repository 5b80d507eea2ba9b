//! Error types for resolving and fetching yearly archives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response is missing the `{0}` header")]
    MissingHeader(&'static str),

    #[error("cannot parse Last-Modified value `{value}`")]
    InvalidLastModified {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("cannot parse Content-Length value `{0}`")]
    InvalidContentLength(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot build progress bar")]
    Progress(#[from] indicatif::style::TemplateError),
}

#[derive(Debug, Error, PartialEq)]
pub enum YearSpecError {
    #[error("`{0}` is not a year")]
    InvalidYear(String),

    #[error("`{0}` is not a year range, expected `start:end`")]
    InvalidRange(String),
}
