use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The pattern could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(#[from] regex_syntax::Error),

    /// The analyzer reached a regex shape it has no rule for.
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Error::UnsupportedConstruct(what.into())
    }
}
