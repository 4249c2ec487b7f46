/// Result alias that carries the custom [`PageError`] type.
pub type Result<T> = std::result::Result<T, PageError>;

/// Common error type for the core crate.
///
/// Only failures of the surrounding tooling end up here (loading markup,
/// addressing an element that does not exist). Broken media and rejected
/// autoplay are part of normal page life and are logged instead.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Markup, configuration or script files that are not valid JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// An action referenced an element id the page does not contain.
    #[error("no element with id `{0}`")]
    UnknownElement(String),
    /// The page description is structurally unusable.
    #[error("invalid markup: {0}")]
    InvalidMarkup(String),
}

impl PageError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for PageError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PageError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
