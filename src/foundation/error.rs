/// Crate-wide result alias.
pub type ScrimResult<T> = Result<T, ScrimError>;

/// Errors reported across the public API.
#[derive(thiserror::Error, Debug)]
pub enum ScrimError {
    /// A caller-supplied value or buffer failed up-front validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A serialized draw plan is structurally malformed.
    #[error("plan error: {0}")]
    Plan(String),

    /// A compose pass could not be executed.
    #[error("compose error: {0}")]
    Compose(String),

    /// Any other error, preserved with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrimError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn plan(msg: impl Into<String>) -> Self {
        Self::Plan(msg.into())
    }

    pub(crate) fn compose(msg: impl Into<String>) -> Self {
        Self::Compose(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
