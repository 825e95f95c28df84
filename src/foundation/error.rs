/// Convenience result type used across the compiler.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by compiler APIs.
///
/// Recoverable input problems (bad colours, malformed path data, unmatched connector ends)
/// never show up here; they fall back to defaults and are reported as diagnostics instead.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid user-provided script or option values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A script step references an id that the scene graph does not contain.
    #[error("unknown entity '{id}'")]
    UnknownEntity {
        /// The offending entity id.
        id: String,
    },

    /// An ordering strategy needs an explicit entity order that was not supplied.
    #[error("{strategy} strategy requires an explicit chronological order")]
    MissingOrder {
        /// Name of the strategy that rejected the compilation.
        strategy: String,
    },

    /// Structural invariant broken while building the scene graph.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// The SVG document text is not well-formed XML.
    #[error("svg error: {0}")]
    Svg(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::UnknownEntity`] value.
    pub fn unknown_entity(id: impl Into<String>) -> Self {
        Self::UnknownEntity { id: id.into() }
    }

    /// Build a [`MotionError::MissingOrder`] value.
    pub fn missing_order(strategy: impl Into<String>) -> Self {
        Self::MissingOrder {
            strategy: strategy.into(),
        }
    }

    /// Build a [`MotionError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build a [`MotionError::Svg`] value.
    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors caused by script/strategy configuration rather than bad data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownEntity { .. } | Self::MissingOrder { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
