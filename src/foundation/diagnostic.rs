/// Category of a recoverable problem that was absorbed with a fallback value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticKind {
    /// Width/height could not be resolved and a default was used.
    MissingDimension,
    /// A colour token was not recognized and resolved to black.
    UnknownColor,
    /// Path data stopped parsing early; the prefix was kept.
    MalformedPath,
    /// A `transform` attribute could not be parsed and was ignored.
    MalformedTransform,
    /// A numeric attribute could not be parsed and defaulted to 0.
    MalformedNumber,
    /// An element id was missing or duplicated and a unique one was generated.
    RenamedId,
    /// A connector could not be matched to two distinct nodes.
    UnresolvedConnector,
    /// Explicit endpoint attributes did not refer to existing nodes.
    InvalidEndpointRef,
}

/// A non-fatal finding surfaced alongside a successful result.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// Id of the primitive (or document) the finding is about.
    pub subject: String,
    /// What kind of fallback was applied.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic and mirror it to the `tracing` warn level.
    pub fn new(subject: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let d = Self {
            subject: subject.into(),
            kind,
            message: message.into(),
        };
        tracing::warn!(subject = %d.subject, kind = ?d.kind, "{}", d.message);
        d
    }
}
