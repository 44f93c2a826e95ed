use std::fmt;

/// Convenience result type used across scenegen.
pub type ScenegenResult<T> = Result<T, ScenegenError>;

/// Which template lookup failed during synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MissingTemplate {
    /// No scene source carries the requested template name.
    Scene(String),
    /// The collection has no `browser_source` object to clone.
    Browser,
}

impl fmt::Display for MissingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(name) => write!(f, "could not find scene template '{name}'"),
            Self::Browser => f.write_str("could not find a browser_source template"),
        }
    }
}

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScenegenError {
    /// A run-list row names a template the collection does not contain.
    #[error("template not found: {0}")]
    TemplateNotFound(MissingTemplate),

    /// The run-list has no data rows after the header.
    #[error("run-list is empty: no scenes to generate")]
    EmptyRunList,

    /// A generated scene or browser name collides with another source object.
    #[error("duplicate source name: '{0}'")]
    DuplicateScene(String),

    /// A run-list row could not be decoded.
    #[error("run-list error: {0}")]
    RunList(String),

    /// Invalid user-provided data, paths, or collection invariants.
    #[error("validation error: {0}")]
    Validation(String),

    /// The scene collection file does not exist.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The scene collection file exists but could not be read.
    #[error("document load error: {0}")]
    DocumentLoad(String),

    /// The scene collection file is not a valid collection.
    #[error("document parse error: {0}")]
    DocumentParse(String),

    /// The scene collection could not be written.
    #[error("document write error: {0}")]
    DocumentWrite(String),

    /// Transport or HTTP status failure talking to a remote service.
    #[error("network error: {0}")]
    Network(String),

    /// A remote resource or spreadsheet tab does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or malformed configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScenegenError {
    /// Build a [`ScenegenError::TemplateNotFound`] for a missing scene template.
    pub fn scene_template(name: impl Into<String>) -> Self {
        Self::TemplateNotFound(MissingTemplate::Scene(name.into()))
    }

    /// Build a [`ScenegenError::TemplateNotFound`] for a missing browser template.
    pub fn browser_template() -> Self {
        Self::TemplateNotFound(MissingTemplate::Browser)
    }

    /// Build a [`ScenegenError::RunList`] value.
    pub fn run_list(msg: impl Into<String>) -> Self {
        Self::RunList(msg.into())
    }

    /// Build a [`ScenegenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScenegenError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`ScenegenError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`ScenegenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
