use thiserror::Error;

/// The date collaborator is missing or handed back data we cannot trust.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("date source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid {field}: {value}")]
    InvalidYear { field: &'static str, value: i32 },
    #[error("previous year {previous} is not one before current year {current}")]
    InconsistentPreviousYear { current: i32, previous: i32 },
    #[error("{field} string '{text}' does not match numeric value {value}")]
    StringMismatch {
        field: &'static str,
        value: i32,
        text: String,
    },
    #[error("invalid tax year cutover: {0}")]
    InvalidCutover(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
    #[error("unknown placeholder '{0}'")]
    UnknownPlaceholder(String),
    #[error("no value supplied for placeholder '{0}'")]
    MissingValue(String),
    #[error("unresolved placeholder left in output near '{0}'")]
    Unresolved(String),
}

/// Reasons the registry refused to build. Nothing is published when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("invalid calculator id '{0}'")]
    InvalidId(String),
    #[error("duplicate calculator id '{0}'")]
    DuplicateId(String),
    #[error("empty content for '{0}'")]
    EmptyContent(String),
    #[error("template error in '{id}': {source}")]
    Template {
        id: String,
        #[source]
        source: TemplateError,
    },
}

/// A calculator id with no registry entry. An expected outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no content for calculator '{id}'")]
pub struct LookupMiss {
    pub id: String,
}
