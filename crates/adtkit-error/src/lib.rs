//! Shared error type for adtkit.
//!
//! Every data-structure crate defines its own `thiserror` enum and converts
//! it into [`AdtError`], so callers that mix structures can propagate one
//! error type with `?`.

use std::fmt;

/// Broad classification of adtkit failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Index or interval outside the structure's domain.
    Range,
    /// Operation needs at least one element.
    Empty,
    /// Item or node is not stored in the structure.
    NotFound,
    /// Operation contradicts the current state (e.g. joining joined sets).
    Conflict,
    /// Requested configuration is not supported.
    Unsupported,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Range => write!(f, "range"),
            ErrorCategory::Empty => write!(f, "empty"),
            ErrorCategory::NotFound => write!(f, "not_found"),
            ErrorCategory::Conflict => write!(f, "conflict"),
            ErrorCategory::Unsupported => write!(f, "unsupported"),
            ErrorCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Error with a category and key/value context.
#[derive(Debug)]
pub struct AdtError {
    message: String,
    category: ErrorCategory,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    context: Vec<(String, String)>,
}

impl AdtError {
    pub fn new(message: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            message: message.into(),
            category,
            source: None,
            context: Vec::new(),
        }
    }

    /// Wrap a structure-specific error, keeping it reachable through
    /// [`std::error::Error::source`].
    pub fn from_source<E>(category: ErrorCategory, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            category,
            source: Some(Box::new(source)),
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.push((key.into(), value.to_string()));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up a context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_range_error(&self) -> bool {
        self.category == ErrorCategory::Range
    }

    pub fn is_empty_error(&self) -> bool {
        self.category == ErrorCategory::Empty
    }

    pub fn is_not_found(&self) -> bool {
        self.category == ErrorCategory::NotFound
    }

    /// Downcast the wrapped source to a concrete structure error.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref().and_then(|s| s.downcast_ref::<E>())
    }
}

impl fmt::Display for AdtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)?;

        if !self.context.is_empty() {
            write!(f, " (")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for AdtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result alias over [`AdtError`].
pub type Result<T> = std::result::Result<T, AdtError>;

impl From<anyhow::Error> for AdtError {
    fn from(err: anyhow::Error) -> Self {
        AdtError {
            message: err.to_string(),
            category: ErrorCategory::Unknown,
            source: Some(err.into()),
            context: Vec::new(),
        }
    }
}
