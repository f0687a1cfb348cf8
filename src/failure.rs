//! Job-store failure model: a closed kind taxonomy plus an optional message and cause chain.

use std::fmt;
use thiserror::Error;

/// Classification of a job-store failure.
///
/// This is a closed set so the retry predicate can match against an
/// auditable list of categories instead of an open-ended error hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Insert hit an entity that already exists (duplicate key).
    EntityExists,
    /// Lookup expected an entity that is not there.
    EntityNotFound,
    /// Waiting for a row lock timed out.
    LockTimeout,
    /// Query expected a result and found none.
    NoResult,
    /// Query expected a single result and found several.
    NonUniqueResult,
    /// Optimistic lock version check failed.
    OptimisticLock,
    /// Pessimistic lock could not be acquired.
    PessimisticLock,
    /// Query exceeded its time budget.
    QueryTimeout,
    /// Operation ran outside a required transaction.
    TransactionRequired,
    /// Transaction rolled back.
    Rollback,
    /// Generic persistence-layer failure, either wrapping a deeper failure
    /// or built directly from a message.
    Persistence,
    /// Executor-level failure wrapping whatever the store layer reported.
    Executor,
    /// Unrelated runtime failure.
    Runtime,
    /// Anything else.
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            FailureKind::EntityExists => "entity already exists",
            FailureKind::EntityNotFound => "entity not found",
            FailureKind::LockTimeout => "lock timeout",
            FailureKind::NoResult => "no result found",
            FailureKind::NonUniqueResult => "non-unique result",
            FailureKind::OptimisticLock => "optimistic lock conflict",
            FailureKind::PessimisticLock => "pessimistic lock conflict",
            FailureKind::QueryTimeout => "query timeout",
            FailureKind::TransactionRequired => "transaction required",
            FailureKind::Rollback => "transaction rolled back",
            FailureKind::Persistence => "persistence failure",
            FailureKind::Executor => "executor failure",
            FailureKind::Runtime => "runtime failure",
            FailureKind::Other => "failure",
        };
        f.write_str(phrase)
    }
}

/// A failure reported by the job-store layer.
///
/// Carries its kind, an optional free-form message, and an optional nested
/// cause owned exclusively by this value. Immutable once built; `source()`
/// exposes the cause so the value composes with `std::error::Error` chains.
#[derive(Debug, Error)]
#[error("{kind}{}", fmt_message(.message))]
pub struct StoreFailure {
    kind: FailureKind,
    message: Option<String>,
    #[source]
    cause: Option<Box<StoreFailure>>,
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl StoreFailure {
    /// A bare failure of the given kind, with no message and no cause.
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: None,
            cause: None,
        }
    }

    /// Attach a free-form message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the failure this one wraps.
    pub fn with_cause(mut self, cause: StoreFailure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&StoreFailure> {
        self.cause.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_renders_kind_phrase() {
        let f = StoreFailure::new(FailureKind::EntityExists);
        assert_eq!(f.to_string(), "entity already exists");
    }

    #[test]
    fn display_appends_message_when_present() {
        let f = StoreFailure::new(FailureKind::Persistence).with_message("connection refused");
        assert_eq!(f.to_string(), "persistence failure: connection refused");
    }

    #[test]
    fn source_exposes_the_cause() {
        let f = StoreFailure::new(FailureKind::Executor)
            .with_cause(StoreFailure::new(FailureKind::LockTimeout));
        let source = f.source().expect("cause should be exposed as source");
        assert_eq!(source.to_string(), "lock timeout");
    }

    #[test]
    fn bare_failure_has_no_message_and_no_cause() {
        let f = StoreFailure::new(FailureKind::Other);
        assert_eq!(f.kind(), FailureKind::Other);
        assert!(f.message().is_none());
        assert!(f.cause().is_none());
    }
}
