//! Retry eligibility: classify a job-store failure as retryable or permanent.
//!
//! The verdict is advisory; the retry coordinator that calls this decides
//! whether to re-attempt, back off, or surface the failure. Kind-based
//! matching takes priority over message inspection, which applies only to
//! wrapper kinds carrying no structural cause.

use crate::failure::{FailureKind, StoreFailure};

/// Failure kinds that indicate a permanent, semantic failure. Retrying
/// cannot fix these.
const NON_RETRYABLE_KINDS: &[FailureKind] = &[
    FailureKind::EntityExists,
    FailureKind::EntityNotFound,
    FailureKind::LockTimeout,
    FailureKind::NoResult,
    FailureKind::NonUniqueResult,
    FailureKind::OptimisticLock,
    FailureKind::PessimisticLock,
    FailureKind::QueryTimeout,
    FailureKind::TransactionRequired,
];

/// Cause chains are not walked past this depth; deeper failures classify
/// as retryable.
const MAX_UNWRAP_DEPTH: usize = 16;

/// Returns `true` when retrying the failed operation is sane, `false` when
/// the failure is permanent.
///
/// Total over any well-formed failure: an empty failure with no cause and
/// no message is retryable. Never panics.
pub fn is_retryable(failure: &StoreFailure) -> bool {
    let verdict = classify(failure);
    if !verdict {
        tracing::trace!(kind = ?failure.kind(), "store failure classified as permanent");
    }
    verdict
}

fn classify(failure: &StoreFailure) -> bool {
    if is_permanent_kind(failure.kind()) {
        return false;
    }
    match failure.kind() {
        // Executor failures wrap whatever the store layer reported; the
        // verdict comes from the innermost meaningful failure.
        FailureKind::Executor => classify_chain(failure),
        // A persistence failure built from a message alone is permanent.
        // With a nested cause it stays retryable at top level; it is only
        // unwrapped when reached inside an executor chain.
        FailureKind::Persistence => failure.cause().is_some() || !has_message(failure),
        _ => true,
    }
}

/// Walk an executor failure's cause chain, bounded by [`MAX_UNWRAP_DEPTH`].
fn classify_chain(wrapper: &StoreFailure) -> bool {
    let mut current = wrapper;
    for _ in 0..MAX_UNWRAP_DEPTH {
        if is_permanent_kind(current.kind()) {
            return false;
        }
        match current.cause() {
            Some(cause) => current = cause,
            // Terminal wrapper built directly from a message: permanent.
            None => return !(is_wrapper_kind(current.kind()) && has_message(current)),
        }
    }
    true
}

fn is_permanent_kind(kind: FailureKind) -> bool {
    NON_RETRYABLE_KINDS.contains(&kind)
}

fn is_wrapper_kind(kind: FailureKind) -> bool {
    matches!(kind, FailureKind::Executor | FailureKind::Persistence)
}

fn has_message(failure: &StoreFailure) -> bool {
    failure.message().is_some_and(|m| !m.is_empty())
}
