pub mod failure;
pub mod retry;

pub use failure::{FailureKind, StoreFailure};
pub use retry::is_retryable;
