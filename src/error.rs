use std::result;
use thiserror::Error;

/// Errors returned by the operations a `SkipListSet<T>` does not provide.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The named operation is permanently unsupported.
    #[error("operation `{0}` is not supported")]
    Unsupported(&'static str),
}

/// Convenience `Result` type for this crate.
pub type Result<T> = result::Result<T, Error>;
