use thiserror::Error;

/// Errors returned by simhash operations.
#[derive(Debug, Error)]
pub enum SimHashError {
    #[error("simhash: invalid threshold {0}: must be at most 64 bits")]
    InvalidThreshold(u32),
}
