use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("buffers are not of equal length ({left} and {right} bytes)")]
    LengthMismatch { left: usize, right: usize },

    #[error("input of {len} bytes is not a multiple of the {block_size}-byte block size")]
    NotBlockAligned { len: usize, block_size: usize },

    #[error("IV must be {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("CBC mode requires an IV")]
    MissingIv,

    #[error("invalid pkcs7 padding")]
    InvalidPadding,

    #[error("block size must be between 1 and 255, got {0}")]
    InvalidBlockSize(usize),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("attack failed: {0}")]
    Attack(#[from] AttackError),
}

/// Reasons a chosen-plaintext attack gives up.
///
/// These are kept apart from the malformed-input variants of [`Error`] so a
/// caller can tell "the oracle is not attackable" from "I passed bad data".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttackError {
    #[error("oracle does not encrypt in ECB mode")]
    NotEcb,

    #[error("no block size found with probes of up to {max_probe_len} bytes")]
    BlockSizeNotFound { max_probe_len: usize },

    #[error("ciphertext length never grew after {appended} appended bytes")]
    SecretLengthNotFound { appended: usize },

    #[error("no candidate byte matched at secret position {position}")]
    CandidatesExhausted { position: usize },

    #[error("oracle returned {actual} bytes, needed at least {needed}")]
    ShortCiphertext { needed: usize, actual: usize },
}
