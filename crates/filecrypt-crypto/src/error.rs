//! Error taxonomy for the encryption core.
//!
//! Every failure is terminal for the current file operation: nothing retries,
//! nothing recovers partially. Open handles are closed by drop on all paths.

use thiserror::Error;

/// Key derivation failed. Argon2 only rejects its inputs for parameter or
/// resource reasons, never because of the password's content.
#[derive(Debug, Error)]
pub enum KdfError {
    #[error("key derivation failed: {0}")]
    Derivation(argon2::Error),
}

/// The stream header could not be accepted for this session.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Malformed or short header bytes.
    #[error("corrupt stream header")]
    Corrupt,
}

/// A chunk failed authentication. Covers corruption, truncation-induced
/// misalignment, tampering, and wrong-key decryption alike: the tag check
/// cannot tell them apart and does not try to.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("chunk authentication tag mismatch")]
    TagMismatch,
}

/// Misuse of an encrypt session.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Payload exceeds the per-chunk maximum.
    #[error("chunk payload of {0} bytes exceeds the {max} byte maximum", max = crate::CHUNK_SIZE)]
    PayloadTooLarge(usize),

    /// The AEAD backend refused to seal the chunk.
    #[error("chunk encryption failed")]
    Encrypt,
}

/// The chunk tags and the physical end of input disagree. Both checks are
/// enforced independently of chunk authentication; together they turn an
/// authenticated chunk sequence into a stream with verified completeness.
#[derive(Debug, Error)]
pub enum FramingError {
    /// A FINAL chunk was pulled but ciphertext bytes remain.
    #[error("end of stream reached before end of file")]
    TrailingData,

    /// The ciphertext ran out before a FINAL chunk was pulled.
    #[error("end of file reached before end of stream")]
    Truncated,
}

/// Top-level error for whole-file encrypt/decrypt operations.
#[derive(Debug, Error)]
pub enum FileCryptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    KeyDerivation(#[from] KdfError),

    /// The fixed-length salt or header prefix was incomplete.
    #[error("corrupt input: {0}")]
    Corrupt(&'static str),

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}
