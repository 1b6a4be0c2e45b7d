//! # Error Handling
//!
//! One error type covers the whole protocol core. The variants mirror the
//! failure taxonomy of the workflow: caller mistakes (malformed input,
//! fragments that fail verification, too few shares, a cryptographic
//! mismatch) versus unexpected faults inside the primitives library.
//!
//! The HTTP gateway maps the first group to 4xx responses and the second to
//! 5xx; see `recrypt-gateway`.

use thiserror::Error;

/// Result type alias for protocol core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the protocol core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Caller Errors
    // ========================================================================

    /// Missing or malformed input: bad hex, wrong byte length for the
    /// declared object type, invalid UTF-8, inconsistent threshold/shares,
    /// repeated or mismatched fragments.
    #[error("Invalid input: {0}")]
    Input(String),

    /// A key fragment failed signature or role-binding verification.
    /// The fragment is discarded; re-encryption never runs on it.
    #[error("Key fragment verification failed")]
    KeyFragVerification,

    /// A capsule fragment failed verification against its capsule and
    /// the (delegating, receiving, verifying) key triple.
    #[error("Capsule fragment verification failed")]
    CapsuleFragVerification,

    /// Fewer verified capsule fragments were supplied than the threshold
    /// requires. The caller must gather more fragments, not retry as-is.
    #[error("Insufficient capsule fragments: got {supplied}, need {required}")]
    InsufficientShares { supplied: usize, required: usize },

    /// Well-formed inputs that do not fit together cryptographically,
    /// e.g. the wrong secret key for a capsule.
    #[error("Decryption failed: {0}")]
    Decryption(String),

    // ========================================================================
    // Primitive Faults
    // ========================================================================

    /// Encapsulation failed inside the primitives library. Encryption has
    /// no caller-recoverable failure mode, so this is a system fault.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Any other unexpected fault inside the primitives library.
    #[error("Cryptographic primitive failure: {0}")]
    Primitive(String),
}
