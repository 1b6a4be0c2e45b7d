//! # Recrypt Core
//!
//! Protocol core for an Umbral threshold proxy re-encryption (PRE) workflow:
//! a delegator (A) encrypts data under her own public key, and a semi-trusted
//! proxy can later transform the ciphertext's capsule — using re-encryption
//! key fragments that A authorized — so that a delegatee (B) can decrypt,
//! without the proxy ever learning the plaintext or either secret key.
//!
//! ## Workflow Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PROXY RE-ENCRYPTION WORKFLOW                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Delegator A                    Proxy                     Delegatee B   │
//! │  ───────────                    ─────                     ───────────   │
//! │                                                                         │
//! │  encrypt(A.pk, msg)                                                     │
//! │    → (capsule, ciphertext)                                              │
//! │                                                                         │
//! │  generate_kfrags(A.sk, B.pk)                                            │
//! │    → [kfrag; shares]  ───────►  verify kfrag                            │
//! │                                 reencrypt(capsule, vkfrag)              │
//! │                                   → cfrag  ───────►  verify cfrag       │
//! │                                                      collect ≥ threshold│
//! │                                                      decrypt_reencrypted│
//! │                                                        → msg            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error taxonomy shared by every operation
//! - [`primitives`] - Thin adapter over the `umbral-pre` primitives
//! - [`codec`] - Hex encoding/decoding of protocol objects for transport
//! - [`engine`] - The five stateless protocol operations
//!
//! ## Security Properties
//!
//! 1. **Verified-type gating**: re-encryption only accepts
//!    [`VerifiedKeyFrag`] and decryption only accepts [`VerifiedCapsuleFrag`],
//!    so skipping a verification step is structurally unreachable.
//! 2. **Statelessness**: every operation is a pure function of its inputs;
//!    nothing is retained between calls.
//! 3. **Secret hygiene**: secret scalars are zeroized on drop by `umbral-pre`,
//!    and decoded secret byte buffers are zeroized after use.

pub mod codec;
pub mod engine;
pub mod error;
pub mod primitives;

pub use error::{Error, Result};

// Protocol object types, re-exported so that callers never need to depend on
// the primitives crate directly.
pub use umbral_pre::{
    Capsule, CapsuleFrag, KeyFrag, PublicKey, SecretKey, Signer, VerifiedCapsuleFrag,
    VerifiedKeyFrag,
};
