//! # Object Codec
//!
//! Deterministic, lossless mapping between each protocol object and its
//! transport form: lowercase hex of the object's canonical fixed-format byte
//! encoding, as defined by `umbral-pre`.
//!
//! Decoding is all-or-nothing. Each `decode_*` function is fixed to one
//! object type; odd-length strings, non-hex characters, and byte lengths
//! that do not match the declared type are all rejected as [`Error::Input`],
//! never truncated or partially parsed. The round-trip law
//! `decode(encode(x)) == x` holds for every supported type.
//!
//! Decoded secret-key bytes travel through a [`Zeroizing`] buffer so the
//! scalar never outlives the call in a plain allocation.

use umbral_pre::{
    Capsule, CapsuleFrag, DeserializableFromArray, KeyFrag, PublicKey, SecretKey,
    SerializableToArray, SerializableToSecretArray, VerifiedCapsuleFrag,
};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

// ── Decoding ─────────────────────────────────────────────────────────────────

/// Decode a hex string into raw bytes. `kind` names the field in errors.
pub fn decode_bytes(kind: &str, input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| Error::Input(format!("{kind}: invalid hex: {e}")))
}

/// Decode a hex string into one fixed-format protocol object.
/// The underlying parse rejects any byte length that does not match the
/// declared type's schema.
fn decode_object<T: DeserializableFromArray>(kind: &str, input: &str) -> Result<T> {
    let bytes = Zeroizing::new(decode_bytes(kind, input)?);
    T::from_bytes(bytes.as_slice()).map_err(|e| Error::Input(format!("{kind}: {e}")))
}

/// Decode a secret key scalar from hex.
pub fn decode_secret_key(input: &str) -> Result<SecretKey> {
    decode_secret_key_field("secret_key", input)
}

/// Decode a secret key scalar from hex, naming the originating field in
/// errors (callers carry several role keys per request).
pub fn decode_secret_key_field(kind: &str, input: &str) -> Result<SecretKey> {
    decode_object(kind, input)
}

/// Decode a compressed public key point from hex.
pub fn decode_public_key(input: &str) -> Result<PublicKey> {
    decode_object("public_key", input)
}

/// Decode a capsule from hex.
pub fn decode_capsule(input: &str) -> Result<Capsule> {
    decode_object("capsule", input)
}

/// Decode a key fragment from hex. The result is unverified; it only becomes
/// usable for re-encryption after [`crate::primitives::verify_kfrag`].
pub fn decode_kfrag(input: &str) -> Result<KeyFrag> {
    decode_object("kfrag", input)
}

/// Decode a capsule fragment from hex. The result is unverified; decryption
/// only accepts it after [`crate::primitives::verify_cfrag`].
pub fn decode_cfrag(input: &str) -> Result<CapsuleFrag> {
    decode_object("cfrag", input)
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Encode raw bytes as lowercase hex. Total and deterministic.
pub fn encode_bytes(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Encode a secret key scalar as hex.
///
/// The intermediate byte buffer is zeroized on drop; the returned string is
/// the caller's responsibility (it exists precisely to be transmitted).
pub fn encode_secret_key(sk: &SecretKey) -> String {
    let secret = sk.to_secret_array();
    hex::encode(secret.as_secret().as_slice())
}

/// Encode a public key as hex.
pub fn encode_public_key(pk: &PublicKey) -> String {
    hex::encode(pk.to_array().as_slice())
}

/// Encode a capsule as hex.
pub fn encode_capsule(capsule: &Capsule) -> String {
    hex::encode(capsule.to_array().as_slice())
}

/// Encode a key fragment (network form) as hex.
pub fn encode_kfrag(kfrag: &KeyFrag) -> String {
    hex::encode(kfrag.to_array().as_slice())
}

/// Encode a capsule fragment as hex. Only verified fragments are ever
/// produced by the engine, so encoding starts from the verified type; the
/// byte form is identical to the unverified fragment's.
pub fn encode_cfrag(cfrag: &VerifiedCapsuleFrag) -> String {
    hex::encode(cfrag.to_array().as_slice())
}

// ============================================================================
// TESTS
// ============================================================================
