//! Route handlers — one per protocol operation.
//!
//! Each handler validates field presence, decodes protocol objects through
//! the core codec, invokes exactly one engine operation, and encodes the
//! result. No cryptographic logic lives here, and no state is shared across
//! requests — every call is independent and idempotent for its inputs.
//!
//! Secret key material arrives hex-encoded in the request body (a deliberate
//! property of this workflow's wire contract); the decoded hex strings are
//! zeroized as soon as the typed key is constructed.

use axum::Json;
use recrypt_core::{codec, engine, CapsuleFrag, SecretKey};
use serde_json::{json, Value};
use zeroize::Zeroize;

use crate::error::{require, ApiError};
use crate::protocol::{
    CleartextResponse, DecryptMessageRequest, DecryptReencryptedCapsuleRequest,
    EncryptMessageRequest, EncryptMessageResponse, GenerateReencryptionKeyRequest,
    GenerateReencryptionKeyResponse, GenerateSecretKeyResponse, ReencryptCapsuleRequest,
    ReencryptCapsuleResponse,
};

type HandlerResult<T> = Result<Json<T>, ApiError>;

/// Unwrap and decode a secret-key field, zeroizing the hex string.
fn decode_secret_field(name: &str, field: Option<String>) -> Result<SecretKey, ApiError> {
    let mut hex_str = require(name, field)?;
    let decoded = codec::decode_secret_key_field(name, &hex_str);
    hex_str.zeroize();
    Ok(decoded?)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "recrypt-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /generate_secret_key
///
/// Generate a fresh secret key for any role (delegator or delegatee).
pub async fn generate_secret_key() -> Json<GenerateSecretKeyResponse> {
    let sk = engine::generate_secret_key();
    Json(GenerateSecretKeyResponse {
        secret_key: codec::encode_secret_key(&sk),
    })
}

/// POST /encrypt_message
///
/// Encrypt a UTF-8 message under the caller's own public key (derived from
/// the supplied secret key). Returns the capsule/ciphertext pair.
pub async fn encrypt_message(
    Json(request): Json<EncryptMessageRequest>,
) -> HandlerResult<EncryptMessageResponse> {
    let sk = decode_secret_field("secret_key", request.secret_key)?;
    let message = require("message", request.message)?;

    let (capsule, ciphertext) = engine::encrypt(&sk, message.as_bytes())?;

    Ok(Json(EncryptMessageResponse {
        capsule: codec::encode_capsule(&capsule),
        ciphertext: codec::encode_bytes(&ciphertext),
    }))
}

/// POST /decrypt_message
///
/// Direct decryption with the delegating secret key. A caller who holds any
/// other key gets a 400 — there is no fragment-free path for a delegatee.
pub async fn decrypt_message(
    Json(request): Json<DecryptMessageRequest>,
) -> HandlerResult<CleartextResponse> {
    let sk = decode_secret_field("secret_key", request.secret_key)?;
    let capsule = codec::decode_capsule(&require("capsule", request.capsule)?)?;
    let ciphertext = codec::decode_bytes("ciphertext", &require("ciphertext", request.ciphertext)?)?;

    let plaintext = engine::decrypt_direct(&sk, &capsule, &ciphertext)?;
    let cleartext = String::from_utf8(plaintext)
        .map_err(|_| recrypt_core::Error::Input("cleartext is not valid UTF-8".to_string()))?;

    Ok(Json(CleartextResponse { cleartext }))
}

/// POST /generate_reencryption_key
///
/// The delegator authorizes re-encryption toward the delegatee. The
/// delegatee's secret key is used only to derive its public key; the engine
/// never sees it.
pub async fn generate_reencryption_key(
    Json(request): Json<GenerateReencryptionKeyRequest>,
) -> HandlerResult<GenerateReencryptionKeyResponse> {
    let a_sk = decode_secret_field("a_secret_key", request.a_secret_key)?;
    let b_sk = decode_secret_field("b_secret_key", request.b_secret_key)?;
    let b_pk = engine::derive_public_key(&b_sk);

    let threshold = request.threshold.unwrap_or(1);
    let shares = request.shares.unwrap_or(1);

    let kfrags = engine::generate_kfrags(&a_sk, &b_pk, threshold, shares)?;
    let mut encoded: Vec<String> = kfrags.iter().map(codec::encode_kfrag).collect();
    let kfrag = encoded
        .first()
        .cloned()
        .ok_or_else(|| recrypt_core::Error::Primitive("no key fragments produced".to_string()))?;
    let kfrags = if encoded.len() > 1 {
        Some(std::mem::take(&mut encoded))
    } else {
        None
    };

    Ok(Json(GenerateReencryptionKeyResponse { kfrag, kfrags }))
}

/// POST /reencrypt_capsule
///
/// The proxy's operation: verify the key fragment against the delegation's
/// key triple, then transform the capsule. Verification failure aborts the
/// request before any re-encryption happens.
pub async fn reencrypt_capsule(
    Json(request): Json<ReencryptCapsuleRequest>,
) -> HandlerResult<ReencryptCapsuleResponse> {
    let a_sk = decode_secret_field("a_secret_key", request.a_secret_key)?;
    let b_sk = decode_secret_field("b_secret_key", request.b_secret_key)?;
    let capsule = codec::decode_capsule(&require("capsule", request.capsule)?)?;
    let kfrag = codec::decode_kfrag(&require("kfrag", request.kfrag)?)?;

    let a_pk = engine::derive_public_key(&a_sk);
    let b_pk = engine::derive_public_key(&b_sk);

    // Self-verification policy: the delegator signed her own kfrags, so the
    // delegating key doubles as the verifying key.
    let cfrag = engine::reencrypt(&capsule, kfrag, &a_pk, &b_pk, &a_pk)?;

    Ok(Json(ReencryptCapsuleResponse {
        cfrag: codec::encode_cfrag(&cfrag),
    }))
}

/// POST /decrypt_reencrypted_capsule
///
/// The delegatee's operation: verify each capsule fragment, enforce the
/// threshold, combine the shares, and decrypt.
pub async fn decrypt_reencrypted_capsule(
    Json(request): Json<DecryptReencryptedCapsuleRequest>,
) -> HandlerResult<CleartextResponse> {
    let b_sk = decode_secret_field("b_secret_key", request.b_secret_key)?;
    let a_sk = decode_secret_field("a_secret_key", request.a_secret_key)?;
    let capsule = codec::decode_capsule(&require("capsule", request.capsule)?)?;
    let ciphertext = codec::decode_bytes("ciphertext", &require("ciphertext", request.ciphertext)?)?;

    let fragment_hex: Vec<String> = match (request.cfrag, request.cfrags) {
        (Some(single), None) => vec![single],
        (None, Some(list)) if !list.is_empty() => list,
        (Some(_), Some(_)) => {
            return Err(recrypt_core::Error::Input(
                "provide either `cfrag` or `cfrags`, not both".to_string(),
            )
            .into())
        }
        _ => return Err(recrypt_core::Error::Input("missing field `cfrag`".to_string()).into()),
    };
    let cfrags: Vec<CapsuleFrag> = fragment_hex
        .iter()
        .map(|hex_str| codec::decode_cfrag(hex_str))
        .collect::<recrypt_core::Result<_>>()?;

    let threshold = request.threshold.unwrap_or(1);
    let a_pk = engine::derive_public_key(&a_sk);

    let plaintext =
        engine::decrypt_reencrypted(&b_sk, &a_pk, &a_pk, &capsule, cfrags, threshold, &ciphertext)?;
    let cleartext = String::from_utf8(plaintext)
        .map_err(|_| recrypt_core::Error::Input("cleartext is not valid UTF-8".to_string()))?;

    Ok(Json(CleartextResponse { cleartext }))
}

// ============================================================================
// TESTS
// ============================================================================
