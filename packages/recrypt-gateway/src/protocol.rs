//! Gateway request/response definitions.
//!
//! One request/response pair per protocol operation, JSON over HTTP. Every
//! binary protocol object travels as lowercase hex of its canonical byte
//! encoding; `message`/`cleartext` are UTF-8 text.
//!
//! Required fields are modeled as `Option<String>` so that an absent field
//! surfaces as a 400 with a "missing field" message rather than a
//! deserialization rejection.

use serde::{Deserialize, Serialize};

// ── Error Envelope ───────────────────────────────────────────────────────────

/// Error payload returned with any non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ── Key Generation ───────────────────────────────────────────────────────────

/// Response for `GET /generate_secret_key`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateSecretKeyResponse {
    pub secret_key: String,
}

// ── Encryption ───────────────────────────────────────────────────────────────

/// Request for `POST /encrypt_message`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptMessageRequest {
    pub secret_key: Option<String>,
    /// UTF-8 plaintext.
    pub message: Option<String>,
}

/// Response for `POST /encrypt_message`. The capsule and ciphertext form an
/// inseparable pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptMessageResponse {
    pub capsule: String,
    pub ciphertext: String,
}

// ── Direct Decryption ────────────────────────────────────────────────────────

/// Request for `POST /decrypt_message` — decryption with the delegating
/// secret key itself, no fragments involved.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecryptMessageRequest {
    pub secret_key: Option<String>,
    pub capsule: Option<String>,
    pub ciphertext: Option<String>,
}

/// Response for both decryption endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct CleartextResponse {
    pub cleartext: String,
}

// ── Delegation ───────────────────────────────────────────────────────────────

/// Request for `POST /generate_reencryption_key`.
///
/// The delegatee's secret key is accepted only to derive its public key,
/// preserving the original wire contract; the engine itself works from the
/// public key alone.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateReencryptionKeyRequest {
    pub a_secret_key: Option<String>,
    pub b_secret_key: Option<String>,
    /// Minimum fragments needed to decrypt. Defaults to 1.
    pub threshold: Option<usize>,
    /// Total fragments to generate. Defaults to 1.
    pub shares: Option<usize>,
}

/// Response for `POST /generate_reencryption_key`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateReencryptionKeyResponse {
    /// The first key fragment (the full delegation when shares = 1).
    pub kfrag: String,
    /// All fragments, present only when more than one share was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kfrags: Option<Vec<String>>,
}

// ── Re-Encryption ────────────────────────────────────────────────────────────

/// Request for `POST /reencrypt_capsule` — the proxy's operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReencryptCapsuleRequest {
    pub a_secret_key: Option<String>,
    pub b_secret_key: Option<String>,
    pub capsule: Option<String>,
    pub kfrag: Option<String>,
}

/// Response for `POST /reencrypt_capsule`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReencryptCapsuleResponse {
    pub cfrag: String,
}

// ── Threshold Decryption ─────────────────────────────────────────────────────

/// Request for `POST /decrypt_reencrypted_capsule` — the delegatee's
/// operation. `cfrag` carries a single fragment (the common
/// threshold-1 case); `cfrags` carries several for threshold > 1.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecryptReencryptedCapsuleRequest {
    pub b_secret_key: Option<String>,
    pub a_secret_key: Option<String>,
    pub capsule: Option<String>,
    pub cfrag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cfrags: Option<Vec<String>>,
    pub ciphertext: Option<String>,
    /// Minimum fragments required. Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub threshold: Option<usize>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_request_deserialization() {
        let json = r#"{"secret_key": "ab12", "message": "hello"}"#;
        let request: EncryptMessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.secret_key.as_deref(), Some("ab12"));
        assert_eq!(request.message.as_deref(), Some("hello"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let request: DecryptMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(request.secret_key.is_none());
        assert!(request.capsule.is_none());
        assert!(request.ciphertext.is_none());
    }

    #[test]
    fn test_kfrags_field_is_omitted_when_absent() {
        let response = GenerateReencryptionKeyResponse {
            kfrag: "aa".to_string(),
            kfrags: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"kfrag":"aa"}"#);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "missing field `capsule`".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"error\""));
        assert!(json.contains("missing field"));
    }

    #[test]
    fn test_decrypt_reencrypted_request_accepts_fragment_list() {
        let json = r#"{
            "b_secret_key": "bb",
            "a_secret_key": "aa",
            "capsule": "cc",
            "cfrags": ["01", "02"],
            "ciphertext": "dd",
            "threshold": 2
        }"#;
        let request: DecryptReencryptedCapsuleRequest = serde_json::from_str(json).unwrap();
        assert!(request.cfrag.is_none());
        assert_eq!(request.cfrags.as_ref().unwrap().len(), 2);
        assert_eq!(request.threshold, Some(2));
    }
}
