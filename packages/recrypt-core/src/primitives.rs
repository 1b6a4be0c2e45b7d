//! # Cryptographic Primitives Adapter
//!
//! Thin wrappers around `umbral-pre`. Every primitive the engine needs is
//! funneled through this module so the rest of the crate depends on one
//! stable surface: key generation, encapsulation, fragment generation,
//! fragment verification, re-encryption, and the two decryption paths.
//!
//! The adapter contains no protocol logic of its own — it only maps the
//! primitive library's error values onto the crate taxonomy in [`crate::error`].

use umbral_pre::{
    Capsule, CapsuleFrag, KeyFrag, OpenReencryptedError, PublicKey, ReencryptionError, SecretKey,
    Signer, VerifiedCapsuleFrag, VerifiedKeyFrag,
};

use crate::error::{Error, Result};

/// Generate a fresh random secret key.
///
/// Uses the operating system's secure random number generator.
pub fn keygen() -> SecretKey {
    SecretKey::random()
}

/// Derive the public key for a secret key. Deterministic.
pub fn derive_public(sk: &SecretKey) -> PublicKey {
    sk.public_key()
}

/// Encapsulate a fresh symmetric key for `pk` and encrypt `plaintext` with it.
///
/// Returns the capsule and the ciphertext as an inseparable pair — a capsule
/// only ever opens the ciphertext it was produced with.
pub fn encrypt(pk: &PublicKey, plaintext: &[u8]) -> Result<(Capsule, Box<[u8]>)> {
    umbral_pre::encrypt(pk, plaintext).map_err(|e| Error::Encryption(e.to_string()))
}

/// Generate `shares` re-encryption key fragments delegating from
/// `delegating_sk` to `receiving_pk`, any `threshold` of which suffice to
/// decrypt. Both role keys are signed into each fragment.
pub fn generate_kfrags(
    delegating_sk: &SecretKey,
    receiving_pk: &PublicKey,
    signer: &Signer,
    threshold: usize,
    shares: usize,
) -> Vec<VerifiedKeyFrag> {
    umbral_pre::generate_kfrags(delegating_sk, receiving_pk, signer, threshold, shares, true, true)
        .into_vec()
}

/// Verify a key fragment's signature and role binding.
///
/// This is the only way to obtain a [`VerifiedKeyFrag`], which is the only
/// form [`reencrypt`] accepts.
pub fn verify_kfrag(
    kfrag: KeyFrag,
    verifying_pk: &PublicKey,
    delegating_pk: &PublicKey,
    receiving_pk: &PublicKey,
) -> Result<VerifiedKeyFrag> {
    kfrag
        .verify(verifying_pk, Some(delegating_pk), Some(receiving_pk))
        .map_err(|_| Error::KeyFragVerification)
}

/// Apply a verified key fragment to a capsule, producing one proxy's
/// transformed share.
pub fn reencrypt(capsule: &Capsule, kfrag: VerifiedKeyFrag) -> VerifiedCapsuleFrag {
    umbral_pre::reencrypt(capsule, kfrag)
}

/// Verify a capsule fragment against the capsule it claims to transform and
/// the key triple used at kfrag-generation time.
pub fn verify_cfrag(
    cfrag: CapsuleFrag,
    capsule: &Capsule,
    verifying_pk: &PublicKey,
    delegating_pk: &PublicKey,
    receiving_pk: &PublicKey,
) -> Result<VerifiedCapsuleFrag> {
    cfrag
        .verify(capsule, verifying_pk, delegating_pk, receiving_pk)
        .map_err(|_| Error::CapsuleFragVerification)
}

/// Decrypt with the delegating secret key directly (no fragments involved).
pub fn decrypt_direct(sk: &SecretKey, capsule: &Capsule, ciphertext: &[u8]) -> Result<Vec<u8>> {
    umbral_pre::decrypt_original(sk, capsule, ciphertext)
        .map(|plaintext| plaintext.into_vec())
        .map_err(|e| Error::Decryption(e.to_string()))
}

/// Open a capsule with the receiving secret key plus a set of verified
/// capsule fragments, then decrypt the ciphertext.
pub fn decrypt_with_shares(
    receiving_sk: &SecretKey,
    delegating_pk: &PublicKey,
    capsule: &Capsule,
    cfrags: Vec<VerifiedCapsuleFrag>,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    umbral_pre::decrypt_reencrypted(receiving_sk, delegating_pk, capsule, cfrags, ciphertext)
        .map(|plaintext| plaintext.into_vec())
        .map_err(|e| match e {
            ReencryptionError::OnOpen(open) => match open {
                OpenReencryptedError::NoCapsuleFrags => Error::InsufficientShares {
                    supplied: 0,
                    required: 1,
                },
                OpenReencryptedError::RepeatingCapsuleFrags => {
                    Error::Input("repeated capsule fragments".to_string())
                }
                OpenReencryptedError::MismatchedCapsuleFrags => {
                    Error::Input("capsule fragments from different delegations".to_string())
                }
                other => Error::Decryption(other.to_string()),
            },
            ReencryptionError::OnDecryption(err) => Error::Decryption(err.to_string()),
        })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keygen_produces_distinct_keys() {
        let sk1 = keygen();
        let sk2 = keygen();
        assert_ne!(derive_public(&sk1), derive_public(&sk2));
    }

    #[test]
    fn test_derive_public_is_deterministic() {
        let sk = keygen();
        assert_eq!(derive_public(&sk), derive_public(&sk));
    }

    #[test]
    fn test_encrypt_decrypt_direct() {
        let sk = keygen();
        let pk = derive_public(&sk);

        let (capsule, ciphertext) = encrypt(&pk, b"peace at dawn").unwrap();
        let plaintext = decrypt_direct(&sk, &capsule, &ciphertext).unwrap();
        assert_eq!(plaintext, b"peace at dawn");
    }

    #[test]
    fn test_decrypt_direct_with_wrong_key_fails() {
        let sk = keygen();
        let pk = derive_public(&sk);
        let other_sk = keygen();

        let (capsule, ciphertext) = encrypt(&pk, b"peace at dawn").unwrap();
        let result = decrypt_direct(&other_sk, &capsule, &ciphertext);
        assert!(matches!(result, Err(Error::Decryption(_))));
    }

    #[test]
    fn test_kfrag_verification_rejects_wrong_roles() {
        let a_sk = keygen();
        let b_sk = keygen();
        let b_pk = derive_public(&b_sk);
        let stranger_pk = derive_public(&keygen());

        let signer = Signer::new(a_sk.clone());
        let kfrags = generate_kfrags(&a_sk, &b_pk, &signer, 1, 1);
        let kfrag = kfrags.into_iter().next().unwrap().unverify();

        // Wrong receiving key: role binding must fail.
        let a_pk = derive_public(&a_sk);
        let verifying_pk = signer.verifying_key();
        let result = verify_kfrag(kfrag, &verifying_pk, &a_pk, &stranger_pk);
        assert!(matches!(result, Err(Error::KeyFragVerification)));
    }
}
