//! # PRE Protocol Engine
//!
//! The five stateless protocol operations. Each one composes primitives from
//! [`crate::primitives`] with the pre- and post-condition checks that make
//! the delegation state machine safe:
//!
//! ```text
//! NoKey → KeyGenerated → Encrypted → KFragIssued → KFragVerified
//!       → CapsuleReencrypted → Decryptable
//! ```
//!
//! Every transition is triggered by exactly one operation here, and no
//! operation can skip a required predecessor: re-encryption only accepts a
//! key fragment that just passed verification, and threshold decryption
//! verifies every capsule fragment before combining. All functions are pure
//! with respect to their inputs — the engine holds no state, so concurrent
//! callers need no coordination.

use umbral_pre::{
    Capsule, CapsuleFrag, KeyFrag, PublicKey, SecretKey, SerializableToArray, Signer,
    VerifiedCapsuleFrag,
};

use crate::error::{Error, Result};
use crate::primitives;

/// Generate a fresh random secret key.
pub fn generate_secret_key() -> SecretKey {
    primitives::keygen()
}

/// Derive the public key belonging to a secret key.
pub fn derive_public_key(sk: &SecretKey) -> PublicKey {
    primitives::derive_public(sk)
}

/// Encrypt `message` under the key holder's own public key, derived from
/// `delegating_sk`. Returns the capsule/ciphertext pair; the two are only
/// meaningful together.
pub fn encrypt(delegating_sk: &SecretKey, message: &[u8]) -> Result<(Capsule, Vec<u8>)> {
    if message.is_empty() {
        return Err(Error::Input("message must not be empty".to_string()));
    }

    let pk = primitives::derive_public(delegating_sk);
    let (capsule, ciphertext) = primitives::encrypt(&pk, message)?;
    Ok((capsule, ciphertext.into_vec()))
}

/// Generate `shares` re-encryption key fragments delegating decryption rights
/// from the holder of `delegating_sk` to the holder of `receiving_pk`.
///
/// The delegator signs each fragment herself (`Signer` built from
/// `delegating_sk`), so the delegating public key doubles as the verifying
/// key downstream. Fragments are returned in unverified network form — the
/// consuming side always re-verifies.
pub fn generate_kfrags(
    delegating_sk: &SecretKey,
    receiving_pk: &PublicKey,
    threshold: usize,
    shares: usize,
) -> Result<Vec<KeyFrag>> {
    if threshold == 0 {
        return Err(Error::Input("threshold must be at least 1".to_string()));
    }
    if threshold > shares {
        return Err(Error::Input(format!(
            "threshold ({threshold}) cannot exceed shares ({shares})"
        )));
    }

    let signer = Signer::new(delegating_sk.clone());
    let kfrags = primitives::generate_kfrags(delegating_sk, receiving_pk, &signer, threshold, shares)
        .into_iter()
        .map(|vkfrag| vkfrag.unverify())
        .collect();
    Ok(kfrags)
}

/// Verify a key fragment and, only on success, apply it to the capsule.
///
/// Verification is a hard gate: a fragment that fails the signature or
/// role-binding check is discarded and re-encryption never runs. A fragment
/// generated for any other (delegating, receiving) pair fails here.
pub fn reencrypt(
    capsule: &Capsule,
    kfrag: KeyFrag,
    delegating_pk: &PublicKey,
    receiving_pk: &PublicKey,
    verifying_pk: &PublicKey,
) -> Result<VerifiedCapsuleFrag> {
    let verified = primitives::verify_kfrag(kfrag, verifying_pk, delegating_pk, receiving_pk)?;
    Ok(primitives::reencrypt(capsule, verified))
}

/// Decrypt a capsule/ciphertext pair directly with the delegating secret key.
///
/// No fragments are involved. A caller holding any other key gets a
/// decryption failure — there is no silent-success path for a recipient who
/// lacks the delegating key.
pub fn decrypt_direct(sk: &SecretKey, capsule: &Capsule, ciphertext: &[u8]) -> Result<Vec<u8>> {
    primitives::decrypt_direct(sk, capsule, ciphertext)
}

/// Decrypt a re-encrypted capsule with the receiving secret key and at least
/// `threshold` capsule fragments.
///
/// Every supplied fragment is verified against the capsule and the
/// (delegating, receiving, verifying) key triple before it counts toward the
/// threshold; fragments from a different capsule or delegation fail that
/// check. Only distinct fragments count: byte-identical duplicates are
/// collapsed before the threshold comparison, so submitting the same
/// fragment twice cannot satisfy a threshold of two.
pub fn decrypt_reencrypted(
    receiving_sk: &SecretKey,
    delegating_pk: &PublicKey,
    verifying_pk: &PublicKey,
    capsule: &Capsule,
    cfrags: Vec<CapsuleFrag>,
    threshold: usize,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    if threshold == 0 {
        return Err(Error::Input("threshold must be at least 1".to_string()));
    }

    let mut seen: Vec<Vec<u8>> = Vec::with_capacity(cfrags.len());
    let mut distinct: Vec<CapsuleFrag> = Vec::with_capacity(cfrags.len());
    for cfrag in cfrags {
        let bytes = cfrag.to_array().as_slice().to_vec();
        if seen.contains(&bytes) {
            continue;
        }
        seen.push(bytes);
        distinct.push(cfrag);
    }
    if distinct.len() < threshold {
        return Err(Error::InsufficientShares {
            supplied: distinct.len(),
            required: threshold,
        });
    }

    let receiving_pk = primitives::derive_public(receiving_sk);
    let verified: Vec<VerifiedCapsuleFrag> = distinct
        .into_iter()
        .map(|cfrag| {
            primitives::verify_cfrag(cfrag, capsule, verifying_pk, delegating_pk, &receiving_pk)
        })
        .collect::<Result<_>>()?;

    primitives::decrypt_with_shares(receiving_sk, delegating_pk, capsule, verified, ciphertext)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    fn keypair() -> (SecretKey, PublicKey) {
        let sk = generate_secret_key();
        let pk = derive_public_key(&sk);
        (sk, pk)
    }

    /// Round-trips a verified cfrag through the codec, as it would travel
    /// from the proxy to the delegatee.
    fn to_network_form(cfrag: &VerifiedCapsuleFrag) -> CapsuleFrag {
        codec::decode_cfrag(&codec::encode_cfrag(cfrag)).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_direct_round_trip() {
        let (sk, _pk) = keypair();
        let (capsule, ciphertext) = encrypt(&sk, b"attack at dawn").unwrap();
        let plaintext = decrypt_direct(&sk, &capsule, &ciphertext).unwrap();
        assert_eq!(plaintext, b"attack at dawn");
    }

    #[test]
    fn test_encrypt_rejects_empty_message() {
        let (sk, _pk) = keypair();
        assert!(matches!(encrypt(&sk, b""), Err(Error::Input(_))));
    }

    #[test]
    fn test_full_delegation_scenario() {
        // The canonical workflow: A encrypts "hello", delegates to B with
        // threshold = shares = 1, the proxy re-encrypts, B decrypts.
        let (a_sk, a_pk) = keypair();
        let (capsule, ciphertext) = encrypt(&a_sk, b"hello").unwrap();
        assert_eq!(decrypt_direct(&a_sk, &capsule, &ciphertext).unwrap(), b"hello");

        let (b_sk, b_pk) = keypair();
        let kfrags = generate_kfrags(&a_sk, &b_pk, 1, 1).unwrap();
        assert_eq!(kfrags.len(), 1);

        let kfrag = kfrags.into_iter().next().unwrap();
        let cfrag = reencrypt(&capsule, kfrag, &a_pk, &b_pk, &a_pk).unwrap();

        let plaintext = decrypt_reencrypted(
            &b_sk,
            &a_pk,
            &a_pk,
            &capsule,
            vec![to_network_form(&cfrag)],
            1,
            &ciphertext,
        )
        .unwrap();
        assert_eq!(plaintext, b"hello");
    }

    #[test]
    fn test_generate_kfrags_validates_threshold() {
        let (a_sk, _) = keypair();
        let (_, b_pk) = keypair();
        assert!(matches!(
            generate_kfrags(&a_sk, &b_pk, 0, 1),
            Err(Error::Input(_))
        ));
        assert!(matches!(
            generate_kfrags(&a_sk, &b_pk, 3, 2),
            Err(Error::Input(_))
        ));
    }

    #[test]
    fn test_kfrag_for_other_delegation_is_rejected() {
        // A kfrag generated by A' for B must never re-encrypt A's capsule.
        let (a_sk, a_pk) = keypair();
        let (other_sk, _) = keypair();
        let (_, b_pk) = keypair();

        let (capsule, _ciphertext) = encrypt(&a_sk, b"hello").unwrap();
        let kfrag = generate_kfrags(&other_sk, &b_pk, 1, 1)
            .unwrap()
            .into_iter()
            .next()
            .unwrap();

        let result = reencrypt(&capsule, kfrag, &a_pk, &b_pk, &a_pk);
        assert!(matches!(result, Err(Error::KeyFragVerification)));
    }

    #[test]
    fn test_cfrag_from_other_capsule_is_rejected() {
        let (a_sk, a_pk) = keypair();
        let (b_sk, b_pk) = keypair();

        let (capsule_one, _ciphertext_one) = encrypt(&a_sk, b"first").unwrap();
        let (capsule_two, ciphertext_two) = encrypt(&a_sk, b"second").unwrap();

        let kfrag = generate_kfrags(&a_sk, &b_pk, 1, 1)
            .unwrap()
            .into_iter()
            .next()
            .unwrap();
        let cfrag_one = reencrypt(&capsule_one, kfrag, &a_pk, &b_pk, &a_pk).unwrap();

        // A fragment derived from capsule one cannot open capsule two.
        let result = decrypt_reencrypted(
            &b_sk,
            &a_pk,
            &a_pk,
            &capsule_two,
            vec![to_network_form(&cfrag_one)],
            1,
            &ciphertext_two,
        );
        assert!(matches!(result, Err(Error::CapsuleFragVerification)));
    }

    #[test]
    fn test_threshold_two_of_three() {
        let (a_sk, a_pk) = keypair();
        let (b_sk, b_pk) = keypair();
        let (capsule, ciphertext) = encrypt(&a_sk, b"threshold secret").unwrap();

        let kfrags = generate_kfrags(&a_sk, &b_pk, 2, 3).unwrap();
        assert_eq!(kfrags.len(), 3);

        let cfrags: Vec<CapsuleFrag> = kfrags
            .into_iter()
            .map(|kfrag| {
                let cfrag = reencrypt(&capsule, kfrag, &a_pk, &b_pk, &a_pk).unwrap();
                to_network_form(&cfrag)
            })
            .collect();

        // One fragment is not enough.
        let result = decrypt_reencrypted(
            &b_sk,
            &a_pk,
            &a_pk,
            &capsule,
            vec![cfrags[0].clone()],
            2,
            &ciphertext,
        );
        assert!(matches!(
            result,
            Err(Error::InsufficientShares {
                supplied: 1,
                required: 2
            })
        ));

        // Any two of the three fragments yield the identical plaintext.
        for pair in [[0, 1], [1, 2], [0, 2]] {
            let picked = vec![cfrags[pair[0]].clone(), cfrags[pair[1]].clone()];
            let plaintext =
                decrypt_reencrypted(&b_sk, &a_pk, &a_pk, &capsule, picked, 2, &ciphertext)
                    .unwrap();
            assert_eq!(plaintext, b"threshold secret");
        }
    }

    #[test]
    fn test_duplicate_cfrags_do_not_satisfy_threshold() {
        let (a_sk, a_pk) = keypair();
        let (b_sk, b_pk) = keypair();
        let (capsule, ciphertext) = encrypt(&a_sk, b"no doubles").unwrap();

        let kfrags = generate_kfrags(&a_sk, &b_pk, 2, 3).unwrap();
        let kfrag = kfrags.into_iter().next().unwrap();
        let cfrag = reencrypt(&capsule, kfrag, &a_pk, &b_pk, &a_pk).unwrap();

        // The same fragment twice collapses to one distinct share, which is
        // under threshold.
        let doubled = vec![to_network_form(&cfrag), to_network_form(&cfrag)];
        let result =
            decrypt_reencrypted(&b_sk, &a_pk, &a_pk, &capsule, doubled, 2, &ciphertext);
        assert!(matches!(
            result,
            Err(Error::InsufficientShares {
                supplied: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_decrypt_reencrypted_with_no_fragments_fails() {
        let (a_sk, a_pk) = keypair();
        let (b_sk, _) = keypair();
        let (capsule, ciphertext) = encrypt(&a_sk, b"hello").unwrap();

        let result =
            decrypt_reencrypted(&b_sk, &a_pk, &a_pk, &capsule, Vec::new(), 1, &ciphertext);
        assert!(matches!(
            result,
            Err(Error::InsufficientShares {
                supplied: 0,
                required: 1
            })
        ));
    }

    #[test]
    fn test_mismatched_capsule_and_ciphertext_fail_direct() {
        let (sk, _pk) = keypair();
        let (capsule_one, _ciphertext_one) = encrypt(&sk, b"first").unwrap();
        let (_capsule_two, ciphertext_two) = encrypt(&sk, b"second").unwrap();

        // The capsule from one encryption cannot open another's ciphertext.
        let result = decrypt_direct(&sk, &capsule_one, &ciphertext_two);
        assert!(matches!(result, Err(Error::Decryption(_))));
    }
}
