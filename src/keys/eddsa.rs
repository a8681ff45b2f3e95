// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Ed25519 key wrappers for signed objects.
//!
//! https://datatracker.ietf.org/doc/html/rfc8032

use crate::algo::{ED25519_OID, PaddingSpec, SignatureFormat};
use crate::error::{Error, Result};
use ed25519_dalek::ed25519::signature::rand_core::OsRng;
use ed25519_dalek::{Signature, Signer as _, Verifier as _};
use spki::AlgorithmIdentifierOwned;

/// SecretKey contains an Ed25519 private key usable for signing.
#[derive(Clone)]
pub struct SecretKey {
    inner: ed25519_dalek::SigningKey,
}

impl SecretKey {
    /// generate creates a new, random private key.
    pub fn generate() -> SecretKey {
        let mut rng = OsRng;

        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut rng),
        }
    }

    /// public_key retrieves the public counterpart of the secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key(),
        }
    }
}

impl super::Signer for SecretKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.inner.sign(message).to_bytes().to_vec())
    }

    fn algorithm_identifier(&self) -> Result<AlgorithmIdentifierOwned> {
        // Per RFC 8410 the Ed25519 identifier carries no parameters
        Ok(AlgorithmIdentifierOwned {
            oid: ED25519_OID,
            parameters: None,
        })
    }
}

/// PublicKey contains an Ed25519 public key usable for verification.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// from_key wraps an existing public key.
    pub fn from_key(key: ed25519_dalek::VerifyingKey) -> Self {
        Self { inner: key }
    }
}

impl super::PublicKey for PublicKey {
    fn algo_name(&self) -> &'static str {
        "Ed25519"
    }

    fn message_parts(&self) -> usize {
        1
    }

    fn verify(
        &self,
        padding: &PaddingSpec,
        _format: SignatureFormat,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let PaddingSpec::Pure = padding else {
            return Err(Error::UnsupportedPadding);
        };
        let Ok(parsed) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(self.inner.verify(message, &parsed).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{PublicKey as _, Signer as _};

    // Tests signing and verifying messages. Note, this test is not meant to
    // test cryptography, it is mostly an API sanity check to verify that
    // everything seems to work.
    #[test]
    fn test_sign_verify() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let message = b"message to authenticate";
        let signature = secret.sign(message).unwrap();

        assert!(
            public
                .verify(&PaddingSpec::Pure, SignatureFormat::Fixed, message, &signature)
                .unwrap()
        );
        assert!(
            !public
                .verify(
                    &PaddingSpec::Pure,
                    SignatureFormat::Fixed,
                    b"other message",
                    &signature
                )
                .unwrap()
        );
    }
}
