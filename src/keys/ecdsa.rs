// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! ECDSA P-256 key wrappers for signed objects.
//!
//! https://datatracker.ietf.org/doc/html/rfc5758

use crate::algo::{HashAlg, PaddingSpec, SignatureFormat};
use crate::error::{Error, Result};
use const_oid::ObjectIdentifier;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::rand_core::OsRng;
use spki::AlgorithmIdentifierOwned;

fn signature_oid(hash: HashAlg) -> ObjectIdentifier {
    match hash {
        HashAlg::Sha1 => ObjectIdentifier::new_unwrap("1.2.840.10045.4.1"),
        HashAlg::Sha224 => ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.1"),
        HashAlg::Sha256 => ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2"),
        HashAlg::Sha384 => ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3"),
        HashAlg::Sha512 => ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4"),
    }
}

/// SecretKey contains a P-256 private key bound to a digest selection made
/// at construction time. Signatures are emitted in the DER r,s form.
#[derive(Clone)]
pub struct SecretKey {
    inner: SigningKey,
    hash: HashAlg,
}

impl SecretKey {
    /// generate creates a new, random private key signing with the given
    /// digest.
    pub fn generate(hash: HashAlg) -> SecretKey {
        let mut rng = OsRng;

        Self {
            inner: SigningKey::random(&mut rng),
            hash,
        }
    }

    /// public_key retrieves the public counterpart of the secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: *self.inner.verifying_key(),
        }
    }
}

impl super::Signer for SecretKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let digest = self.hash.digest(message);
        let signature: Signature = self.inner.sign_prehash(&digest)?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn algorithm_identifier(&self) -> Result<AlgorithmIdentifierOwned> {
        // Per RFC 5758 the ecdsa-with-SHA2 identifiers carry no parameters
        Ok(AlgorithmIdentifierOwned {
            oid: signature_oid(self.hash),
            parameters: None,
        })
    }
}

/// PublicKey contains a P-256 public key usable for verification.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// from_key wraps an existing public key.
    pub fn from_key(key: VerifyingKey) -> Self {
        Self { inner: key }
    }
}

impl super::PublicKey for PublicKey {
    fn algo_name(&self) -> &'static str {
        "ECDSA"
    }

    fn message_parts(&self) -> usize {
        // An ECDSA signature carries the two components r and s
        2
    }

    fn verify(
        &self,
        padding: &PaddingSpec,
        format: SignatureFormat,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let PaddingSpec::Ieee1363 { hash } = padding else {
            return Err(Error::UnsupportedPadding);
        };
        let parsed = match format {
            SignatureFormat::DerSequence => Signature::from_der(signature),
            SignatureFormat::Fixed => Signature::from_slice(signature),
        };
        let Ok(parsed) = parsed else {
            return Ok(false);
        };
        let digest = hash.digest(message);
        Ok(self.inner.verify_prehash(&digest, &parsed).is_ok())
    }
}
