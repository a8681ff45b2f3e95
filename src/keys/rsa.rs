// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! RSA key wrappers for PKCS#1 v1.5 and PSS signed objects.
//!
//! https://datatracker.ietf.org/doc/html/rfc8017

use crate::algo::{HashAlg, PaddingSpec, SignatureFormat};
use crate::error::{Error, Result};
use crate::pss::{self, PssParams};
use const_oid::ObjectIdentifier;
use der::{Any, Decode};
use rsa::rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use spki::AlgorithmIdentifierOwned;

fn pkcs1v15_scheme(hash: HashAlg) -> Pkcs1v15Sign {
    match hash {
        HashAlg::Sha1 => Pkcs1v15Sign::new::<sha1::Sha1>(),
        HashAlg::Sha224 => Pkcs1v15Sign::new::<sha2::Sha224>(),
        HashAlg::Sha256 => Pkcs1v15Sign::new::<sha2::Sha256>(),
        HashAlg::Sha384 => Pkcs1v15Sign::new::<sha2::Sha384>(),
        HashAlg::Sha512 => Pkcs1v15Sign::new::<sha2::Sha512>(),
    }
}

fn pss_scheme(hash: HashAlg, salt_len: usize) -> Pss {
    match hash {
        HashAlg::Sha1 => Pss::new_with_salt::<sha1::Sha1>(salt_len),
        HashAlg::Sha224 => Pss::new_with_salt::<sha2::Sha224>(salt_len),
        HashAlg::Sha256 => Pss::new_with_salt::<sha2::Sha256>(salt_len),
        HashAlg::Sha384 => Pss::new_with_salt::<sha2::Sha384>(salt_len),
        HashAlg::Sha512 => Pss::new_with_salt::<sha2::Sha512>(salt_len),
    }
}

fn mgf1(hash: HashAlg, seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + hash.size());
    let mut counter = 0u32;
    while out.len() < len {
        let mut block = seed.to_vec();
        block.extend_from_slice(&counter.to_be_bytes());
        out.extend_from_slice(&hash.digest(&block));
        counter += 1;
    }
    out.truncate(len);
    out
}

/// recovered_salt_len undoes the EMSA-PSS encoding far enough to read the
/// salt width the signer used: the salt sits after the 0x01 separator in
/// the unmasked DB field. Returns None when the encoded message does not
/// have PSS shape.
fn recovered_salt_len(key: &RsaPublicKey, hash: HashAlg, signature: &[u8]) -> Option<usize> {
    let em_bits = key.n().bits() - 1;
    let em_len = em_bits.div_ceil(8);
    let h_len = hash.size();
    if em_len < h_len + 2 {
        return None;
    }

    let s = BigUint::from_bytes_be(signature);
    if s >= *key.n() {
        return None;
    }
    let em = s.modpow(key.e(), key.n()).to_bytes_be();
    if em.len() > em_len {
        return None;
    }
    let mut padded = vec![0u8; em_len - em.len()];
    padded.extend_from_slice(&em);
    let em = padded;

    if em[em_len - 1] != 0xbc {
        return None;
    }
    let db_len = em_len - h_len - 1;
    let h = &em[db_len..em_len - 1];

    let mut db = mgf1(hash, h, db_len);
    for (b, masked) in db.iter_mut().zip(&em[..db_len]) {
        *b ^= masked;
    }
    // The signer clears the excess leftmost bits of maskedDB
    db[0] &= 0xff >> (8 * em_len - em_bits);

    let sep = db.iter().position(|&b| b != 0x00)?;
    if db[sep] != 0x01 {
        return None;
    }
    Some(db_len - sep - 1)
}

fn pkcs1v15_signature_oid(hash: HashAlg) -> ObjectIdentifier {
    match hash {
        HashAlg::Sha1 => ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5"),
        HashAlg::Sha224 => ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14"),
        HashAlg::Sha256 => ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11"),
        HashAlg::Sha384 => ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12"),
        HashAlg::Sha512 => ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13"),
    }
}

/// SecretKey contains an RSA private key bound to a padding selection made
/// at construction time.
#[derive(Clone)]
pub struct SecretKey {
    inner: RsaPrivateKey,
    padding: PaddingSpec,
}

impl SecretKey {
    /// generate creates a new, random 2048-bit private key for the given
    /// padding selection.
    pub fn generate(padding: PaddingSpec) -> Result<Self> {
        let mut rng = OsRng;

        let key = RsaPrivateKey::new(&mut rng, 2048)?;
        Self::from_key(key, padding)
    }

    /// from_key wraps an existing private key, rejecting padding selections
    /// RSA cannot execute.
    pub fn from_key(key: RsaPrivateKey, padding: PaddingSpec) -> Result<Self> {
        match padding {
            PaddingSpec::Pkcs1v15 { .. } | PaddingSpec::Pss { .. } => Ok(Self {
                inner: key,
                padding,
            }),
            _ => Err(Error::UnsupportedPadding),
        }
    }

    /// public_key retrieves the public counterpart of the secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }
}

impl super::Signer for SecretKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match self.padding {
            PaddingSpec::Pkcs1v15 { hash } => {
                let digest = hash.digest(message);
                Ok(self.inner.sign(pkcs1v15_scheme(hash), &digest)?)
            }
            PaddingSpec::Pss { hash, salt_len } => {
                let mut rng = OsRng;
                let digest = hash.digest(message);
                let scheme = pss_scheme(hash, salt_len as usize);
                Ok(self.inner.sign_with_rng(&mut rng, scheme, &digest)?)
            }
            _ => Err(Error::UnsupportedPadding),
        }
    }

    fn algorithm_identifier(&self) -> Result<AlgorithmIdentifierOwned> {
        match self.padding {
            PaddingSpec::Pkcs1v15 { hash } => Ok(AlgorithmIdentifierOwned {
                oid: pkcs1v15_signature_oid(hash),
                parameters: Some(Any::null()),
            }),
            PaddingSpec::Pss { hash, salt_len } => {
                let params = pss::encode(&PssParams::for_hash(hash, salt_len)?)?;
                Ok(AlgorithmIdentifierOwned {
                    oid: crate::algo::RSASSA_PSS_OID,
                    parameters: Some(Any::from_der(&params)?),
                })
            }
            _ => Err(Error::UnsupportedPadding),
        }
    }
}

/// PublicKey contains an RSA public key usable for verification with any of
/// the registered PKCS#1 v1.5 and PSS schemes.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// from_key wraps an existing public key.
    pub fn from_key(key: RsaPublicKey) -> Self {
        Self { inner: key }
    }
}

impl super::PublicKey for PublicKey {
    fn algo_name(&self) -> &'static str {
        "RSA"
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
        match padding {
            PaddingSpec::Pkcs1v15 { hash } => {
                let digest = hash.digest(message);
                let scheme = pkcs1v15_scheme(*hash);
                Ok(self.inner.verify(scheme, &digest, signature).is_ok())
            }
            PaddingSpec::Pss { hash, .. } => {
                // The salt length field in the parameters is not trusted;
                // the width the signer actually used is recovered from the
                // encoded message, since the backend checks the padding
                // against a fixed salt width.
                let Some(salt_len) = recovered_salt_len(&self.inner, *hash, signature) else {
                    return Ok(false);
                };
                let digest = hash.digest(message);
                let scheme = pss_scheme(*hash, salt_len);
                Ok(self.inner.verify(scheme, &digest, signature).is_ok())
            }
            _ => Err(Error::UnsupportedPadding),
        }
    }
}
