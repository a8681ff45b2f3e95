// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Signature algorithm registry and padding taxonomy.
//!
//! https://datatracker.ietf.org/doc/html/rfc5912

use const_oid::ObjectIdentifier;
use sha2::Digest;

/// OID for the SHA-1 digest: 1.3.14.3.2.26
pub const SHA1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");

/// OID for the SHA-224 digest: 2.16.840.1.101.3.4.2.4
pub const SHA224_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");

/// OID for the SHA-256 digest: 2.16.840.1.101.3.4.2.1
pub const SHA256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");

/// OID for the SHA-384 digest: 2.16.840.1.101.3.4.2.2
pub const SHA384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");

/// OID for the SHA-512 digest: 2.16.840.1.101.3.4.2.3
pub const SHA512_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

/// OID for MGF1: 1.2.840.113549.1.1.8
pub const MGF1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");

/// OID for RSASSA-PSS: 1.2.840.113549.1.1.10
pub const RSASSA_PSS_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

/// OID for Ed25519: 1.3.101.112
pub const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// HashAlg enumerates the digests permitted in signature algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlg {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlg {
    /// name returns the canonical human-readable digest name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlg::Sha1 => "SHA-1",
            HashAlg::Sha224 => "SHA-224",
            HashAlg::Sha256 => "SHA-256",
            HashAlg::Sha384 => "SHA-384",
            HashAlg::Sha512 => "SHA-512",
        }
    }

    /// oid returns the registered object identifier of the digest.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            HashAlg::Sha1 => SHA1_OID,
            HashAlg::Sha224 => SHA224_OID,
            HashAlg::Sha256 => SHA256_OID,
            HashAlg::Sha384 => SHA384_OID,
            HashAlg::Sha512 => SHA512_OID,
        }
    }

    /// from_oid resolves a digest OID, returning None for anything outside
    /// the permitted set.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            SHA1_OID => Some(HashAlg::Sha1),
            SHA224_OID => Some(HashAlg::Sha224),
            SHA256_OID => Some(HashAlg::Sha256),
            SHA384_OID => Some(HashAlg::Sha384),
            SHA512_OID => Some(HashAlg::Sha512),
            _ => None,
        }
    }

    /// size returns the digest output length in bytes.
    pub fn size(&self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha224 => 28,
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// digest hashes a message with the selected algorithm.
    pub fn digest(&self, message: &[u8]) -> Vec<u8> {
        match self {
            HashAlg::Sha1 => sha1::Sha1::digest(message).to_vec(),
            HashAlg::Sha224 => sha2::Sha224::digest(message).to_vec(),
            HashAlg::Sha256 => sha2::Sha256::digest(message).to_vec(),
            HashAlg::Sha384 => sha2::Sha384::digest(message).to_vec(),
            HashAlg::Sha512 => sha2::Sha512::digest(message).to_vec(),
        }
    }
}

/// PaddingScheme is the padding family named by a signature algorithm OID.
///
/// PSS carries no digest here: its parameters travel in the algorithm
/// identifier and are decoded on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddingScheme {
    /// RSASSA PKCS#1 v1.5 with the given digest.
    Pkcs1v15(HashAlg),
    /// RSASSA-PSS; parameters are in the AlgorithmIdentifier.
    Pss,
    /// DSA/ECDSA style raw digest signing (IEEE 1363 EMSA1).
    Ieee1363(HashAlg),
    /// Pure signing over the raw message (Ed25519).
    Pure,
}

/// PaddingSpec is a fully resolved padding selection, ready to hand to a
/// verification or signing primitive. Unlike [`PaddingScheme`], the PSS
/// variant carries its decoded parameters inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddingSpec {
    Pkcs1v15 { hash: HashAlg },
    /// The salt length is carried for diagnostics only; verification infers
    /// the actual salt from the signature content.
    Pss { hash: HashAlg, salt_len: u32 },
    Ieee1363 { hash: HashAlg },
    Pure,
}

/// SignatureFormat selects how a signature value is laid out on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureFormat {
    /// Single fixed-width byte string (RSA, Ed25519).
    Fixed,
    /// SEQUENCE of INTEGER components (DSA/ECDSA r,s).
    DerSequence,
}

/// SignatureScheme ties a signature algorithm OID to the key family and
/// padding it requires.
#[derive(Debug)]
pub struct SignatureScheme {
    pub oid: ObjectIdentifier,
    pub key_algo: &'static str,
    pub padding: PaddingScheme,
}

/// All signature schemes the crate recognizes. Process-wide, read-only.
pub const SIGNATURE_SCHEMES: &[SignatureScheme] = &[
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5"),
        key_algo: "RSA",
        padding: PaddingScheme::Pkcs1v15(HashAlg::Sha1),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14"),
        key_algo: "RSA",
        padding: PaddingScheme::Pkcs1v15(HashAlg::Sha224),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11"),
        key_algo: "RSA",
        padding: PaddingScheme::Pkcs1v15(HashAlg::Sha256),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12"),
        key_algo: "RSA",
        padding: PaddingScheme::Pkcs1v15(HashAlg::Sha384),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13"),
        key_algo: "RSA",
        padding: PaddingScheme::Pkcs1v15(HashAlg::Sha512),
    },
    SignatureScheme {
        oid: RSASSA_PSS_OID,
        key_algo: "RSA",
        padding: PaddingScheme::Pss,
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.1"),
        key_algo: "ECDSA",
        padding: PaddingScheme::Ieee1363(HashAlg::Sha1),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.1"),
        key_algo: "ECDSA",
        padding: PaddingScheme::Ieee1363(HashAlg::Sha224),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2"),
        key_algo: "ECDSA",
        padding: PaddingScheme::Ieee1363(HashAlg::Sha256),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3"),
        key_algo: "ECDSA",
        padding: PaddingScheme::Ieee1363(HashAlg::Sha384),
    },
    SignatureScheme {
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4"),
        key_algo: "ECDSA",
        padding: PaddingScheme::Ieee1363(HashAlg::Sha512),
    },
    SignatureScheme {
        oid: ED25519_OID,
        key_algo: "Ed25519",
        padding: PaddingScheme::Pure,
    },
];

/// lookup_signature_scheme resolves a signature algorithm OID against the
/// registry, returning None for unrecognized algorithms.
pub fn lookup_signature_scheme(oid: &ObjectIdentifier) -> Option<&'static SignatureScheme> {
    SIGNATURE_SCHEMES.iter().find(|scheme| scheme.oid == *oid)
}
