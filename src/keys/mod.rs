// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Public/private key wrappers used by signed object verification.

use crate::algo::{PaddingSpec, SignatureFormat};
use crate::error::Result;
use spki::AlgorithmIdentifierOwned;

pub mod ecdsa;
pub mod eddsa;
pub mod rsa;

/// PublicKey is the verification side of a signature key pair.
pub trait PublicKey {
    /// algo_name returns the key family name matched against the registry
    /// ("RSA", "ECDSA", "Ed25519").
    fn algo_name(&self) -> &'static str;

    /// message_parts returns the number of components in the key's message
    /// representation; two or more selects the DER sequence signature format.
    fn message_parts(&self) -> usize;

    /// verify checks a signature over a message with the given padding and
    /// wire format. A well-formed but wrong signature is Ok(false); padding
    /// the key family cannot execute is an error.
    fn verify(
        &self,
        padding: &PaddingSpec,
        format: SignatureFormat,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool>;
}

/// Signer is the signing side of a signature key pair.
pub trait Signer {
    /// sign creates a digital signature of the message.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// algorithm_identifier returns the signature AlgorithmIdentifier this
    /// signer produces, including encoded PSS parameters where applicable.
    fn algorithm_identifier(&self) -> Result<AlgorithmIdentifierOwned>;
}
