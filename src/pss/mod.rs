// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! RSASSA-PSS parameter encoding and decoding.
//!
//! https://datatracker.ietf.org/doc/html/rfc4055

use crate::algo::{HashAlg, MGF1_OID};
use crate::error::{Error, Result};
use der::asn1::ContextSpecific;
use der::{Any, Decode, Encode, Header, Length, Reader, SliceReader, Tag, TagMode, TagNumber};
use spki::AlgorithmIdentifierOwned;

/// PssParams is the decoded RSASSA-PSS-params structure.
///
/// `mask_gen_hash` is not a wire field of its own: it is the nested
/// AlgorithmIdentifier decoded out of `mask_gen_algo.parameters`, kept for
/// convenience.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PssParams {
    pub hash_algo: AlgorithmIdentifierOwned,
    pub mask_gen_algo: AlgorithmIdentifierOwned,
    pub mask_gen_hash: AlgorithmIdentifierOwned,
    pub salt_len: u32,
    pub trailer_field: u32,
}

impl PssParams {
    /// for_hash builds the parameters for a given digest and salt length,
    /// with MGF1 keyed to the same digest and the standard trailer field.
    pub fn for_hash(hash: HashAlg, salt_len: u32) -> Result<Self> {
        let hash_algo = digest_identifier(hash);
        Ok(Self {
            hash_algo: hash_algo.clone(),
            mask_gen_algo: mgf1_identifier(hash)?,
            mask_gen_hash: hash_algo,
            salt_len,
            trailer_field: 1,
        })
    }
}

/// digest_identifier builds the AlgorithmIdentifier of a digest, with the
/// conventional explicit NULL parameters.
pub fn digest_identifier(hash: HashAlg) -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: hash.oid(),
        parameters: Some(Any::null()),
    }
}

/// mgf1_identifier builds the AlgorithmIdentifier for MGF1 keyed to the
/// given digest: the parameter is the digest's own identifier.
pub fn mgf1_identifier(hash: HashAlg) -> Result<AlgorithmIdentifierOwned> {
    let inner = digest_identifier(hash).to_der()?;
    Ok(AlgorithmIdentifierOwned {
        oid: MGF1_OID,
        parameters: Some(Any::from_der(&inner)?),
    })
}

/// decode parses an RSASSA-PSS-params blob.
///
/// The wire form is a SEQUENCE of four OPTIONAL explicitly tagged fields
/// ([0] hashAlgorithm, [1] maskGenAlgorithm, [2] saltLength,
/// [3] trailerField), defaulting to SHA-1, MGF1(SHA-1), 20 and 1 when
/// absent. Structural violations propagate; callers decide whether that is
/// fatal or merely "not verified".
pub fn decode(encoded: &[u8]) -> Result<PssParams> {
    let mut reader = SliceReader::new(encoded)?;
    let header = Header::decode(&mut reader)?;
    header.tag.assert_eq(Tag::Sequence)?;

    let (hash_algo, mask_gen_algo, salt_len, trailer_field) =
        reader.read_nested(header.length, |reader| {
            let hash_algo = ContextSpecific::<AlgorithmIdentifierOwned>::decode_explicit(
                reader,
                TagNumber::N0,
            )?
            .map(|field| field.value)
            .unwrap_or_else(|| digest_identifier(HashAlg::Sha1));

            let mask_gen_algo = match ContextSpecific::<AlgorithmIdentifierOwned>::decode_explicit(
                reader,
                TagNumber::N1,
            )? {
                Some(field) => field.value,
                None => {
                    let inner = digest_identifier(HashAlg::Sha1).to_der()?;
                    AlgorithmIdentifierOwned {
                        oid: MGF1_OID,
                        parameters: Some(Any::from_der(&inner)?),
                    }
                }
            };

            let salt_len = ContextSpecific::<u32>::decode_explicit(reader, TagNumber::N2)?
                .map(|field| field.value)
                .unwrap_or(20);

            let trailer_field = ContextSpecific::<u32>::decode_explicit(reader, TagNumber::N3)?
                .map(|field| field.value)
                .unwrap_or(1);

            Ok((hash_algo, mask_gen_algo, salt_len, trailer_field))
        })?;
    let _ = reader.finish(())?;

    // The MGF parameter is itself an AlgorithmIdentifier naming the digest
    // the mask generation function runs on.
    let mask_gen_hash = mask_gen_algo
        .parameters
        .as_ref()
        .ok_or(Error::Der(Tag::Sequence.value_error()))?
        .decode_as::<AlgorithmIdentifierOwned>()?;

    Ok(PssParams {
        hash_algo,
        mask_gen_algo,
        mask_gen_hash,
        salt_len,
        trailer_field,
    })
}

/// encode serializes RSASSA-PSS-params.
///
/// All four fields are emitted explicitly; decode accepts absent and
/// present-and-default encodings identically, so minimization is not
/// required here.
pub fn encode(params: &PssParams) -> Result<Vec<u8>> {
    let hash_algo = ContextSpecific {
        tag_number: TagNumber::N0,
        tag_mode: TagMode::Explicit,
        value: params.hash_algo.clone(),
    }
    .to_der()?;
    let mask_gen_algo = ContextSpecific {
        tag_number: TagNumber::N1,
        tag_mode: TagMode::Explicit,
        value: params.mask_gen_algo.clone(),
    }
    .to_der()?;
    let salt_len = ContextSpecific {
        tag_number: TagNumber::N2,
        tag_mode: TagMode::Explicit,
        value: params.salt_len,
    }
    .to_der()?;
    let trailer_field = ContextSpecific {
        tag_number: TagNumber::N3,
        tag_mode: TagMode::Explicit,
        value: params.trailer_field,
    }
    .to_der()?;

    let body_len =
        hash_algo.len() + mask_gen_algo.len() + salt_len.len() + trailer_field.len();
    let header = Header::new(Tag::Sequence, Length::try_from(body_len)?)?;

    let mut out = Vec::new();
    header.encode(&mut out)?;
    out.extend_from_slice(&hash_algo);
    out.extend_from_slice(&mask_gen_algo);
    out.extend_from_slice(&salt_len);
    out.extend_from_slice(&trailer_field);
    Ok(out)
}
