// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Generic X.509 SIGNED object envelope: the three-field SEQUENCE shared by
//! certificates, CRLs and related PKI artifacts.
//!
//! https://datatracker.ietf.org/doc/html/rfc5280

use crate::algo::{self, HashAlg, MGF1_OID, PaddingScheme, PaddingSpec, SignatureFormat};
use crate::error::{Error, Result};
use crate::keys::{PublicKey, Signer};
use crate::{pem, pss};
use der::asn1::BitString;
use der::{Decode, Encode, Header, Length, Reader, SliceReader, Tag};
use spki::AlgorithmIdentifierOwned;

/// SignedObject is a decoded X.509 SIGNED envelope: the to-be-signed byte
/// region, the signature algorithm and the signature bits.
///
/// The TBS region is captured wire-exact (including its own SEQUENCE tag and
/// length) and is never re-encoded, so verification always runs over the
/// bytes that were actually signed.
#[derive(Clone, Debug)]
pub struct SignedObject {
    tbs_bits: Vec<u8>,
    sig_algo: AlgorithmIdentifierOwned,
    signature: Vec<u8>,
    labels_allowed: Vec<String>,
    label_pref: String,
}

/// split_labels parses a "NAME" or "NAME/ALTNAME" label specification into
/// the preferred label and the sorted set of accepted ones.
fn split_labels(labels: &str) -> Result<(String, Vec<String>)> {
    let mut allowed: Vec<String> = labels
        .split('/')
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    let Some(pref) = allowed.first().cloned() else {
        return Err(Error::EmptyLabels);
    };
    allowed.sort();
    Ok((pref, allowed))
}

/// decode_signed parses the three-field SIGNED SEQUENCE, capturing the TBS
/// sub-region verbatim.
fn decode_signed(encoded: &[u8]) -> der::Result<(Vec<u8>, AlgorithmIdentifierOwned, Vec<u8>)> {
    let mut reader = SliceReader::new(encoded)?;
    let outer = Header::decode(&mut reader)?;
    outer.tag.assert_eq(Tag::Sequence)?;

    let fields = reader.read_nested(outer.length, |reader| {
        let tbs_header = Header::decode(reader)?;
        tbs_header.tag.assert_eq(Tag::Sequence)?;
        let tbs_body = reader.read_slice(tbs_header.length)?;

        let mut tbs_bits = Vec::new();
        tbs_header.encode(&mut tbs_bits)?;
        tbs_bits.extend_from_slice(tbs_body);

        let sig_algo = AlgorithmIdentifierOwned::decode(reader)?;
        let signature = BitString::decode(reader)?;

        Ok((tbs_bits, sig_algo, signature.raw_bytes().to_vec()))
    })?;
    reader.finish(fields)
}

/// encode_signed is the mirror of decode_signed: the stored TBS bytes are
/// spliced back in verbatim next to the algorithm and the signature.
fn encode_signed(
    tbs_bits: &[u8],
    sig_algo: &AlgorithmIdentifierOwned,
    signature: &[u8],
) -> Result<Vec<u8>> {
    let algo_der = sig_algo.to_der()?;
    let sig_der = BitString::from_bytes(signature)?.to_der()?;

    let body_len = tbs_bits.len() + algo_der.len() + sig_der.len();
    let header = Header::new(Tag::Sequence, Length::try_from(body_len)?)?;

    let mut out = Vec::new();
    header.encode(&mut out)?;
    out.extend_from_slice(tbs_bits);
    out.extend_from_slice(&algo_der);
    out.extend_from_slice(&sig_der);
    Ok(out)
}

impl SignedObject {
    /// from_bytes decodes a signed object from raw DER or from a PEM block.
    ///
    /// The label specification lists the accepted PEM labels separated by
    /// `/`; the first entry is the canonical label used for error context
    /// and re-encoding (e.g. "CRL/X509 CRL").
    pub fn from_bytes(data: &[u8], labels: &str) -> Result<Self> {
        let (label_pref, labels_allowed) = split_labels(labels)?;

        let wrap = |details: String| Error::Decoding {
            label: label_pref.clone(),
            details,
        };

        let (tbs_bits, sig_algo, signature) = if data.starts_with(b"-----BEGIN ") {
            let (got_label, payload) = pem::decode(data).map_err(|e| wrap(e.to_string()))?;
            if labels_allowed.binary_search(&got_label).is_err() {
                return Err(wrap(format!("invalid PEM label: {got_label}")));
            }
            decode_signed(&payload).map_err(|e| wrap(e.to_string()))?
        } else {
            decode_signed(data).map_err(|e| wrap(e.to_string()))?
        };

        Ok(Self {
            tbs_bits,
            sig_algo,
            signature,
            labels_allowed,
            label_pref,
        })
    }

    /// from_pem decodes a signed object from a PEM string.
    pub fn from_pem(pem_str: &str, labels: &str) -> Result<Self> {
        Self::from_bytes(pem_str.as_bytes(), labels)
    }

    /// to_der re-encodes the signed object from its stored fields.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        encode_signed(&self.tbs_bits, &self.sig_algo, &self.signature)
    }

    /// to_pem re-encodes the signed object under its canonical PEM label.
    pub fn to_pem(&self) -> Result<String> {
        Ok(pem::encode(&self.label_pref, &self.to_der()?))
    }

    /// tbs_data returns the exact bytes the signature covers: the TBS
    /// sub-region wrapped in its SEQUENCE tag and length.
    pub fn tbs_data(&self) -> &[u8] {
        &self.tbs_bits
    }

    /// signature returns the raw signature bits.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// signature_algorithm returns the signature algorithm identifier.
    pub fn signature_algorithm(&self) -> &AlgorithmIdentifierOwned {
        &self.sig_algo
    }

    /// pem_label returns the canonical PEM label used when re-encoding.
    pub fn pem_label(&self) -> &str {
        &self.label_pref
    }

    /// pem_labels_allowed returns the sorted set of accepted PEM labels.
    pub fn pem_labels_allowed(&self) -> &[String] {
        &self.labels_allowed
    }

    /// hash_used_for_signature resolves the digest named by the signature
    /// algorithm. For PSS the digest comes from the decoded parameters, not
    /// from the outer OID.
    ///
    /// This is a diagnostic accessor: an unrecognized algorithm is reported
    /// as an internal error rather than folded into a verification verdict.
    pub fn hash_used_for_signature(&self) -> Result<&'static str> {
        let scheme = algo::lookup_signature_scheme(&self.sig_algo.oid).ok_or_else(|| {
            Error::Internal {
                details: format!("unrecognized signature algorithm {}", self.sig_algo.oid),
            }
        })?;

        match scheme.padding {
            PaddingScheme::Pkcs1v15(hash) | PaddingScheme::Ieee1363(hash) => Ok(hash.name()),
            PaddingScheme::Pss => {
                let params = pss::decode(&self.pss_parameter_blob()?)?;
                let hash = HashAlg::from_oid(&params.hash_algo.oid).ok_or_else(|| {
                    Error::Internal {
                        details: format!("unrecognized PSS digest {}", params.hash_algo.oid),
                    }
                })?;
                Ok(hash.name())
            }
            PaddingScheme::Pure => Err(Error::Internal {
                details: format!("no digest component in {}", scheme.key_algo),
            }),
        }
    }

    /// check_signature verifies the signature against a candidate public
    /// key. Structural or semantic malformation anywhere in the signature
    /// metadata fails the verification instead of surfacing an error.
    pub fn check_signature(&self, key: &dyn PublicKey) -> bool {
        self.verify_signature(key).unwrap_or(false)
    }

    /// verify_signature is the typed verification boundary: registry and
    /// conformance rejections are Ok(false), while structural failures keep
    /// their error kinds for check_signature to collapse.
    fn verify_signature(&self, key: &dyn PublicKey) -> Result<bool> {
        let Some(scheme) = algo::lookup_signature_scheme(&self.sig_algo.oid) else {
            return Ok(false);
        };
        if scheme.key_algo != key.algo_name() {
            return Ok(false);
        }

        let format = if key.message_parts() >= 2 {
            SignatureFormat::DerSequence
        } else {
            SignatureFormat::Fixed
        };

        let padding = match scheme.padding {
            PaddingScheme::Pkcs1v15(hash) => PaddingSpec::Pkcs1v15 { hash },
            PaddingScheme::Ieee1363(hash) => PaddingSpec::Ieee1363 { hash },
            PaddingScheme::Pure => PaddingSpec::Pure,
            PaddingScheme::Pss => {
                // RFC 4055: the identifier MUST contain RSASSA-PSS-params
                if self.sig_algo.parameters.is_none() {
                    return Ok(false);
                }
                let params = pss::decode(&self.pss_parameter_blob()?)?;

                let Some(hash) = HashAlg::from_oid(&params.hash_algo.oid) else {
                    return Ok(false);
                };
                if params.mask_gen_algo.oid != MGF1_OID {
                    return Ok(false);
                }
                // A mask generation digest differing from the PSS digest is
                // non-standard and a hash confusion risk; reject it outright
                if params.mask_gen_hash.oid != params.hash_algo.oid {
                    return Ok(false);
                }
                if params.trailer_field != 1 {
                    return Ok(false);
                }
                PaddingSpec::Pss {
                    hash,
                    salt_len: params.salt_len,
                }
            }
        };

        key.verify(&padding, format, self.tbs_data(), &self.signature)
    }

    /// pss_parameter_blob re-serializes the algorithm parameters for the
    /// PSS codec; an absent parameter field maps to an empty blob, which
    /// the codec rejects.
    fn pss_parameter_blob(&self) -> Result<Vec<u8>> {
        match &self.sig_algo.parameters {
            Some(params) => Ok(params.to_der()?),
            None => Ok(Vec::new()),
        }
    }

    /// make_signed applies the X.509 SIGNED macro: it signs the given TBS
    /// bytes (a complete DER SEQUENCE) and emits the encoded envelope.
    pub fn make_signed<S: Signer + ?Sized>(
        signer: &S,
        algorithm: &AlgorithmIdentifierOwned,
        tbs_bits: &[u8],
    ) -> Result<Vec<u8>> {
        let signature = signer.sign(tbs_bits)?;
        encode_signed(tbs_bits, algorithm, &signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{ecdsa, eddsa, rsa};
    use der::Any;

    // A minimal but valid DER SEQUENCE standing in for a TBS certificate.
    fn sample_tbs() -> Vec<u8> {
        hex::decode("30060201050101ff").unwrap()
    }

    fn rsa_pkcs1_envelope() -> (Vec<u8>, rsa::SecretKey) {
        let secret = rsa::SecretKey::generate(PaddingSpec::Pkcs1v15 {
            hash: HashAlg::Sha256,
        })
        .unwrap();
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();
        (encoded, secret)
    }

    fn rsa_pss_envelope() -> (Vec<u8>, rsa::SecretKey) {
        let secret = rsa::SecretKey::generate(PaddingSpec::Pss {
            hash: HashAlg::Sha256,
            salt_len: 32,
        })
        .unwrap();
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();
        (encoded, secret)
    }

    #[test]
    fn test_label_splitting() {
        let (encoded, _) = rsa_pkcs1_envelope();

        let obj = SignedObject::from_bytes(&encoded, "CRL/X509 CRL").unwrap();
        assert_eq!(obj.pem_label(), "CRL");
        assert_eq!(obj.pem_labels_allowed(), ["CRL", "X509 CRL"]);

        assert!(matches!(
            SignedObject::from_bytes(&encoded, ""),
            Err(Error::EmptyLabels)
        ));
        assert!(matches!(
            SignedObject::from_bytes(&encoded, "///"),
            Err(Error::EmptyLabels)
        ));
    }

    // Tests that decoding an envelope and re-encoding it reproduces the
    // exact input bytes, and that the TBS region is captured verbatim.
    #[test]
    fn test_roundtrip_der() {
        let (encoded, _) = rsa_pkcs1_envelope();

        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert_eq!(obj.to_der().unwrap(), encoded);
        assert_eq!(obj.tbs_data(), sample_tbs());
    }

    #[test]
    fn test_roundtrip_pem() {
        let (encoded, _) = rsa_pkcs1_envelope();

        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        let pem_str = obj.to_pem().unwrap();
        assert!(pem_str.starts_with("-----BEGIN CERTIFICATE-----"));

        let decoded = SignedObject::from_pem(&pem_str, "CERTIFICATE").unwrap();
        assert_eq!(decoded.tbs_data(), obj.tbs_data());
        assert_eq!(decoded.signature(), obj.signature());
        assert_eq!(decoded.signature_algorithm(), obj.signature_algorithm());
        assert_eq!(decoded.to_der().unwrap(), encoded);
    }

    // Tests that a PEM block is only accepted under one of the allowed
    // labels, and that the error is prefixed with the canonical label.
    #[test]
    fn test_pem_label_enforcement() {
        let (encoded, _) = rsa_pkcs1_envelope();
        let pem_str = pem::encode("TRUST ANCHOR", &encoded);

        let err = SignedObject::from_pem(&pem_str, "CERTIFICATE").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("CERTIFICATE decoding failed"));
        assert!(message.contains("invalid PEM label: TRUST ANCHOR"));

        let obj = SignedObject::from_pem(&pem_str, "CERTIFICATE/TRUST ANCHOR").unwrap();
        assert_eq!(obj.pem_label(), "CERTIFICATE");
        assert_eq!(obj.tbs_data(), sample_tbs());
    }

    #[test]
    fn test_decode_garbage() {
        let err = SignedObject::from_bytes(&[0x30, 0x82, 0xff], "CERTIFICATE").unwrap_err();
        assert!(err.to_string().starts_with("CERTIFICATE decoding failed"));

        // Trailing data after the envelope is a decoding failure too
        let (mut encoded, _) = rsa_pkcs1_envelope();
        encoded.push(0x00);
        assert!(SignedObject::from_bytes(&encoded, "CERTIFICATE").is_err());
    }

    #[test]
    fn test_hash_used_for_signature() {
        let (encoded, _) = rsa_pkcs1_envelope();
        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert_eq!(obj.hash_used_for_signature().unwrap(), "SHA-256");

        let (encoded, _) = rsa_pss_envelope();
        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert_eq!(obj.hash_used_for_signature().unwrap(), "SHA-256");

        // Ed25519 has no digest component; the accessor reports that as an
        // internal error rather than inventing one
        let secret = eddsa::SecretKey::generate();
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();
        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert!(matches!(
            obj.hash_used_for_signature(),
            Err(Error::Internal { .. })
        ));
    }

    #[test]
    fn test_check_signature_rsa_pkcs1() {
        let (encoded, secret) = rsa_pkcs1_envelope();
        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();

        assert!(obj.check_signature(&secret.public_key()));

        // An unrelated key of the same family must fail
        let other = rsa::SecretKey::generate(PaddingSpec::Pkcs1v15 {
            hash: HashAlg::Sha256,
        })
        .unwrap();
        assert!(!obj.check_signature(&other.public_key()));

        // A key of a different family fails before any cryptography runs
        let ec = ecdsa::SecretKey::generate(HashAlg::Sha256);
        assert!(!obj.check_signature(&ec.public_key()));
    }

    #[test]
    fn test_check_signature_bitflip() {
        let (encoded, secret) = rsa_pkcs1_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        obj.signature[0] ^= 0x01;
        assert!(!obj.check_signature(&secret.public_key()));
    }

    #[test]
    fn test_check_signature_ecdsa() {
        let secret = ecdsa::SecretKey::generate(HashAlg::Sha256);
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();

        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert!(obj.check_signature(&secret.public_key()));

        let other = ecdsa::SecretKey::generate(HashAlg::Sha256);
        assert!(!obj.check_signature(&other.public_key()));
    }

    #[test]
    fn test_check_signature_ed25519() {
        let secret = eddsa::SecretKey::generate();
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();

        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert!(obj.check_signature(&secret.public_key()));

        let other = eddsa::SecretKey::generate();
        assert!(!obj.check_signature(&other.public_key()));
    }

    #[test]
    fn test_check_signature_pss() {
        let (encoded, secret) = rsa_pss_envelope();
        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert!(obj.check_signature(&secret.public_key()));
    }

    // Tests that an envelope signed with a salt narrower than the digest
    // verifies against its own key.
    #[test]
    fn test_check_signature_pss_nondigest_salt() {
        let secret = rsa::SecretKey::generate(PaddingSpec::Pss {
            hash: HashAlg::Sha256,
            salt_len: 20,
        })
        .unwrap();
        let algorithm = secret.algorithm_identifier().unwrap();
        let encoded = SignedObject::make_signed(&secret, &algorithm, &sample_tbs()).unwrap();

        let obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        assert!(obj.check_signature(&secret.public_key()));
    }

    // Tests that the salt length field is diagnostic only: changing it in
    // the encoded parameters never changes the verification outcome.
    #[test]
    fn test_pss_salt_len_not_enforced() {
        let (encoded, secret) = rsa_pss_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();

        for salt_len in [0u32, 5, 20, 64] {
            let mut params = pss::decode(&obj.pss_parameter_blob().unwrap()).unwrap();
            params.salt_len = salt_len;
            let reencoded = pss::encode(&params).unwrap();
            obj.sig_algo.parameters = Some(Any::from_der(&reencoded).unwrap());
            assert!(obj.check_signature(&secret.public_key()));
        }
    }

    // Tests that PSS parameters whose MGF digest differs from the PSS
    // digest are rejected even though both digests are individually valid.
    #[test]
    fn test_pss_hash_mismatch_rejected() {
        let (encoded, secret) = rsa_pss_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();

        let mut params = pss::decode(&obj.pss_parameter_blob().unwrap()).unwrap();
        params.mask_gen_algo = pss::mgf1_identifier(HashAlg::Sha1).unwrap();
        params.mask_gen_hash = pss::digest_identifier(HashAlg::Sha1);
        let reencoded = pss::encode(&params).unwrap();
        obj.sig_algo.parameters = Some(Any::from_der(&reencoded).unwrap());

        assert!(!obj.check_signature(&secret.public_key()));
    }

    #[test]
    fn test_pss_trailer_rejected() {
        let (encoded, secret) = rsa_pss_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();

        let mut params = pss::decode(&obj.pss_parameter_blob().unwrap()).unwrap();
        params.trailer_field = 2;
        let reencoded = pss::encode(&params).unwrap();
        obj.sig_algo.parameters = Some(Any::from_der(&reencoded).unwrap());

        assert!(!obj.check_signature(&secret.public_key()));
    }

    #[test]
    fn test_pss_missing_params_rejected() {
        let (encoded, secret) = rsa_pss_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        obj.sig_algo.parameters = None;
        assert!(!obj.check_signature(&secret.public_key()));
    }

    // Tests that corrupted parameter bytes fail verification instead of
    // propagating a decode error.
    #[test]
    fn test_pss_malformed_params_fail_closed() {
        let (encoded, secret) = rsa_pss_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();

        // A syntactically valid SEQUENCE whose interior is truncated garbage
        obj.sig_algo.parameters =
            Some(Any::new(Tag::Sequence, vec![0xa0, 0x03, 0x02]).unwrap());
        assert!(!obj.check_signature(&secret.public_key()));
    }

    #[test]
    fn test_unknown_algorithm_fails_closed() {
        let (encoded, secret) = rsa_pkcs1_envelope();
        let mut obj = SignedObject::from_bytes(&encoded, "CERTIFICATE").unwrap();
        obj.sig_algo.oid = const_oid::ObjectIdentifier::new_unwrap("1.2.643.2.2.3");

        assert!(!obj.check_signature(&secret.public_key()));
        assert!(matches!(
            obj.hash_used_for_signature(),
            Err(Error::Internal { .. })
        ));
    }
}
