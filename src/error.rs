// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

/// Result type used by the crate's APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type used by the crate's APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("at least one PEM label is required")]
    EmptyLabels,
    #[error("{label} decoding failed: {details}")]
    Decoding { label: String, details: String },
    #[error("PEM error: {details}")]
    Pem { details: String },
    #[error("internal error: {details}")]
    Internal { details: String },
    #[error("padding scheme not supported by this key type")]
    UnsupportedPadding,
    #[error(transparent)]
    Der(#[from] der::Error),
    #[error(transparent)]
    Rsa(#[from] rsa::Error),
    #[error(transparent)]
    Signature(#[from] rsa::signature::Error),
}
