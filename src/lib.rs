// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Generic X.509 signed object handling: the SIGNED envelope shared by
//! certificates, CRLs and similar PKI artifacts, with PEM/DER codecs,
//! RSASSA-PSS parameter handling and fail-closed signature verification.

pub mod algo;
pub mod error;
pub mod keys;
pub mod pem;
pub mod pss;
pub mod x509;

pub use error::{Error, Result};
pub use x509::SignedObject;
