// signed-obj: X.509 signed object envelopes
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Strict PEM encoding and decoding.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const PEM_HEADER: &[u8] = b"-----BEGIN ";
const PEM_FOOTER: &[u8] = b"-----END ";
const PEM_ENDING: &[u8] = b"-----";

fn malformed(details: &str) -> Error {
    Error::Pem {
        details: details.to_string(),
    }
}

/// Decodes a single PEM block with strict validation.
///
/// Rules:
///   - Header must start at byte 0 (no leading whitespace)
///   - Footer must end the data (only optional line ending after)
///   - Line endings must be consistent (\n or \r\n throughout)
///   - Strict base64 decoding
///   - No trailing data after the PEM block
///
/// Returns (label, data) tuple on success.
pub fn decode(data: &[u8]) -> Result<(String, Vec<u8>)> {
    if !data.starts_with(PEM_HEADER) {
        return Err(malformed("missing PEM header"));
    }
    let header_end = data
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| malformed("incomplete PEM header"))?;

    // Line ending style is fixed by the header line and enforced throughout
    let line_ending: &[u8] = if header_end > 0 && data[header_end - 1] == b'\r' {
        b"\r\n"
    } else {
        b"\n"
    };
    let header = &data[..header_end + 1 - line_ending.len()];

    if !header.ends_with(PEM_ENDING) {
        return Err(malformed("malformed PEM header"));
    }
    let label = &header[PEM_HEADER.len()..header.len() - PEM_ENDING.len()];
    if label.is_empty() {
        return Err(malformed("empty PEM label"));
    }
    let label = String::from_utf8(label.to_vec())
        .map_err(|_| malformed("PEM label is not valid UTF-8"))?;

    // The footer must name the same label as the header
    let mut footer = Vec::with_capacity(PEM_FOOTER.len() + label.len() + PEM_ENDING.len());
    footer.extend_from_slice(PEM_FOOTER);
    footer.extend_from_slice(label.as_bytes());
    footer.extend_from_slice(PEM_ENDING);

    let search_area = &data[header_end + 1..];
    let footer_idx = search_area
        .windows(footer.len())
        .position(|window| window == footer.as_slice())
        .ok_or_else(|| malformed("missing PEM footer"))?;
    let footer_start = header_end + 1 + footer_idx;

    let rest = &data[footer_start + footer.len()..];
    if !rest.is_empty() && rest != line_ending {
        return Err(malformed("trailing data after PEM block"));
    }

    let body = &data[header_end + 1..footer_start];
    if body.is_empty() {
        return Err(malformed("empty PEM body"));
    }
    if !body.ends_with(line_ending) {
        return Err(malformed("body must end with newline before footer"));
    }
    let body = &body[..body.len() - line_ending.len()];

    // Strip line endings and decode the remaining base64 in one shot
    let b64: Vec<u8> = body
        .split(|&b| b == b'\n')
        .flat_map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .copied()
        .collect();

    let decoded = STANDARD
        .decode(&b64)
        .map_err(|e| malformed(&format!("invalid base64 payload: {e}")))?;

    Ok((label, decoded))
}

/// Encodes data as a PEM block with the given label.
/// Lines are 64 characters, using \n line endings.
pub fn encode(label: &str, data: &[u8]) -> String {
    let b64 = STANDARD.encode(data);

    let mut buf = String::new();
    buf.push_str("-----BEGIN ");
    buf.push_str(label);
    buf.push_str("-----\n");

    for chunk in b64.as_bytes().chunks(64) {
        buf.push_str(std::str::from_utf8(chunk).unwrap());
        buf.push('\n');
    }

    buf.push_str("-----END ");
    buf.push_str(label);
    buf.push_str("-----\n");

    buf
}
