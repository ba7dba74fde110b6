// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session codec.
//!
//! Turns an opaque bearer credential (`header.payload.signature`) into an
//! [`Identity`]. The codec is pure: it keeps no state and logs nothing about
//! the decoded payload.
//!
//! The signature segment must be present but is **not verified**.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::claims::Claims;
use crate::error::DecodeError;
use crate::identity::Identity;

/// Number of dot-separated segments in a credential.
const SEGMENT_COUNT: usize = 3;

/// Index of the payload segment.
const PAYLOAD_SEGMENT: usize = 1;

// =============================================================================
// SessionCodec
// =============================================================================

/// Decoder for bearer credentials.
///
/// Only the payload segment is read. The header and signature must be
/// present but their contents are ignored.
///
/// Expiry is checked by the codec itself against the supplied clock, with no
/// leeway: a credential is expired when `exp < now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCodec;

impl SessionCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        Self
    }

    /// Decodes a credential into an identity, checking expiry against now.
    pub fn decode(&self, credential: &str) -> Result<Identity, DecodeError> {
        self.decode_at(credential, Utc::now())
    }

    /// Decodes a credential into an identity, checking expiry against `now`.
    pub fn decode_at(&self, credential: &str, now: DateTime<Utc>) -> Result<Identity, DecodeError> {
        let claims = self.decode_claims(credential)?;

        if claims.is_expired_at(now) {
            return Err(DecodeError::Expired {
                exp: claims.exp.unwrap_or_default(),
                now: now.timestamp(),
            });
        }

        Ok(Identity::from(claims))
    }

    /// Extracts the payload claims without checking expiry.
    pub fn decode_claims(&self, credential: &str) -> Result<Claims, DecodeError> {
        let segments: Vec<&str> = credential.split('.').collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(DecodeError::malformed(format!(
                "expected {} segments, found {}",
                SEGMENT_COUNT,
                segments.len()
            )));
        }

        // Some issuers keep base64 padding on the payload.
        let payload = segments[PAYLOAD_SEGMENT].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| DecodeError::malformed("payload is not valid base64url"))?;

        serde_json::from_slice::<Claims>(&bytes).map_err(|e| {
            DecodeError::malformed(format!("invalid JSON payload ({:?})", e.classify()))
        })
    }
}

/// Decodes a credential with a default codec.
pub fn decode(credential: &str) -> Result<Identity, DecodeError> {
    SessionCodec::new().decode(credential)
}

// =============================================================================
// Tests
// =============================================================================
