// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed "load more" continuation tokens.
//!
//! A token carries the next page number and the resolved filter snapshot of
//! the original search, so the server keeps no per-client state. Format:
//! `base64url(json) "." hex(hmac_sha256(base64url(json)))`.

use crate::models::SearchFilters;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Decoded contents of a continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub next_page: u32,
    pub filters: SearchFilters,
}

impl Continuation {
    /// Encode and sign this continuation.
    pub fn encode(&self, key: &[u8]) -> Result<String, ContinuationError> {
        let json = serde_json::to_vec(self).map_err(|e| ContinuationError::Encode(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(sign(payload.as_bytes(), key)?.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify and decode a token produced by [`Continuation::encode`].
    pub fn decode(token: &str, key: &[u8]) -> Result<Self, ContinuationError> {
        let (payload, signature_hex) = token
            .split_once('.')
            .ok_or(ContinuationError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| ContinuationError::Malformed)?;

        sign(payload.as_bytes(), key)?
            .verify_slice(&signature)
            .map_err(|_| {
                tracing::warn!("Continuation token signature mismatch");
                ContinuationError::BadSignature
            })?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| ContinuationError::Malformed)?;
        serde_json::from_slice(&json).map_err(|_| ContinuationError::Malformed)
    }
}

fn sign(data: &[u8], key: &[u8]) -> Result<HmacSha256, ContinuationError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ContinuationError::Encode(e.to_string()))?;
    mac.update(data);
    Ok(mac)
}

/// Errors from continuation token handling.
#[derive(Debug, thiserror::Error)]
pub enum ContinuationError {
    #[error("Malformed continuation token")]
    Malformed,

    #[error("Continuation token signature mismatch")]
    BadSignature,

    #[error("Failed to encode continuation token: {0}")]
    Encode(String),
}
