//! # Stripe Webhook Verification
//!
//! Signature verification and event parsing for Stripe webhooks.
//! Verification runs over the raw request body: the signature covers
//! `"{timestamp}.{body}"`, so any re-serialization of the payload
//! invalidates it.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shop_core::{CheckoutError, CheckoutResult, EventSession, WebhookEvent, WebhookEventType};
use tracing::debug;

/// Timestamp tolerance for replayed signatures (seconds)
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Verify a `stripe-signature` header against the raw payload.
///
/// The header format is `t=<unix-ts>,v1=<hex-hmac>[,v1=...]`. Any one
/// matching `v1` signature within the timestamp tolerance passes.
pub fn verify_signature(secret: &str, payload: &[u8], header: &str) -> CheckoutResult<()> {
    let sig_parts = parse_signature_header(header)?;

    let now = Utc::now().timestamp();
    if (now - sig_parts.timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(CheckoutError::InvalidSignature(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let signed_payload = format!("{}.{}", sig_parts.timestamp, String::from_utf8_lossy(payload));
    let expected_sig = compute_hmac_sha256(secret, &signed_payload);

    let valid = sig_parts
        .signatures
        .iter()
        .any(|sig| constant_time_compare(sig, &expected_sig));

    if !valid {
        return Err(CheckoutError::InvalidSignature(
            "Signature mismatch".to_string(),
        ));
    }

    Ok(())
}

/// Parse a verified payload into a [`WebhookEvent`].
///
/// The event's `data.object` is treated as a checkout-session object;
/// for event types that carry something else the session id and
/// metadata simply come back empty.
pub fn parse_event(payload: &[u8]) -> CheckoutResult<WebhookEvent> {
    let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        CheckoutError::WebhookParse(format!("Failed to parse webhook: {}", e))
    })?;

    debug!("Parsed Stripe webhook: type={}", event.event_type);

    let event_type = match event.event_type.as_str() {
        "checkout.session.completed" => WebhookEventType::CheckoutCompleted,
        other => WebhookEventType::Unknown(other.to_string()),
    };

    let session_id = event
        .data
        .object
        .get("id")
        .and_then(|v| v.as_str())
        .map(String::from);

    let metadata = event
        .data
        .object
        .get("metadata")
        .and_then(|m| m.as_object())
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Ok(WebhookEvent {
        event_id: event.id,
        event_type,
        session: EventSession {
            id: session_id,
            metadata,
        },
        timestamp: DateTime::from_timestamp(event.created, 0).unwrap_or_else(Utc::now),
    })
}

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Map<String, serde_json::Value>,
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> CheckoutResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let kv: Vec<&str> = part.split('=').collect();
        if kv.len() != 2 {
            continue;
        }
        match kv[0] {
            "t" => {
                timestamp = kv[1].parse().ok();
            }
            "v1" => {
                signatures.push(kv[1].to_string());
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        CheckoutError::InvalidSignature("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(CheckoutError::InvalidSignature(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

pub(crate) fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
