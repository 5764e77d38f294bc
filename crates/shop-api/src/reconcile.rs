//! # Webhook Reconciler
//!
//! Turns a verified `checkout.session.completed` event into the
//! unpaid -> paid order transition, then sends the receipt.
//!
//! The transition is applied unconditionally: the provider redelivers
//! webhooks, and a replayed completion event re-applies the same write
//! (idempotent at the data level; the receipt send is at-least-once).
//! A failed receipt send is reported as a server error but never rolls
//! the paid state back.

use crate::handlers::{checkout_error_to_response, ErrorResponse};
use crate::mailer::render_receipt;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use shop_core::{
    CheckoutError, CheckoutResult, EmailMessage, OrderPatch, OrderQuery, Predicate, ProductQuery,
    UserQuery, WebhookEvent, WebhookEventType,
};
use tracing::{error, info, instrument};

/// Subject line for the post-payment receipt
const RECEIPT_SUBJECT: &str = "Thanks for your order! This is your receipt.";

/// What reconciliation did with a verified event
#[derive(Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Event type carries no action for this flow; acknowledged as-is
    Ignored { event_type: String },
    /// Order marked paid and receipt sent
    Completed { order_id: String },
}

/// Handle a Stripe webhook delivery.
///
/// The raw body bytes go straight into signature verification; parsing
/// happens only after the signature checks out.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Missing Stripe-Signature header", 400)),
            )
        })?;

    let event = state
        .provider
        .verify_webhook(&body, signature)
        .await
        .map_err(|e| {
            error!("Webhook verification failed: {}", e);
            checkout_error_to_response(e)
        })?;

    info!(
        "Received webhook: type={}, id={}",
        event.event_type.as_str(),
        event.event_id
    );

    let outcome = reconcile(&state, &event).await.map_err(|e| {
        error!("Webhook reconciliation failed: {}", e);
        checkout_error_to_response(e)
    })?;

    match outcome {
        ReconcileOutcome::Completed { ref order_id } => {
            info!(order_id = %order_id, "order reconciled as paid");
        }
        ReconcileOutcome::Ignored { ref event_type } => {
            info!(event_type = %event_type, "webhook acknowledged, no action");
        }
    }

    Ok(StatusCode::OK)
}

/// The reconciliation state machine for a verified event.
///
/// Step order matches the webhook contract: metadata is validated
/// before the event-type gate, lookups before the transition, and the
/// receipt send after the write it must never undo.
pub async fn reconcile(
    state: &AppState,
    event: &WebhookEvent,
) -> CheckoutResult<ReconcileOutcome> {
    let metadata = &event.session.metadata;

    let user_id = metadata
        .get("userId")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            CheckoutError::InvalidRequest("No user present in session metadata".to_string())
        })?;
    let order_id = metadata
        .get("orderId")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            CheckoutError::InvalidRequest("No order present in session metadata".to_string())
        })?;

    if event.event_type != WebhookEventType::CheckoutCompleted {
        return Ok(ReconcileOutcome::Ignored {
            event_type: event.event_type.as_str().to_string(),
        });
    }

    let users = state
        .store
        .find_users(&UserQuery {
            id: Some(Predicate::Equals(user_id.clone())),
        })
        .await?;
    let user = users
        .into_iter()
        .next()
        .ok_or_else(|| CheckoutError::not_found("user", user_id.as_str()))?;

    let orders = state.store.find_orders(&OrderQuery::by_id(order_id.as_str())).await?;
    let order = orders
        .into_iter()
        .next()
        .ok_or_else(|| CheckoutError::not_found("order", order_id.as_str()))?;

    // Product detail for the receipt body
    let products = state
        .store
        .find_products(&ProductQuery {
            id: Some(Predicate::InSet(order.product_ids.clone())),
        })
        .await?;

    // Unconditional write: redelivered events re-apply the same transition
    state
        .store
        .update_orders(
            &OrderQuery::by_id(order_id.as_str()),
            OrderPatch { is_paid: Some(true) },
        )
        .await?;

    let receipt = EmailMessage {
        from: state.config.mail_from.clone(),
        to: user.email.clone(),
        subject: RECEIPT_SUBJECT.to_string(),
        html: render_receipt(Utc::now(), &user.email, &order.id, &products),
    };

    // The order stays paid even if the receipt fails to send
    state
        .notifier
        .send(&receipt)
        .await
        .map_err(|e| CheckoutError::Notification(e.to_string()))?;

    Ok(ReconcileOutcome::Completed {
        order_id: order.id,
    })
}
