//! # Request Handlers
//!
//! Axum request handlers for the checkout API: session creation, order
//! status polling, product browsing, and the static success/cancel pages.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shop_core::{
    policy, Access, CheckoutError, CheckoutRequest, CheckoutResult, OrderQuery, Predicate,
    ProductQuery, SessionLineItem, SessionMetadata, User, UserQuery,
};
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Products in the cart
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// Create checkout response.
///
/// `url` is null when the provider could not open a session; the order
/// still exists and the caller may re-invoke checkout for it.
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// The order created for this checkout (always present)
    pub order_id: String,
    /// Hosted checkout URL to redirect the customer to
    pub url: Option<String>,
}

/// Order status response
#[derive(Debug, Serialize)]
pub struct OrderStatusResponse {
    pub is_paid: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Outcome of a session-creation attempt.
///
/// Distinguishes "session open, go pay" from "provider unavailable" so
/// callers never conflate the latter with a validation failure.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The provider opened a hosted session
    Created { order_id: String, url: String },
    /// The provider call failed; the order was still created
    ProviderUnavailable { order_id: String },
}

impl From<SessionOutcome> for CreateCheckoutResponse {
    fn from(outcome: SessionOutcome) -> Self {
        match outcome {
            SessionOutcome::Created { order_id, url } => Self {
                order_id,
                url: Some(url),
            },
            SessionOutcome::ProviderUnavailable { order_id } => Self {
                order_id,
                url: None,
            },
        }
    }
}

pub(crate) fn checkout_error_to_response(
    err: CheckoutError,
) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Resolve the authenticated caller from the `x-user-id` header.
///
/// Session/token verification happens upstream; this layer only maps
/// the already-authenticated id to a store record.
pub(crate) async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, (StatusCode, Json<ErrorResponse>)> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing x-user-id header", 401)),
            )
        })?;

    let users = state
        .store
        .find_users(&UserQuery {
            id: Some(Predicate::Equals(user_id.to_string())),
        })
        .await
        .map_err(checkout_error_to_response)?;

    users.into_iter().next().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unknown user", 401)),
        )
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "shopflow",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session for the caller's cart
#[instrument(skip(state, headers, request), fields(products = request.product_ids.len()))]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let user = current_user(&state, &headers).await?;

    let outcome = create_session(&state, &user, &request.product_ids)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(outcome.into()))
}

/// Session creation: resolve the cart, create the order, ask the
/// provider for a hosted session.
///
/// The order record is written before the provider call, so a provider
/// failure leaves an unpaid order behind; that failure is swallowed
/// into `ProviderUnavailable` rather than surfaced as a fault.
pub async fn create_session(
    state: &AppState,
    user: &User,
    product_ids: &[String],
) -> CheckoutResult<SessionOutcome> {
    if product_ids.is_empty() {
        return Err(CheckoutError::InvalidRequest(
            "No products in checkout request".to_string(),
        ));
    }

    let products = state
        .store
        .find_products(&ProductQuery {
            id: Some(Predicate::InSet(product_ids.to_vec())),
        })
        .await?;

    // Products without a price reference cannot be checked out
    let priced: Vec<(String, String)> = products
        .iter()
        .filter_map(|product| {
            product
                .price_id
                .clone()
                .map(|price| (product.id.clone(), price))
        })
        .collect();

    let order = state
        .store
        .create_order(shop_core::NewOrder {
            user_id: user.id.clone(),
            product_ids: priced.iter().map(|(id, _)| id.clone()).collect(),
        })
        .await?;

    let mut line_items: Vec<SessionLineItem> = priced
        .iter()
        .map(|(_, price)| SessionLineItem::product(price.as_str()))
        .collect();
    line_items.push(SessionLineItem::service_fee(
        state.config.service_fee_price_id.as_str(),
    ));

    let request = CheckoutRequest {
        line_items,
        success_url: format!(
            "{}/checkout/success?orderId={}",
            state.config.base_url, order.id
        ),
        cancel_url: format!("{}/checkout/cancel", state.config.base_url),
        metadata: SessionMetadata {
            user_id: user.id.clone(),
            order_id: order.id.clone(),
        },
    };

    match state.provider.create_checkout(&request).await {
        Ok(session) => {
            info!(order_id = %order.id, session_id = %session.session_id, "checkout session created");
            Ok(SessionOutcome::Created {
                order_id: order.id,
                url: session.url,
            })
        }
        Err(err) => {
            // The order stays behind unpaid; the caller re-invokes to retry
            warn!(order_id = %order.id, error = %err, "checkout session creation failed");
            Ok(SessionOutcome::ProviderUnavailable { order_id: order.id })
        }
    }
}

/// Poll an order's payment status. Pure read.
#[instrument(skip(state, headers), fields(order_id = %order_id))]
pub async fn order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<OrderStatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let user = current_user(&state, &headers).await?;

    let mut query = OrderQuery::by_id(order_id.as_str());
    match policy::admin_or_self(&user) {
        Access::Allow => {}
        Access::Restrict(predicate) => query.user_id = Some(predicate),
        Access::Deny => {
            return Err(checkout_error_to_response(CheckoutError::not_found(
                "order",
                order_id.as_str(),
            )))
        }
    }

    let orders = state
        .store
        .find_orders(&query)
        .await
        .map_err(checkout_error_to_response)?;

    let order = orders.into_iter().next().ok_or_else(|| {
        checkout_error_to_response(CheckoutError::not_found("order", order_id.as_str()))
    })?;

    Ok(Json(OrderStatusResponse {
        is_paid: order.is_paid,
    }))
}

/// List the product catalog
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let products = state
        .store
        .find_products(&ProductQuery::default())
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(serde_json::json!({
        "products": products,
        "count": products.len()
    })))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let products = state
        .store
        .find_products(&ProductQuery {
            id: Some(Predicate::Equals(product_id.clone())),
        })
        .await
        .map_err(checkout_error_to_response)?;

    let product = products.into_iter().next().ok_or_else(|| {
        checkout_error_to_response(CheckoutError::not_found("product", product_id.as_str()))
    })?;

    Ok(Json(product))
}

/// Checkout success page - the provider redirects here with `?orderId=`
pub async fn checkout_success(
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> impl IntoResponse {
    let order_id = params
        .get("orderId")
        .map(|s| s.as_str())
        .unwrap_or("unknown");
    axum::response::Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Successful</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">&#9989;</div>
        <h1>Thank you!</h1>
        <p>Order: <code>{}</code></p>
        <p style="color: #666;">Your payment is being confirmed. A receipt is on its way to your inbox.</p>
    </div>
</body>
</html>
"#,
        order_id
    ))
}

/// Checkout cancel page
pub async fn checkout_cancel() -> impl IntoResponse {
    axum::response::Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Checkout Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">&#10060;</div>
        <h1>Checkout Cancelled</h1>
        <p style="color: #666;">No charges were made. Your cart is untouched.</p>
    </div>
</body>
</html>
"#,
    )
}
