use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::bundles::{popular_bundles, quote_bundle};
use super::domain::PricingContext;
use super::engine::{PricingEngine, PricingError};
use super::preview::{list_available_discounts, suggest_upsells, CartSummary, DiscountSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleQuoteRequest {
    pub services: Vec<String>,
}

/// Router builder exposing the pricing and bundle endpoints.
pub fn pricing_router(engine: Arc<PricingEngine>) -> Router {
    Router::new()
        .route("/api/v1/pricing/calculate", post(calculate_handler))
        .route("/api/v1/pricing/discounts/preview", post(preview_handler))
        .route("/api/v1/pricing/upsells", post(upsell_handler))
        .route("/api/v1/bundles/quote", post(bundle_quote_handler))
        .route("/api/v1/bundles/popular", get(popular_bundles_handler))
        .with_state(engine)
}

pub(crate) async fn calculate_handler(
    State(engine): State<Arc<PricingEngine>>,
    Json(context): Json<PricingContext>,
) -> Response {
    match engine.calculate(&context) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(PricingError::InvalidInput(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preview_handler(Json(summary): Json<DiscountSummary>) -> Response {
    (StatusCode::OK, Json(list_available_discounts(&summary))).into_response()
}

pub(crate) async fn upsell_handler(Json(cart): Json<CartSummary>) -> Response {
    (StatusCode::OK, Json(suggest_upsells(&cart))).into_response()
}

pub(crate) async fn bundle_quote_handler(Json(request): Json<BundleQuoteRequest>) -> Response {
    match quote_bundle(&request.services) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn popular_bundles_handler() -> Response {
    (StatusCode::OK, Json(popular_bundles())).into_response()
}
