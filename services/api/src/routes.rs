use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use homeserve_pricing::error::AppError;
use homeserve_pricing::pricing::{
    pricing_router, suggest_upsells, CartImporter, CartSummary, Money, PmTier, PricingContext,
    PricingEngine, PricingResult, UpsellSuggestion,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Saved cart pasted as CSV plus the shopper flags the calculator needs.
#[derive(Debug, Deserialize)]
pub(crate) struct CartQuoteRequest {
    pub(crate) cart_csv: String,
    #[serde(default)]
    pub(crate) customer_id: Option<String>,
    #[serde(default)]
    pub(crate) is_first_time_customer: bool,
    #[serde(default)]
    pub(crate) is_property_manager: bool,
    #[serde(default)]
    pub(crate) pm_tier: PmTier,
    #[serde(default)]
    pub(crate) has_credit_available: bool,
    #[serde(default)]
    pub(crate) credit_amount: Money,
    #[serde(default)]
    pub(crate) promo_code: Option<String>,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CartQuoteResponse {
    pub(crate) service_count: usize,
    pub(crate) pricing: PricingResult,
    pub(crate) upsells: Vec<UpsellSuggestion>,
}

pub(crate) fn with_pricing_routes(engine: Arc<PricingEngine>) -> axum::Router {
    let cart_routes = axum::Router::new()
        .route(
            "/api/v1/pricing/cart/quote",
            axum::routing::post(cart_quote_endpoint),
        )
        .with_state(engine.clone());

    pricing_router(engine)
        .merge(cart_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cart_quote_endpoint(
    State(engine): State<Arc<PricingEngine>>,
    Json(payload): Json<CartQuoteRequest>,
) -> Result<Json<CartQuoteResponse>, AppError> {
    let CartQuoteRequest {
        cart_csv,
        customer_id,
        is_first_time_customer,
        is_property_manager,
        pm_tier,
        has_credit_available,
        credit_amount,
        promo_code,
        as_of,
    } = payload;

    let services = CartImporter::from_reader(Cursor::new(cart_csv.into_bytes()))?;
    let context = PricingContext {
        customer_id,
        is_first_time_customer,
        is_property_manager,
        pm_tier,
        has_credit_available,
        credit_amount,
        promo_code,
        as_of,
        ..PricingContext::for_services(services)
    };

    let pricing = engine.calculate(&context)?;
    let upsells = suggest_upsells(&CartSummary {
        service_count: context.service_count(),
        current_total: pricing.final_total,
        has_primary_assessment: context
            .services
            .iter()
            .any(|item| item.is_primary_assessment),
    });

    Ok(Json(CartQuoteResponse {
        service_count: context.service_count(),
        pricing,
        upsells,
    }))
}
