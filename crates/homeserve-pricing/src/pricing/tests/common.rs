use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::pricing::domain::{
    CartLineItem, DiscountKind, DiscountLineItem, Money, PmTier, PricingContext, PricingResult,
};
use crate::pricing::engine::PricingEngine;
use crate::pricing::promo::PromoCatalog;

pub(super) fn line(service_type: &str, price: Money) -> CartLineItem {
    CartLineItem::new(service_type, price)
}

pub(super) fn cart(prices: &[Money]) -> Vec<CartLineItem> {
    prices
        .iter()
        .enumerate()
        .map(|(index, price)| line(&format!("service_{index}"), *price))
        .collect()
}

pub(super) fn context(prices: &[Money]) -> PricingContext {
    PricingContext::for_services(cart(prices))
}

pub(super) fn property_manager(prices: &[Money], tier: PmTier) -> PricingContext {
    PricingContext {
        is_property_manager: true,
        pm_tier: tier,
        ..context(prices)
    }
}

pub(super) fn with_promo(mut context: PricingContext, code: &str) -> PricingContext {
    context.promo_code = Some(code.to_string());
    context
}

pub(super) fn discount_named<'a>(
    result: &'a PricingResult,
    name: &str,
) -> Option<&'a DiscountLineItem> {
    result
        .applied_discounts
        .iter()
        .find(|discount| discount.name == name)
}

pub(super) fn amount_of_kind(result: &PricingResult, kind: DiscountKind) -> Money {
    result
        .applied_discounts
        .iter()
        .filter(|discount| discount.kind == kind)
        .map(|discount| discount.amount)
        .sum()
}

pub(super) fn engine() -> PricingEngine {
    PricingEngine::new(PromoCatalog::standard())
}

pub(super) fn shared_engine() -> Arc<PricingEngine> {
    Arc::new(engine())
}

pub(super) fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
