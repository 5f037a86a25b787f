use chrono::NaiveDate;
use homeserve_pricing::error::AppError;
use homeserve_pricing::pricing::{CartLineItem, Money, PmTier, PricingEngine, PromoCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine backed by the configured promo table, or the built-in codes.
pub(crate) fn load_pricing_engine(promo_table: Option<&Path>) -> Result<PricingEngine, AppError> {
    let catalog = match promo_table {
        Some(path) => {
            let catalog = PromoCatalog::from_path(path)?;
            info!(path = %path.display(), codes = catalog.len(), "loaded promo table");
            catalog
        }
        None => PromoCatalog::standard(),
    };

    Ok(PricingEngine::new(catalog))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_tier(raw: &str) -> Result<PmTier, String> {
    PmTier::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not one of none, bronze, silver, gold, platinum"))
}

/// Parse `SERVICE=PRICE`, e.g. `junk_removal=149`.
pub(crate) fn parse_line_item(raw: &str) -> Result<CartLineItem, String> {
    let (service, price) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SERVICE=PRICE, got '{raw}'"))?;
    let service = service.trim();
    if service.is_empty() {
        return Err(format!("missing service name in '{raw}'"));
    }

    let price = price
        .trim()
        .parse::<Money>()
        .map_err(|err| format!("invalid price in '{raw}' ({err})"))?;

    Ok(CartLineItem::new(service, price))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_items_parse_from_flags() {
        let item = parse_line_item("junk_removal = 149").expect("parses");
        assert_eq!(item.service_type, "junk_removal");
        assert_eq!(item.price, 149);

        assert!(parse_line_item("junk_removal").is_err());
        assert!(parse_line_item("=20").is_err());
        assert!(parse_line_item("cleaning=cheap").is_err());
    }

    #[test]
    fn tiers_and_dates_parse() {
        assert_eq!(parse_tier("Gold"), Ok(PmTier::Gold));
        assert!(parse_tier("diamond").is_err());
        assert_eq!(
            parse_date("2026-04-30"),
            Ok(NaiveDate::from_ymd_opt(2026, 4, 30).expect("valid date"))
        );
    }

    #[test]
    fn missing_promo_table_is_reported() {
        let error = load_pricing_engine(Some(Path::new("./missing-promos.json")))
            .expect_err("file does not exist");
        assert!(matches!(error, AppError::PromoCatalog(_)));
    }

    #[test]
    fn standard_codes_without_table() {
        let engine = load_pricing_engine(None).expect("standard engine");
        assert_eq!(engine.catalog().len(), 3);
    }
}
