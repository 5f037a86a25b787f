use std::io::Cursor;

use chrono::NaiveDate;

use super::common::*;
use crate::pricing::domain::DiscountKind;
use crate::pricing::promo::{PromoCatalog, PromoCatalogError, PromoKind, PromoRejection};

#[test]
fn standard_catalog_holds_three_codes() {
    let catalog = PromoCatalog::standard();

    assert_eq!(catalog.len(), 3);
    let codes: Vec<_> = catalog.codes().map(|(code, _)| code).collect();
    assert_eq!(codes, vec!["BUNDLE20", "SPRING25", "WELCOME50"]);
    assert!(catalog.get("welcome50").is_some());
}

#[test]
fn redeem_reports_rejection_reason() {
    let catalog = PromoCatalog::standard();
    let single = context(&[100]);

    assert_eq!(
        catalog.redeem("BUNDLE20", 100, &single),
        Err(PromoRejection::TooFewServices {
            required: 2,
            actual: 1
        })
    );
    assert_eq!(
        catalog.redeem("SPRING25", 100, &single),
        Err(PromoRejection::BelowMinimumPurchase {
            required: 150,
            actual: 100
        })
    );
    assert_eq!(
        catalog.redeem("WELCOME50", 100, &single),
        Err(PromoRejection::FirstTimeOnly)
    );
    assert_eq!(
        catalog.redeem("NOPE", 100, &single),
        Err(PromoRejection::Unknown)
    );
}

#[test]
fn fixed_amount_is_capped_at_running_total() {
    let kind = PromoKind::FixedAmount { amount: 50 };
    assert_eq!(kind.amount_against(20), 20);
    assert_eq!(kind.amount_against(80), 50);
    assert_eq!(kind.discount_kind(), DiscountKind::FixedAmount);
}

#[test]
fn catalog_loads_from_json() {
    let json = r#"{
        "fall10": {
            "kind": { "type": "percentage", "basis_points": 1000 },
            "description": "10% off fall gutter season",
            "min_services": 1,
            "valid_until": "2026-11-30"
        },
        "HANDY15": {
            "kind": { "type": "fixed_amount", "amount": 15 },
            "description": "$15 off handyman visits"
        }
    }"#;

    let catalog = PromoCatalog::from_reader(Cursor::new(json)).expect("catalog parses");

    assert_eq!(catalog.len(), 2);
    let fall = catalog.get("FALL10").expect("normalized key");
    assert_eq!(fall.valid_until, NaiveDate::from_ymd_opt(2026, 11, 30));
    assert!(!fall.first_time_only);

    let handy = catalog.get("handy15").expect("fixed code");
    assert_eq!(handy.kind, PromoKind::FixedAmount { amount: 15 });
}

#[test]
fn catalog_rejects_out_of_range_entries() {
    let json = r#"{ "MEGA": { "kind": { "type": "percentage", "basis_points": 15000 }, "description": "too much" } }"#;

    let error = PromoCatalog::from_reader(Cursor::new(json)).expect_err("rate above 100%");

    match error {
        PromoCatalogError::InvalidEntry { code, .. } => assert_eq!(code, "MEGA"),
        other => panic!("expected invalid entry, got {other:?}"),
    }
}

#[test]
fn engine_uses_injected_catalog() {
    let json = r#"{ "TEN": { "kind": { "type": "fixed_amount", "amount": 10 }, "description": "$10 off" } }"#;
    let catalog = PromoCatalog::from_reader(Cursor::new(json)).expect("catalog parses");
    let engine = crate::pricing::engine::PricingEngine::new(catalog);

    let custom = engine
        .calculate(&with_promo(context(&[500]), "ten"))
        .expect("calculates");
    assert_eq!(custom.final_total, 490);

    let standard_code = engine
        .calculate(&with_promo(context(&[500]), "SPRING25"))
        .expect("calculates");
    assert_eq!(standard_code.final_total, 500);
}
