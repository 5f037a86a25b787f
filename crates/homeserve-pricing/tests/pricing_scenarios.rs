use homeserve_pricing::pricing::{
    calculate, CartLineItem, DiscountKind, PmTier, PricingContext, PricingEngine, PromoCatalog,
};

fn cart(prices: &[i64]) -> Vec<CartLineItem> {
    prices
        .iter()
        .map(|price| CartLineItem::new("junk_removal", *price))
        .collect()
}

#[test]
fn scenario_single_service_no_flags() {
    let context = PricingContext::for_services(cart(&[100]));

    let result = calculate(&context, &PromoCatalog::standard()).expect("calculates");

    assert_eq!(result.subtotal, 100);
    assert!(result.applied_discounts.is_empty());
    assert_eq!(result.final_total, 100);
}

#[test]
fn scenario_three_services_unlock_bundle() {
    let context = PricingContext::for_services(cart(&[100, 100, 100]));

    let result = PricingEngine::standard()
        .calculate(&context)
        .expect("calculates");

    assert_eq!(result.applied_discounts.len(), 1);
    assert_eq!(result.applied_discounts[0].amount, 30);
    assert_eq!(result.final_total, 270);
}

#[test]
fn scenario_credit_then_first_time() {
    let context = PricingContext {
        is_first_time_customer: true,
        has_credit_available: true,
        credit_amount: 49,
        ..PricingContext::for_services(cart(&[200]))
    };

    let result = PricingEngine::standard()
        .calculate(&context)
        .expect("calculates");

    assert_eq!(result.applied_discounts[0].kind, DiscountKind::Credit);
    assert_eq!(result.applied_discounts[0].amount, 49);
    assert_eq!(result.applied_discounts[1].amount, 15);
    assert_eq!(result.final_total, 136);
}

#[test]
fn scenario_spring_promo() {
    let context = PricingContext {
        promo_code: Some("SPRING25".to_string()),
        ..PricingContext::for_services(cart(&[500]))
    };

    let result = PricingEngine::standard()
        .calculate(&context)
        .expect("calculates");

    assert_eq!(result.applied_discounts.len(), 1);
    assert_eq!(result.applied_discounts[0].name, "Promo: SPRING25");
    assert_eq!(result.applied_discounts[0].amount, 125);
    assert_eq!(result.final_total, 375);
}

#[test]
fn scenario_gold_property_manager() {
    let context = PricingContext {
        is_property_manager: true,
        pm_tier: PmTier::Gold,
        ..PricingContext::for_services(cart(&[300]))
    };

    let result = PricingEngine::standard()
        .calculate(&context)
        .expect("calculates");

    assert_eq!(result.applied_discounts[0].amount, 23);
    assert_eq!(result.final_total, 277);
    assert_eq!(result.total_discount, 23);
}

#[test]
fn eligible_promo_always_lowers_total() {
    let engine = PricingEngine::standard();
    let base = PricingContext {
        is_first_time_customer: true,
        ..PricingContext::for_services(cart(&[120, 90]))
    };

    let without = engine.calculate(&base).expect("calculates");
    for code in ["BUNDLE20", "WELCOME50"] {
        let with_code = PricingContext {
            promo_code: Some(code.to_string()),
            ..base.clone()
        };
        let result = engine.calculate(&with_code).expect("calculates");
        assert!(
            result.final_total < without.final_total,
            "{code} should lower the total"
        );
    }
}

#[test]
fn credit_larger_than_cart_is_capped_at_subtotal() {
    let context = PricingContext {
        has_credit_available: true,
        credit_amount: 500,
        ..PricingContext::for_services(cart(&[80, 40]))
    };

    let result = PricingEngine::standard()
        .calculate(&context)
        .expect("calculates");

    assert_eq!(result.applied_discounts[0].amount, 120);
    assert_eq!(result.final_total, 0);
    assert_eq!(result.total_discount, 120);
}
