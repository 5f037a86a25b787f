//! Display-only helpers: which discounts a shopper qualifies for, and what
//! adding to the cart would unlock. Rates come from [`super::rates`] so the
//! preview never disagrees with the calculator.

use serde::{Deserialize, Serialize};

use super::domain::{Money, PmTier};
use super::engine::{CREDIT_DISCOUNT_NAME, FIRST_TIME_DISCOUNT_NAME, MULTI_SERVICE_DISCOUNT_NAME};
use super::rates::{
    ASSESSMENT_CREDIT, FIRST_TIME_RATE, MULTI_SERVICE_RATE, MULTI_SERVICE_THRESHOLD,
    MULTI_SERVICE_UPGRADE_RATE, MULTI_SERVICE_UPGRADE_THRESHOLD,
};

/// Shopper snapshot used for previews; deliberately narrower than a full context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSummary {
    #[serde(default)]
    pub service_count: usize,
    #[serde(default)]
    pub is_first_time: bool,
    #[serde(default)]
    pub is_property_manager: bool,
    #[serde(default)]
    pub pm_tier: PmTier,
    #[serde(default)]
    pub has_credit_available: bool,
    #[serde(default)]
    pub credit_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPreview {
    pub name: String,
    pub discount: String,
    pub description: String,
    pub is_active: bool,
}

pub fn list_available_discounts(summary: &DiscountSummary) -> Vec<DiscountPreview> {
    let mut previews = Vec::new();

    if summary.has_credit_available && summary.credit_amount > 0 {
        previews.push(DiscountPreview {
            name: CREDIT_DISCOUNT_NAME.to_string(),
            discount: format!("${}", summary.credit_amount),
            description: "Credit from your home audit".to_string(),
            is_active: true,
        });
    }

    let count = summary.service_count;
    if count >= MULTI_SERVICE_UPGRADE_THRESHOLD {
        previews.push(bundle_preview(
            MULTI_SERVICE_UPGRADE_RATE.label(),
            format!("For booking {MULTI_SERVICE_UPGRADE_THRESHOLD}+ services"),
            true,
        ));
    } else if count >= MULTI_SERVICE_THRESHOLD {
        previews.push(bundle_preview(
            MULTI_SERVICE_RATE.label(),
            format!("For booking {MULTI_SERVICE_THRESHOLD}+ services"),
            true,
        ));
    } else if count + 1 == MULTI_SERVICE_THRESHOLD {
        previews.push(bundle_preview(
            MULTI_SERVICE_RATE.label(),
            "Add 1 more service to unlock".to_string(),
            false,
        ));
    }

    if summary.is_property_manager {
        if let Some(rate) = summary.pm_tier.rate() {
            previews.push(DiscountPreview {
                name: format!("Property Manager {}", summary.pm_tier.label()),
                discount: format!("{rate} OFF"),
                description: "Volume pricing for property managers".to_string(),
                is_active: true,
            });
        }
    }

    if summary.is_first_time && !summary.is_property_manager && count < MULTI_SERVICE_THRESHOLD {
        previews.push(DiscountPreview {
            name: FIRST_TIME_DISCOUNT_NAME.to_string(),
            discount: format!("{FIRST_TIME_RATE} OFF"),
            description: "Welcome aboard!".to_string(),
            is_active: true,
        });
    }

    previews
}

fn bundle_preview(rate_label: String, description: String, is_active: bool) -> DiscountPreview {
    DiscountPreview {
        name: MULTI_SERVICE_DISCOUNT_NAME.to_string(),
        discount: format!("{rate_label} OFF"),
        description,
        is_active,
    }
}

/// Current cart state used to suggest additions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    #[serde(default)]
    pub service_count: usize,
    #[serde(default)]
    pub current_total: Money,
    #[serde(default)]
    pub has_primary_assessment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellSuggestion {
    pub suggestion: String,
    pub savings: Money,
    pub description: String,
}

pub fn suggest_upsells(cart: &CartSummary) -> Vec<UpsellSuggestion> {
    let mut suggestions = Vec::new();
    let total = cart.current_total;

    if cart.service_count + 1 == MULTI_SERVICE_THRESHOLD {
        let savings = MULTI_SERVICE_RATE.apply(total);
        suggestions.push(UpsellSuggestion {
            suggestion: "Add 1 more service".to_string(),
            savings,
            description: format!("Unlock {MULTI_SERVICE_RATE} off and save ${savings}!"),
        });
    }

    if cart.service_count + 1 == MULTI_SERVICE_UPGRADE_THRESHOLD {
        let savings = MULTI_SERVICE_UPGRADE_RATE.apply(total) - MULTI_SERVICE_RATE.apply(total);
        suggestions.push(UpsellSuggestion {
            suggestion: "Add 1 more service".to_string(),
            savings,
            description: format!(
                "Upgrade to {MULTI_SERVICE_UPGRADE_RATE} off and save an extra ${savings}!"
            ),
        });
    }

    if !cart.has_primary_assessment && cart.service_count >= 1 {
        suggestions.push(UpsellSuggestion {
            suggestion: "Add Home Audit".to_string(),
            savings: ASSESSMENT_CREDIT,
            description: format!("Free audit with ${ASSESSMENT_CREDIT} credit toward your next booking"),
        });
    }

    suggestions
}
