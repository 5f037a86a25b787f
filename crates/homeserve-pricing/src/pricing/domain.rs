use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole currency units. Signed so the boundary can reject negative input.
pub type Money = i64;

/// Discount rate represented in basis points (1 bp = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(u32);

pub(crate) const BASIS_POINTS_PER_UNIT: u32 = 10_000;

impl DiscountRate {
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    pub const fn bps(self) -> u32 {
        self.0
    }

    /// Rate as a percentage, for display only.
    pub fn percentage(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `round(total * rate)` with halves rounded up. Negative totals yield zero.
    pub fn apply(self, total: Money) -> Money {
        if total <= 0 {
            return 0;
        }

        let scaled = total as i128 * self.0 as i128;
        let half = (BASIS_POINTS_PER_UNIT / 2) as i128;
        let rounded = (scaled + half) / BASIS_POINTS_PER_UNIT as i128;
        rounded.min(Money::MAX as i128) as Money
    }

    /// Human label such as `10%` or `7.5%`.
    pub fn label(self) -> String {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            return format!("{whole}%");
        }

        let decimals = format!("{fraction:02}");
        format!("{whole}.{}%", decimals.trim_end_matches('0'))
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One selected service in the customer's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub service_type: String,
    #[serde(default)]
    pub service_branded: String,
    pub price: Money,
    #[serde(default)]
    pub is_primary_assessment: bool,
}

impl CartLineItem {
    pub fn new(service_type: impl Into<String>, price: Money) -> Self {
        let service_type = service_type.into();
        Self {
            service_branded: service_type.clone(),
            service_type,
            price,
            is_primary_assessment: false,
        }
    }

    pub fn primary_assessment(mut self) -> Self {
        self.is_primary_assessment = true;
        self
    }
}

/// Property-manager volume tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl PmTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            PmTier::None => "none",
            PmTier::Bronze => "bronze",
            PmTier::Silver => "silver",
            PmTier::Gold => "gold",
            PmTier::Platinum => "platinum",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PmTier::None => "None",
            PmTier::Bronze => "Bronze",
            PmTier::Silver => "Silver",
            PmTier::Gold => "Gold",
            PmTier::Platinum => "Platinum",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Some(PmTier::None),
            "bronze" => Some(PmTier::Bronze),
            "silver" => Some(PmTier::Silver),
            "gold" => Some(PmTier::Gold),
            "platinum" => Some(PmTier::Platinum),
            _ => None,
        }
    }
}

/// Full input to a single pricing calculation. Rebuilt for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    #[serde(default)]
    pub services: Vec<CartLineItem>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub is_first_time_customer: bool,
    #[serde(default)]
    pub is_property_manager: bool,
    /// Only read when `is_property_manager` is set.
    #[serde(default)]
    pub pm_tier: PmTier,
    #[serde(default)]
    pub has_credit_available: bool,
    #[serde(default)]
    pub credit_amount: Money,
    #[serde(default)]
    pub promo_code: Option<String>,
    /// Date promo expiry is checked against; expiry is ignored when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl PricingContext {
    pub fn for_services(services: Vec<CartLineItem>) -> Self {
        Self {
            services,
            ..Self::default()
        }
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Sum of line prices, or `None` if it does not fit in [`Money`].
    pub fn subtotal(&self) -> Option<Money> {
        self.services
            .iter()
            .try_fold(0 as Money, |total, item| total.checked_add(item.price))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Credit,
    Percentage,
    FixedAmount,
}

impl DiscountKind {
    pub const fn label(self) -> &'static str {
        match self {
            DiscountKind::Credit => "credit",
            DiscountKind::Percentage => "percentage",
            DiscountKind::FixedAmount => "fixed amount",
        }
    }
}

/// One applied discount. `amount` never exceeds the total it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLineItem {
    pub name: String,
    pub kind: DiscountKind,
    pub amount: Money,
    pub description: String,
}

/// Output of one calculation; `applied_discounts` is in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Money,
    pub applied_discounts: Vec<DiscountLineItem>,
    pub total_discount: Money,
    pub final_total: Money,
    pub savings_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_rounds_half_up() {
        assert_eq!(DiscountRate::from_bps(750).apply(300), 23);
        assert_eq!(DiscountRate::from_bps(1000).apply(151), 15);
        assert_eq!(DiscountRate::from_bps(1000).apply(155), 16);
        assert_eq!(DiscountRate::from_bps(250).apply(0), 0);
        assert_eq!(DiscountRate::from_bps(2500).apply(-40), 0);
    }

    #[test]
    fn rate_labels_trim_trailing_zeros() {
        assert_eq!(DiscountRate::from_bps(1000).label(), "10%");
        assert_eq!(DiscountRate::from_bps(750).label(), "7.5%");
        assert_eq!(DiscountRate::from_bps(250).label(), "2.5%");
        assert_eq!(DiscountRate::from_bps(1205).label(), "12.05%");
    }

    #[test]
    fn tier_parsing_is_case_insensitive() {
        assert_eq!(PmTier::parse(" Gold "), Some(PmTier::Gold));
        assert_eq!(PmTier::parse(""), Some(PmTier::None));
        assert_eq!(PmTier::parse("diamond"), None);
    }

    #[test]
    fn context_deserializes_with_defaults() {
        let context: PricingContext = serde_json::from_str(
            r#"{"services":[{"service_type":"junk_removal","price":100}],"pm_tier":"silver"}"#,
        )
        .expect("context parses");

        assert_eq!(context.service_count(), 1);
        assert_eq!(context.subtotal(), Some(100));
        assert_eq!(context.pm_tier, PmTier::Silver);
        assert!(!context.is_property_manager);
        assert!(context.promo_code.is_none());
    }
}
