//! Canonical rate tables shared by the calculator and the display helpers.

use super::domain::{DiscountRate, Money, PmTier};

/// Cart size that unlocks the multi-service bundle.
pub const MULTI_SERVICE_THRESHOLD: usize = 3;
/// Cart size that upgrades the bundle to the higher rate.
pub const MULTI_SERVICE_UPGRADE_THRESHOLD: usize = 5;

pub const MULTI_SERVICE_RATE: DiscountRate = DiscountRate::from_bps(1_000);
pub const MULTI_SERVICE_UPGRADE_RATE: DiscountRate = DiscountRate::from_bps(1_500);
pub const FIRST_TIME_RATE: DiscountRate = DiscountRate::from_bps(1_000);

/// Credit issued toward the next booking after a home audit.
pub const ASSESSMENT_CREDIT: Money = 25;

const BRONZE_MIN_PROPERTIES: u32 = 10;
const SILVER_MIN_PROPERTIES: u32 = 25;
const GOLD_MIN_PROPERTIES: u32 = 50;

impl PmTier {
    /// Volume discount for the tier; `None` carries no discount.
    pub const fn rate(self) -> Option<DiscountRate> {
        match self {
            PmTier::None => None,
            PmTier::Bronze => Some(DiscountRate::from_bps(250)),
            PmTier::Silver => Some(DiscountRate::from_bps(500)),
            PmTier::Gold => Some(DiscountRate::from_bps(750)),
            PmTier::Platinum => Some(DiscountRate::from_bps(1_000)),
        }
    }

    /// Tier earned by portfolio size. Platinum is reserved for annual contracts.
    pub fn from_property_count(property_count: u32, annual_contract: bool) -> PmTier {
        if annual_contract {
            return PmTier::Platinum;
        }

        match property_count {
            count if count >= GOLD_MIN_PROPERTIES => PmTier::Gold,
            count if count >= SILVER_MIN_PROPERTIES => PmTier::Silver,
            count if count >= BRONZE_MIN_PROPERTIES => PmTier::Bronze,
            _ => PmTier::None,
        }
    }
}

/// Bundle rate for a cart of `service_count` items, if any.
pub fn multi_service_rate(service_count: usize) -> Option<DiscountRate> {
    if service_count >= MULTI_SERVICE_UPGRADE_THRESHOLD {
        Some(MULTI_SERVICE_UPGRADE_RATE)
    } else if service_count >= MULTI_SERVICE_THRESHOLD {
        Some(MULTI_SERVICE_RATE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_rates_match_volume_table() {
        assert_eq!(PmTier::None.rate(), None);
        assert_eq!(PmTier::Bronze.rate().map(DiscountRate::bps), Some(250));
        assert_eq!(PmTier::Silver.rate().map(DiscountRate::bps), Some(500));
        assert_eq!(PmTier::Gold.rate().map(DiscountRate::bps), Some(750));
        assert_eq!(PmTier::Platinum.rate().map(DiscountRate::bps), Some(1_000));
    }

    #[test]
    fn property_count_reaches_gold_without_contract() {
        assert_eq!(PmTier::from_property_count(9, false), PmTier::None);
        assert_eq!(PmTier::from_property_count(10, false), PmTier::Bronze);
        assert_eq!(PmTier::from_property_count(25, false), PmTier::Silver);
        assert_eq!(PmTier::from_property_count(50, false), PmTier::Gold);
        assert_eq!(PmTier::from_property_count(400, false), PmTier::Gold);
        assert_eq!(PmTier::from_property_count(3, true), PmTier::Platinum);
    }

    #[test]
    fn bundle_rate_steps_at_three_and_five() {
        assert_eq!(multi_service_rate(2), None);
        assert_eq!(multi_service_rate(3), Some(MULTI_SERVICE_RATE));
        assert_eq!(multi_service_rate(4), Some(MULTI_SERVICE_RATE));
        assert_eq!(multi_service_rate(5), Some(MULTI_SERVICE_UPGRADE_RATE));
    }
}
