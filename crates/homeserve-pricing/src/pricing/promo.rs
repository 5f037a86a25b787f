use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    DiscountKind, DiscountRate, Money, PricingContext, BASIS_POINTS_PER_UNIT,
};

/// How a promo code reduces the remaining total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoKind {
    Percentage { basis_points: DiscountRate },
    FixedAmount { amount: Money },
}

impl PromoKind {
    pub const fn discount_kind(self) -> DiscountKind {
        match self {
            PromoKind::Percentage { .. } => DiscountKind::Percentage,
            PromoKind::FixedAmount { .. } => DiscountKind::FixedAmount,
        }
    }

    /// Amount taken off `running_total`; never more than `running_total`.
    pub fn amount_against(self, running_total: Money) -> Money {
        let running_total = running_total.max(0);
        match self {
            PromoKind::Percentage { basis_points } => {
                basis_points.apply(running_total).min(running_total)
            }
            PromoKind::FixedAmount { amount } => amount.min(running_total),
        }
    }
}

/// One entry of the promo table, with its eligibility predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub kind: PromoKind,
    pub description: String,
    /// Compared against the running total at the promo step, not the subtotal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_services: Option<usize>,
    #[serde(default)]
    pub first_time_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

impl PromoCode {
    fn check(
        &self,
        running_total: Money,
        context: &PricingContext,
    ) -> Result<(), PromoRejection> {
        if let Some(required) = self.min_purchase {
            if running_total < required {
                return Err(PromoRejection::BelowMinimumPurchase {
                    required,
                    actual: running_total,
                });
            }
        }

        if let Some(required) = self.min_services {
            if context.service_count() < required {
                return Err(PromoRejection::TooFewServices {
                    required,
                    actual: context.service_count(),
                });
            }
        }

        if self.first_time_only && !context.is_first_time_customer {
            return Err(PromoRejection::FirstTimeOnly);
        }

        if let (Some(valid_until), Some(as_of)) = (self.valid_until, context.as_of) {
            if as_of > valid_until {
                return Err(PromoRejection::Expired { valid_until, as_of });
            }
        }

        Ok(())
    }
}

/// Why a code did not produce a discount. Never surfaced as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromoRejection {
    #[error("unknown promo code")]
    Unknown,
    #[error("running total {actual} below minimum purchase {required}")]
    BelowMinimumPurchase { required: Money, actual: Money },
    #[error("cart has {actual} services, code needs {required}")]
    TooFewServices { required: usize, actual: usize },
    #[error("code is limited to first-time customers")]
    FirstTimeOnly,
    #[error("code expired on {valid_until} (evaluated {as_of})")]
    Expired {
        valid_until: NaiveDate,
        as_of: NaiveDate,
    },
}

/// Eligible promo, ready to be pushed onto the discount stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoRedemption {
    pub code: String,
    pub kind: DiscountKind,
    pub amount: Money,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PromoCatalogError {
    #[error("failed to read promo table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid promo table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("promo code '{code}' is invalid: {reason}")]
    InvalidEntry { code: String, reason: &'static str },
}

/// Promo table keyed by normalized (upper-case) code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoCatalog {
    codes: BTreeMap<String, PromoCode>,
}

pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

impl PromoCatalog {
    pub fn new<I, K>(entries: I) -> Result<Self, PromoCatalogError>
    where
        I: IntoIterator<Item = (K, PromoCode)>,
        K: AsRef<str>,
    {
        let mut codes = BTreeMap::new();
        for (raw_code, promo) in entries {
            let code = normalize_code(raw_code.as_ref());
            validate_entry(&code, &promo)?;
            codes.insert(code, promo);
        }

        Ok(Self { codes })
    }

    /// Built-in seasonal and onboarding codes.
    pub fn standard() -> Self {
        let mut codes = BTreeMap::new();
        codes.insert(
            "SPRING25".to_string(),
            PromoCode {
                kind: PromoKind::Percentage {
                    basis_points: DiscountRate::from_bps(2_500),
                },
                description: "25% off Spring cleaning special".to_string(),
                min_purchase: Some(150),
                min_services: None,
                first_time_only: false,
                valid_until: NaiveDate::from_ymd_opt(2026, 4, 30),
            },
        );
        codes.insert(
            "WELCOME50".to_string(),
            PromoCode {
                kind: PromoKind::FixedAmount { amount: 50 },
                description: "$50 off for first-time customers".to_string(),
                min_purchase: None,
                min_services: None,
                first_time_only: true,
                valid_until: None,
            },
        );
        codes.insert(
            "BUNDLE20".to_string(),
            PromoCode {
                kind: PromoKind::Percentage {
                    basis_points: DiscountRate::from_bps(2_000),
                },
                description: "20% off when booking 2+ services".to_string(),
                min_purchase: None,
                min_services: Some(2),
                first_time_only: false,
                valid_until: None,
            },
        );

        Self { codes }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PromoCatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a JSON object of `CODE -> PromoCode`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PromoCatalogError> {
        let entries: BTreeMap<String, PromoCode> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    pub fn get(&self, code: &str) -> Option<&PromoCode> {
        self.codes.get(&normalize_code(code))
    }

    pub fn codes(&self) -> impl Iterator<Item = (&str, &PromoCode)> {
        self.codes.iter().map(|(code, promo)| (code.as_str(), promo))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Resolve `raw_code` against the table at the point the promo step runs.
    pub fn redeem(
        &self,
        raw_code: &str,
        running_total: Money,
        context: &PricingContext,
    ) -> Result<PromoRedemption, PromoRejection> {
        let code = normalize_code(raw_code);
        let promo = self.codes.get(&code).ok_or(PromoRejection::Unknown)?;
        promo.check(running_total, context)?;

        Ok(PromoRedemption {
            kind: promo.kind.discount_kind(),
            amount: promo.kind.amount_against(running_total),
            description: promo.description.clone(),
            code,
        })
    }
}

fn validate_entry(code: &str, promo: &PromoCode) -> Result<(), PromoCatalogError> {
    let invalid = |reason| PromoCatalogError::InvalidEntry {
        code: code.to_string(),
        reason,
    };

    if code.is_empty() {
        return Err(invalid("code must not be blank"));
    }

    match promo.kind {
        PromoKind::Percentage { basis_points } if basis_points.bps() > BASIS_POINTS_PER_UNIT => {
            return Err(invalid("percentage exceeds 100%"));
        }
        PromoKind::FixedAmount { amount } if amount < 0 => {
            return Err(invalid("fixed amount must not be negative"));
        }
        _ => {}
    }

    if promo.min_purchase.is_some_and(|minimum| minimum < 0) {
        return Err(invalid("minimum purchase must not be negative"));
    }

    Ok(())
}
