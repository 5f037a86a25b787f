use serde::{Deserialize, Serialize};

use super::domain::{DiscountRate, Money};
use super::validation::InvalidInput;

/// Price used when a service is missing from the standard list.
pub const DEFAULT_SERVICE_PRICE: Money = 149;
pub const MIN_BUNDLE_SERVICES: usize = 2;

const STANDARD_PRICES: &[(&str, Money)] = &[
    ("junk-removal", 149),
    ("moving", 299),
    ("cleaning", 129),
    ("landscaping", 179),
    ("handyman", 99),
    ("painting", 249),
    ("pressure-washing", 119),
    ("appliance-removal", 89),
    ("garage-cleanout", 199),
    ("estate-cleanout", 399),
];

/// Starting price for a service slug; underscores and case are ignored.
pub fn standard_price(service: &str) -> Money {
    let slug = service.trim().to_ascii_lowercase().replace('_', "-");
    STANDARD_PRICES
        .iter()
        .find(|(name, _)| *name == slug)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_SERVICE_PRICE)
}

/// Bundle rate by size: 2 services 8%, 3 services 12%, 4 or more 15%.
pub fn bundle_rate(service_count: usize) -> DiscountRate {
    match service_count {
        count if count >= 4 => DiscountRate::from_bps(1_500),
        3 => DiscountRate::from_bps(1_200),
        _ => DiscountRate::from_bps(800),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleLinePrice {
    pub service: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleQuote {
    pub services: Vec<BundleLinePrice>,
    pub total_individual: Money,
    pub discount_rate: DiscountRate,
    pub discount_amount: Money,
    pub bundle_price: Money,
    pub reasoning: String,
}

pub fn quote_bundle<S: AsRef<str>>(services: &[S]) -> Result<BundleQuote, InvalidInput> {
    if services.len() < MIN_BUNDLE_SERVICES {
        return Err(InvalidInput::BundleTooSmall {
            required: MIN_BUNDLE_SERVICES,
            found: services.len(),
        });
    }

    let lines: Vec<BundleLinePrice> = services
        .iter()
        .map(|service| BundleLinePrice {
            service: service.as_ref().trim().to_string(),
            price: standard_price(service.as_ref()),
        })
        .collect();
    let total_individual: Money = lines.iter().map(|line| line.price).sum();
    let rate = bundle_rate(lines.len());
    let discount_amount = rate.apply(total_individual);

    Ok(BundleQuote {
        reasoning: format!(
            "Standard {rate} multi-service discount for {} services",
            lines.len()
        ),
        services: lines,
        total_individual,
        discount_rate: rate,
        discount_amount,
        bundle_price: total_individual - discount_amount,
    })
}

/// Curated bundle with a fixed discount.
#[derive(Debug, Clone, Copy)]
pub struct PopularBundle {
    pub id: &'static str,
    pub name: &'static str,
    pub services: &'static [&'static str],
    pub rate: DiscountRate,
    pub description: &'static str,
}

pub const POPULAR_BUNDLES: &[PopularBundle] = &[
    PopularBundle {
        id: "move-ready",
        name: "Move-Ready Bundle",
        services: &["moving", "cleaning", "junk-removal"],
        rate: DiscountRate::from_bps(1_500),
        description: "Everything you need for a smooth move",
    },
    PopularBundle {
        id: "curb-appeal",
        name: "Curb Appeal Bundle",
        services: &["landscaping", "pressure-washing", "painting"],
        rate: DiscountRate::from_bps(1_200),
        description: "Transform your home's exterior",
    },
    PopularBundle {
        id: "fresh-start",
        name: "Fresh Start Bundle",
        services: &["junk-removal", "cleaning", "handyman"],
        rate: DiscountRate::from_bps(1_000),
        description: "Declutter and refresh your space",
    },
    PopularBundle {
        id: "full-cleanout",
        name: "Full Cleanout Bundle",
        services: &["estate-cleanout", "junk-removal", "cleaning"],
        rate: DiscountRate::from_bps(1_800),
        description: "Complete property cleanout solution",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularBundleView {
    pub id: String,
    pub name: String,
    pub services: Vec<String>,
    pub discount_rate: DiscountRate,
    pub description: String,
    pub individual_total: Money,
    pub bundle_price: Money,
    pub savings: Money,
}

impl PopularBundle {
    pub fn view(&self) -> PopularBundleView {
        let individual_total: Money = self
            .services
            .iter()
            .map(|service| standard_price(service))
            .sum();
        let savings = self.rate.apply(individual_total);

        PopularBundleView {
            id: self.id.to_string(),
            name: self.name.to_string(),
            services: self.services.iter().map(|s| s.to_string()).collect(),
            discount_rate: self.rate,
            description: self.description.to_string(),
            individual_total,
            bundle_price: individual_total - savings,
            savings,
        }
    }
}

pub fn popular_bundles() -> Vec<PopularBundleView> {
    POPULAR_BUNDLES.iter().map(PopularBundle::view).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_applies_size_tiers() {
        let two = quote_bundle(&["moving", "cleaning"]).expect("two services quote");
        assert_eq!(two.total_individual, 428);
        assert_eq!(two.discount_rate.bps(), 800);
        assert_eq!(two.discount_amount, 34);
        assert_eq!(two.bundle_price, 394);

        let four = quote_bundle(&["moving", "cleaning", "handyman", "painting"])
            .expect("four services quote");
        assert_eq!(four.total_individual, 776);
        assert_eq!(four.discount_rate.bps(), 1_500);
        assert_eq!(four.discount_amount, 116);
    }

    #[test]
    fn quote_requires_two_services() {
        let error = quote_bundle(&["moving"]).expect_err("single service rejected");
        assert_eq!(
            error,
            InvalidInput::BundleTooSmall {
                required: 2,
                found: 1
            }
        );
    }

    #[test]
    fn unknown_services_use_default_price() {
        assert_eq!(standard_price("Junk_Removal"), 149);
        assert_eq!(standard_price("pool-resurfacing"), DEFAULT_SERVICE_PRICE);
    }

    #[test]
    fn popular_bundles_report_savings() {
        let views = popular_bundles();
        assert_eq!(views.len(), 4);

        let move_ready = &views[0];
        assert_eq!(move_ready.individual_total, 577);
        assert_eq!(move_ready.savings, 87);
        assert_eq!(move_ready.bundle_price, 490);
    }
}
