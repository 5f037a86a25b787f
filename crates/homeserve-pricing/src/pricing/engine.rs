use tracing::debug;

use super::domain::{
    DiscountKind, DiscountLineItem, DiscountRate, Money, PricingContext, PricingResult,
};
use super::promo::PromoCatalog;
use super::rates::{self, FIRST_TIME_RATE, MULTI_SERVICE_UPGRADE_THRESHOLD};
use super::validation::{validate_context, InvalidInput};

pub const CREDIT_DISCOUNT_NAME: &str = "Home Audit Credit";
pub const MULTI_SERVICE_DISCOUNT_NAME: &str = "Multi-Service Bundle";
pub const FIRST_TIME_DISCOUNT_NAME: &str = "First-Time Customer";

/// Error raised by pricing operations.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid pricing input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Stateless calculator holding the promo table it redeems codes against.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    catalog: PromoCatalog,
}

impl PricingEngine {
    pub fn new(catalog: PromoCatalog) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(PromoCatalog::standard())
    }

    pub fn catalog(&self) -> &PromoCatalog {
        &self.catalog
    }

    pub fn calculate(&self, context: &PricingContext) -> Result<PricingResult, PricingError> {
        calculate(context, &self.catalog)
    }
}

/// Apply credit, then at most one percentage discount, then the promo code.
pub fn calculate(
    context: &PricingContext,
    catalog: &PromoCatalog,
) -> Result<PricingResult, PricingError> {
    let subtotal = validate_context(context)?;

    let mut stack = DiscountStack::new(subtotal);
    if context.services.is_empty() {
        return Ok(stack.finish());
    }

    if context.has_credit_available && context.credit_amount > 0 {
        let amount = context.credit_amount.min(stack.running_total);
        stack.push(DiscountLineItem {
            name: CREDIT_DISCOUNT_NAME.to_string(),
            kind: DiscountKind::Credit,
            amount,
            description: format!("${amount} credit from your home audit"),
        });
    }

    if let Some(selected) = select_percentage(context) {
        let amount = selected.rate.apply(stack.running_total);
        stack.push(DiscountLineItem {
            name: selected.name,
            kind: DiscountKind::Percentage,
            amount,
            description: selected.description,
        });
    }

    if let Some(raw_code) = context
        .promo_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
    {
        match catalog.redeem(raw_code, stack.running_total, context) {
            Ok(redemption) => stack.push(DiscountLineItem {
                name: format!("Promo: {}", redemption.code),
                kind: redemption.kind,
                amount: redemption.amount,
                description: redemption.description,
            }),
            Err(reason) => debug!(
                code = raw_code,
                customer_id = context.customer_id.as_deref().unwrap_or("anonymous"),
                %reason,
                "promo code not applied"
            ),
        }
    }

    let result = stack.finish();
    debug!(
        subtotal = result.subtotal,
        final_total = result.final_total,
        discounts = result.applied_discounts.len(),
        "pricing calculated"
    );

    Ok(result)
}

struct SelectedPercentage {
    name: String,
    rate: DiscountRate,
    description: String,
}

/// Property manager tier, then multi-service bundle, then first-time customer.
fn select_percentage(context: &PricingContext) -> Option<SelectedPercentage> {
    if context.is_property_manager {
        if let Some(rate) = context.pm_tier.rate() {
            return Some(SelectedPercentage {
                name: format!("Property Manager {}", context.pm_tier.label()),
                rate,
                description: format!("{rate} off for {} tier", context.pm_tier.as_str()),
            });
        }
    }

    let service_count = context.service_count();
    if let Some(rate) = rates::multi_service_rate(service_count) {
        let threshold = if service_count >= MULTI_SERVICE_UPGRADE_THRESHOLD {
            MULTI_SERVICE_UPGRADE_THRESHOLD
        } else {
            rates::MULTI_SERVICE_THRESHOLD
        };
        return Some(SelectedPercentage {
            name: MULTI_SERVICE_DISCOUNT_NAME.to_string(),
            rate,
            description: format!("{rate} off for booking {threshold}+ services"),
        });
    }

    if context.is_first_time_customer {
        return Some(SelectedPercentage {
            name: FIRST_TIME_DISCOUNT_NAME.to_string(),
            rate: FIRST_TIME_RATE,
            description: format!("{FIRST_TIME_RATE} off your first booking"),
        });
    }

    None
}

struct DiscountStack {
    subtotal: Money,
    running_total: Money,
    applied: Vec<DiscountLineItem>,
}

impl DiscountStack {
    fn new(subtotal: Money) -> Self {
        Self {
            subtotal,
            running_total: subtotal,
            applied: Vec::new(),
        }
    }

    fn push(&mut self, mut discount: DiscountLineItem) {
        discount.amount = discount.amount.clamp(0, self.running_total.max(0));
        self.running_total -= discount.amount;
        self.applied.push(discount);
    }

    fn finish(self) -> PricingResult {
        let final_total = self.running_total.max(0);
        let total_discount = self.subtotal - final_total;
        let savings_message = savings_message(&self.applied, total_discount);

        PricingResult {
            subtotal: self.subtotal,
            applied_discounts: self.applied,
            total_discount,
            final_total,
            savings_message,
        }
    }
}

fn savings_message(applied: &[DiscountLineItem], total_discount: Money) -> String {
    if applied.is_empty() {
        return String::new();
    }

    let names = applied
        .iter()
        .map(|discount| discount.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("You saved ${total_discount} with {names}!")
}
