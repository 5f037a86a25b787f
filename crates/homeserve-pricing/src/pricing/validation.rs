use super::domain::{Money, PricingContext};

/// Boundary rejections for input that falls outside the pricing domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("line item {index} ({service_type}) has negative price {price}")]
    NegativePrice {
        index: usize,
        service_type: String,
        price: Money,
    },
    #[error("credit amount must not be negative (found {0})")]
    NegativeCredit(Money),
    #[error("bundle requires at least {required} services (found {found})")]
    BundleTooSmall { required: usize, found: usize },
    #[error("cart subtotal exceeds the supported range")]
    SubtotalOverflow,
}

/// Reject contexts the calculator is not defined for; returns the cart subtotal.
pub fn validate_context(context: &PricingContext) -> Result<Money, InvalidInput> {
    if let Some((index, item)) = context
        .services
        .iter()
        .enumerate()
        .find(|(_, item)| item.price < 0)
    {
        return Err(InvalidInput::NegativePrice {
            index,
            service_type: item.service_type.clone(),
            price: item.price,
        });
    }

    if context.credit_amount < 0 {
        return Err(InvalidInput::NegativeCredit(context.credit_amount));
    }

    context.subtotal().ok_or(InvalidInput::SubtotalOverflow)
}
