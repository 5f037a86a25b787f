//! Discount stacking for the home-services marketplace cart.
//!
//! A calculation applies at most one home-audit credit, then at most one
//! percentage discount (property-manager tier, multi-service bundle or
//! first-time customer, in that priority), then at most one promo code.
//! Every operation here is a pure function of its input.

pub mod bundles;
pub mod cart_import;
pub mod domain;
pub mod engine;
pub mod preview;
pub mod promo;
pub mod rates;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use bundles::{popular_bundles, quote_bundle, BundleQuote, PopularBundleView};
pub use cart_import::{CartImportError, CartImporter};
pub use domain::{
    CartLineItem, DiscountKind, DiscountLineItem, DiscountRate, Money, PmTier, PricingContext,
    PricingResult,
};
pub use engine::{calculate, PricingEngine, PricingError};
pub use preview::{
    list_available_discounts, suggest_upsells, CartSummary, DiscountPreview, DiscountSummary,
    UpsellSuggestion,
};
pub use promo::{PromoCatalog, PromoCatalogError, PromoCode, PromoKind, PromoRejection};
pub use router::pricing_router;
pub use validation::InvalidInput;
