use crate::infra::{load_pricing_engine, parse_date, parse_line_item, parse_tier};
use chrono::NaiveDate;
use clap::Args;
use homeserve_pricing::config::AppConfig;
use homeserve_pricing::error::AppError;
use homeserve_pricing::pricing::{
    list_available_discounts, popular_bundles, quote_bundle, suggest_upsells, CartImporter,
    CartLineItem, CartSummary, DiscountSummary, Money, PmTier, PricingContext, PricingEngine,
    PricingError, PricingResult,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct QuoteArgs {
    /// Saved cart export (CSV with Service Type, Service Name, Price columns)
    #[arg(long, conflicts_with = "service")]
    pub(crate) cart_csv: Option<PathBuf>,
    /// Cart line as SERVICE=PRICE; repeat for each service
    #[arg(long = "service", value_parser = parse_line_item)]
    pub(crate) service: Vec<CartLineItem>,
    /// Treat the shopper as a first-time customer
    #[arg(long)]
    pub(crate) first_time: bool,
    /// Treat the shopper as a property manager
    #[arg(long)]
    pub(crate) property_manager: bool,
    /// Property-manager tier (none, bronze, silver, gold, platinum)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) pm_tier: Option<PmTier>,
    /// Derive the tier from a managed property count instead of --pm-tier
    #[arg(long, conflicts_with = "pm_tier")]
    pub(crate) property_count: Option<u32>,
    /// Annual contract flag used with --property-count
    #[arg(long, requires = "property_count")]
    pub(crate) annual_contract: bool,
    /// Home audit credit available to the shopper
    #[arg(long)]
    pub(crate) credit: Option<Money>,
    /// Promo code to redeem
    #[arg(long)]
    pub(crate) promo: Option<String>,
    /// Pricing date (YYYY-MM-DD) used for promo expiry
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Promo table JSON; overrides PRICING_PROMO_TABLE
    #[arg(long)]
    pub(crate) promo_table: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pricing date (YYYY-MM-DD) used for promo expiry. Expiry is skipped when absent.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Skip the curated bundle catalog at the end of the demo.
    #[arg(long)]
    pub(crate) skip_bundles: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let promo_table = args.promo_table.clone().or(config.pricing.promo_table);
    let engine = load_pricing_engine(promo_table.as_deref())?;

    let services = match &args.cart_csv {
        Some(path) => CartImporter::from_path(path)?,
        None => args.service.clone(),
    };
    let context = quote_context(&args, services);
    let result = engine.calculate(&context)?;

    println!("Cart quote");
    render_pricing(&context, &result);

    let previews = list_available_discounts(&discount_summary(&context));
    if !previews.is_empty() {
        println!("\nAvailable discounts");
        for preview in previews {
            let state = if preview.is_active { "active" } else { "locked" };
            println!(
                "  {:<24} {:<10} {} ({})",
                preview.name, preview.discount, preview.description, state
            );
        }
    }

    let upsells = suggest_upsells(&CartSummary {
        service_count: context.service_count(),
        current_total: result.final_total,
        has_primary_assessment: context
            .services
            .iter()
            .any(|item| item.is_primary_assessment),
    });
    if !upsells.is_empty() {
        println!("\nSuggestions");
        for upsell in upsells {
            println!(
                "  {:<24} save ${:<6} {}",
                upsell.suggestion, upsell.savings, upsell.description
            );
        }
    }

    Ok(())
}

fn quote_context(args: &QuoteArgs, services: Vec<CartLineItem>) -> PricingContext {
    let pm_tier = match args.property_count {
        Some(count) => PmTier::from_property_count(count, args.annual_contract),
        None => args.pm_tier.unwrap_or_default(),
    };
    let credit_amount = args.credit.unwrap_or(0);

    PricingContext {
        is_first_time_customer: args.first_time,
        is_property_manager: args.property_manager || pm_tier != PmTier::None,
        pm_tier,
        has_credit_available: credit_amount > 0,
        credit_amount,
        promo_code: args.promo.clone(),
        as_of: args.as_of,
        ..PricingContext::for_services(services)
    }
}

fn discount_summary(context: &PricingContext) -> DiscountSummary {
    DiscountSummary {
        service_count: context.service_count(),
        is_first_time: context.is_first_time_customer,
        is_property_manager: context.is_property_manager,
        pm_tier: context.pm_tier,
        has_credit_available: context.has_credit_available,
        credit_amount: context.credit_amount,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = PricingEngine::standard();

    println!("Marketplace pricing demo");
    for (title, context) in demo_scenarios(args.as_of) {
        println!("\n{title}");
        let result = engine.calculate(&context)?;
        render_pricing(&context, &result);
    }

    if !args.skip_bundles {
        println!("\nCurated bundles");
        for bundle in popular_bundles() {
            println!(
                "  {:<22} {} off  ${} -> ${} (save ${})",
                bundle.name,
                bundle.discount_rate,
                bundle.individual_total,
                bundle.bundle_price,
                bundle.savings
            );
        }

        let quote =
            quote_bundle(&["moving", "cleaning", "handyman"]).map_err(PricingError::from)?;
        println!(
            "\nCustom bundle: {} services ${} -> ${} ({})",
            quote.services.len(),
            quote.total_individual,
            quote.bundle_price,
            quote.reasoning
        );
    }

    Ok(())
}

fn demo_scenarios(as_of: Option<NaiveDate>) -> Vec<(&'static str, PricingContext)> {
    let cart = |prices: &[Money]| -> Vec<CartLineItem> {
        prices
            .iter()
            .map(|price| CartLineItem::new("junk_removal", *price))
            .collect()
    };

    vec![
        (
            "Single service, no discounts",
            PricingContext {
                as_of,
                ..PricingContext::for_services(cart(&[100]))
            },
        ),
        (
            "Three services unlock the bundle",
            PricingContext {
                as_of,
                ..PricingContext::for_services(cart(&[100, 100, 100]))
            },
        ),
        (
            "Audit credit then first-time discount",
            PricingContext {
                is_first_time_customer: true,
                has_credit_available: true,
                credit_amount: 49,
                as_of,
                ..PricingContext::for_services(cart(&[200]))
            },
        ),
        (
            "Spring promo code",
            PricingContext {
                promo_code: Some("SPRING25".to_string()),
                as_of,
                ..PricingContext::for_services(cart(&[500]))
            },
        ),
        (
            "Gold property manager",
            PricingContext {
                is_property_manager: true,
                pm_tier: PmTier::Gold,
                as_of,
                ..PricingContext::for_services(cart(&[300]))
            },
        ),
    ]
}

pub(crate) fn render_pricing(context: &PricingContext, result: &PricingResult) {
    for item in &context.services {
        println!("  {:<28} ${}", item.service_branded, item.price);
    }
    println!("  {:<28} ${}", "Subtotal", result.subtotal);

    if result.applied_discounts.is_empty() {
        println!("  Discounts: none");
    } else {
        for discount in &result.applied_discounts {
            println!(
                "  - {:<26} -${:<6} {}",
                discount.name, discount.amount, discount.description
            );
        }
    }

    println!("  {:<28} ${}", "Total", result.final_total);
    if !result.savings_message.is_empty() {
        println!("  {}", result.savings_message);
    }
}
