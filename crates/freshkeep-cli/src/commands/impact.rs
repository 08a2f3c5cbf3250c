use clap::Args;
use freshkeep_core::{estimate_environmental_impact, estimate_value, Category};
use serde::Serialize;

use super::{print_json, CliResult};

#[derive(Args)]
pub struct ImpactArgs {
    /// Food category; unknown names fall back to "other"
    #[arg(long, default_value = "other")]
    category: String,
    #[arg(long, default_value_t = 1.0)]
    quantity: f64,
    /// Unit (piece, kg, liter, ...)
    #[arg(long, default_value = "piece")]
    unit: String,
}

#[derive(Serialize)]
struct ImpactEstimate {
    category: Category,
    quantity: f64,
    unit: String,
    estimated_value: f64,
    co2_kg: f64,
    water_liters: f64,
}

pub fn run(args: ImpactArgs) -> CliResult {
    if !args.quantity.is_finite() || args.quantity < 0.0 {
        return Err(format!("quantity must be a non-negative number, got {}", args.quantity).into());
    }

    let category = Category::parse_lenient(&args.category);
    let impact = estimate_environmental_impact(category, args.quantity, &args.unit);

    print_json(&ImpactEstimate {
        category,
        quantity: args.quantity,
        estimated_value: estimate_value(category, args.quantity, &args.unit),
        co2_kg: impact.co2_kg,
        water_liters: impact.water_liters,
        unit: args.unit,
    })
}
