//! Monetary value and environmental cost estimates.
//!
//! These are order-of-magnitude figures used for savings/waste accounting,
//! but the formula (unit normalization and fallback chain) is fixed.

use serde::{Deserialize, Serialize};

use crate::policy::{Category, PolicyTable};

/// Assumed mass of one "piece" in kilograms.
pub const PIECE_MASS_KG: f64 = 0.15;

/// Liters convert 1:1 to kilograms (density of water).
pub const LITER_MASS_KG: f64 = 1.0;

/// Environmental cost of a quantity of food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub co2_kg: f64,
    pub water_liters: f64,
}

/// Round to `places` decimals, ties to even (`0.125` becomes `0.12`).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Quantity expressed in kilograms.
///
/// Pieces use [`PIECE_MASS_KG`], liters use [`LITER_MASS_KG`]; any other unit
/// passes through unchanged.
pub fn normalize_to_kg(quantity: f64, unit: &str) -> f64 {
    match unit.trim().to_lowercase().as_str() {
        "piece" | "pieces" => quantity * PIECE_MASS_KG,
        "liter" | "liters" | "l" => quantity * LITER_MASS_KG,
        _ => quantity,
    }
}

/// Estimated value of `quantity` `unit`s of a category, rounded to cents.
pub fn estimate_value(category: Category, quantity: f64, unit: &str) -> f64 {
    estimate_value_with(PolicyTable::builtin(), category, quantity, unit)
}

pub fn estimate_value_with(
    table: &PolicyTable,
    category: Category,
    quantity: f64,
    unit: &str,
) -> f64 {
    let unit_price = table.unit_price(category, unit);
    round_to(quantity * unit_price.price, 2)
}

/// CO2 (kg, 2 decimals) and water (whole liters) for a quantity of food.
pub fn estimate_environmental_impact(
    category: Category,
    quantity: f64,
    unit: &str,
) -> EnvironmentalImpact {
    estimate_environmental_impact_with(PolicyTable::builtin(), category, quantity, unit)
}

pub fn estimate_environmental_impact_with(
    table: &PolicyTable,
    category: Category,
    quantity: f64,
    unit: &str,
) -> EnvironmentalImpact {
    let kg = normalize_to_kg(quantity, unit);
    let coefficients = table.environmental(category);

    EnvironmentalImpact {
        co2_kg: round_to(kg * coefficients.co2_per_kg, 2),
        water_liters: round_to(kg * coefficients.water_per_kg_liters, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_uses_exact_unit_price() {
        assert_eq!(estimate_value(Category::Meat, 1.5, "kg"), 18.0);
        assert_eq!(estimate_value(Category::Dairy, 2.0, "liter"), 4.0);
    }

    #[test]
    fn value_falls_back_to_piece_price() {
        assert_eq!(estimate_value(Category::Dairy, 1.0, "box"), 3.0);
        assert_eq!(estimate_value(Category::Canned, 3.0, "kg"), 6.0);
    }

    #[test]
    fn value_rounds_to_cents() {
        assert_eq!(estimate_value(Category::Fruits, 3.0, "piece"), 2.25);
        // 1.234 * 3.0 = 3.702
        assert_eq!(estimate_value(Category::Vegetables, 1.234, "kg"), 3.7);
    }

    #[test]
    fn ties_round_to_even() {
        // 0.5 * 0.25 = 0.125 exactly
        assert_eq!(estimate_value(Category::Eggs, 0.5, "piece"), 0.12);
        // 1.5 * 0.25 = 0.375 exactly
        assert_eq!(estimate_value(Category::Eggs, 1.5, "piece"), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }

    #[test]
    fn water_tie_rounds_to_even_liter() {
        // 0.0025 kg * 1000 L/kg = 2.5
        let impact = estimate_environmental_impact(Category::Other, 0.0025, "kg");
        assert_eq!(impact.water_liters, 2.0);
    }

    #[test]
    fn pieces_are_normalized_to_150g() {
        let impact = estimate_environmental_impact(Category::Meat, 2.0, "piece");
        // 0.3 kg * 27.0 = 8.1 ; 0.3 * 15400 = 4620
        assert_eq!(impact.co2_kg, 8.1);
        assert_eq!(impact.water_liters, 4620.0);
    }

    #[test]
    fn liters_and_kg_pass_through() {
        let liters = estimate_environmental_impact(Category::Dairy, 1.0, "L");
        assert_eq!(liters.co2_kg, 3.2);
        assert_eq!(liters.water_liters, 1000.0);

        let kg = estimate_environmental_impact(Category::Vegetables, 2.0, "kg");
        assert_eq!(kg.co2_kg, 4.0);
        assert_eq!(kg.water_liters, 600.0);
    }

    #[test]
    fn uncovered_category_uses_other_coefficients() {
        let impact = estimate_environmental_impact(Category::Beverages, 2.0, "kg");
        assert_eq!(impact.co2_kg, 5.0);
        assert_eq!(impact.water_liters, 2000.0);
    }

    #[test]
    fn water_rounds_to_whole_liters() {
        // 0.4 kg of fish: 0.4 * 3500 = 1400 ; 1 piece of fruit: 0.15 * 800 = 120
        let fish = estimate_environmental_impact(Category::Fish, 0.4, "kg");
        assert_eq!(fish.water_liters, 1400.0);
        let fruit = estimate_environmental_impact(Category::Fruits, 1.0, "piece");
        assert_eq!(fruit.water_liters, 120.0);
    }

    #[test]
    fn estimators_are_deterministic() {
        let a = estimate_environmental_impact(Category::Fish, 0.7, "kg");
        let b = estimate_environmental_impact(Category::Fish, 0.7, "kg");
        assert_eq!(a.co2_kg.to_bits(), b.co2_kg.to_bits());
        assert_eq!(a.water_liters.to_bits(), b.water_liters.to_bits());
        assert_eq!(
            estimate_value(Category::Fish, 0.7, "kg").to_bits(),
            estimate_value(Category::Fish, 0.7, "kg").to_bits()
        );
    }
}
