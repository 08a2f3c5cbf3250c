//! Category policy table.
//!
//! Static mapping of category to base shelf life, unit prices and
//! environmental intensity. The table is built once per process and never
//! mutated. Every fallback the lookups apply is an explicit, named branch:
//!
//! - a category missing from the table resolves to the `other` policy
//! - an unknown unit resolves to the category's `piece` price, then to
//!   [`DEFAULT_UNIT_PRICE`]
//! - a category without environmental coefficients uses those of `other`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::category::Category;
use crate::error::ValidationError;

/// Price used when neither the unit nor `piece` is priced for a category.
pub const DEFAULT_UNIT_PRICE: f64 = 2.00;

/// Unit whose price stands in for unknown units.
pub const PIECE_UNIT: &str = "piece";

const FALLBACK_CO2_PER_KG: f64 = 2.5;
const FALLBACK_WATER_PER_KG_LITERS: f64 = 1000.0;

/// Per-category policy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Days an item stays usable before storage/mode adjustment
    pub base_shelf_life_days: i64,
    /// Price per unit, keyed by lowercase unit name
    pub unit_prices: BTreeMap<String, f64>,
    /// CO2 emitted per kilogram, if known for this category
    pub co2_per_kg: Option<f64>,
    /// Water used per kilogram in liters, if known for this category
    pub water_per_kg_liters: Option<f64>,
}

impl CategoryPolicy {
    fn new(shelf_life: i64, prices: &[(&str, f64)], env: Option<(f64, f64)>) -> Self {
        Self {
            base_shelf_life_days: shelf_life,
            unit_prices: prices
                .iter()
                .map(|(unit, price)| (unit.to_string(), *price))
                .collect(),
            co2_per_kg: env.map(|(co2, _)| co2),
            water_per_kg_liters: env.map(|(_, water)| water),
        }
    }
}

/// Which rule produced a policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySource {
    /// The category had its own entry
    Category,
    /// The category was missing and the `other` entry was used
    OtherFallback,
}

/// Which rule produced a unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPriceSource {
    Exact,
    PieceFallback,
    GlobalDefault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrice {
    pub price: f64,
    pub source: UnitPriceSource,
}

/// Environmental intensity resolved for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalCoefficients {
    pub co2_per_kg: f64,
    pub water_per_kg_liters: f64,
    /// True when the coefficients came from the `other` category
    pub from_fallback: bool,
}

/// Immutable category → policy table.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    policies: BTreeMap<Category, CategoryPolicy>,
}

impl PolicyTable {
    /// Build a table from explicit entries. The `other` entry is mandatory
    /// since every fallback resolves through it.
    pub fn new(policies: BTreeMap<Category, CategoryPolicy>) -> Result<Self, ValidationError> {
        if !policies.contains_key(&Category::Other) {
            return Err(ValidationError::InvalidValue {
                field: "policies".into(),
                message: "table must contain an 'other' entry".into(),
            });
        }
        Ok(Self { policies })
    }

    /// Process-wide built-in table.
    pub fn builtin() -> &'static PolicyTable {
        static TABLE: OnceLock<PolicyTable> = OnceLock::new();
        TABLE.get_or_init(Self::builtin_entries)
    }

    #[rustfmt::skip]
    fn builtin_entries() -> PolicyTable {
        use Category::*;

        let entries = [
            (Dairy, CategoryPolicy::new(7, &[("liter", 2.0), ("piece", 3.0), ("kg", 8.0)],
                Some((3.2, 1000.0)))),
            (Meat, CategoryPolicy::new(3, &[("kg", 12.0), ("piece", 5.0)], Some((27.0, 15400.0)))),
            (Poultry, CategoryPolicy::new(2, &[("kg", 8.0), ("piece", 4.0)], Some((6.9, 4300.0)))),
            (Fish, CategoryPolicy::new(2, &[("kg", 15.0), ("piece", 8.0)], Some((5.0, 3500.0)))),
            (Vegetables, CategoryPolicy::new(5, &[("kg", 3.0), ("piece", 0.5)],
                Some((2.0, 300.0)))),
            (Fruits, CategoryPolicy::new(5, &[("kg", 4.0), ("piece", 0.75)], Some((1.1, 800.0)))),
            (Bread, CategoryPolicy::new(5, &[("piece", 3.0), ("kg", 4.0)], Some((1.5, 1600.0)))),
            (Eggs, CategoryPolicy::new(21, &[("piece", 0.25), ("dozen", 3.0)],
                Some((4.8, 3300.0)))),
            (Frozen, CategoryPolicy::new(90, &[("kg", 6.0), ("piece", 4.0)], None)),
            (Canned, CategoryPolicy::new(365, &[("piece", 2.0)], None)),
            (Condiments, CategoryPolicy::new(180, &[("piece", 4.0), ("liter", 5.0)], None)),
            (Beverages, CategoryPolicy::new(30, &[("liter", 2.0), ("piece", 1.5)], None)),
            (Snacks, CategoryPolicy::new(60, &[("piece", 3.0), ("kg", 8.0)], None)),
            (Grains, CategoryPolicy::new(180, &[("kg", 3.0), ("piece", 2.0)], Some((2.7, 1600.0)))),
            (Other, CategoryPolicy::new(14, &[("piece", 2.0), ("kg", 5.0)], Some((2.5, 1000.0)))),
        ];

        PolicyTable {
            policies: entries.into_iter().collect(),
        }
    }

    fn other(&self) -> &CategoryPolicy {
        // Presence is checked in `new` and guaranteed for the built-in table.
        &self.policies[&Category::Other]
    }

    /// Policy for a category, with the rule that produced it.
    pub fn resolve(&self, category: Category) -> (&CategoryPolicy, PolicySource) {
        match self.policies.get(&category) {
            Some(policy) => (policy, PolicySource::Category),
            None => (self.other(), PolicySource::OtherFallback),
        }
    }

    pub fn policy(&self, category: Category) -> &CategoryPolicy {
        self.resolve(category).0
    }

    pub fn shelf_life_days(&self, category: Category) -> i64 {
        self.policy(category).base_shelf_life_days
    }

    /// Unit price for (category, unit). Units compare case-insensitively.
    pub fn unit_price(&self, category: Category, unit: &str) -> UnitPrice {
        let prices = &self.policy(category).unit_prices;
        let unit = unit.trim().to_lowercase();

        if let Some(price) = prices.get(&unit) {
            return UnitPrice {
                price: *price,
                source: UnitPriceSource::Exact,
            };
        }
        if let Some(price) = prices.get(PIECE_UNIT) {
            return UnitPrice {
                price: *price,
                source: UnitPriceSource::PieceFallback,
            };
        }
        UnitPrice {
            price: DEFAULT_UNIT_PRICE,
            source: UnitPriceSource::GlobalDefault,
        }
    }

    /// CO2 and water intensity for a category.
    pub fn environmental(&self, category: Category) -> EnvironmentalCoefficients {
        let policy = self.policy(category);
        match (policy.co2_per_kg, policy.water_per_kg_liters) {
            (Some(co2), Some(water)) => EnvironmentalCoefficients {
                co2_per_kg: co2,
                water_per_kg_liters: water,
                from_fallback: false,
            },
            _ => {
                let other = self.other();
                EnvironmentalCoefficients {
                    co2_per_kg: other.co2_per_kg.unwrap_or(FALLBACK_CO2_PER_KG),
                    water_per_kg_liters: other
                        .water_per_kg_liters
                        .unwrap_or(FALLBACK_WATER_PER_KG_LITERS),
                    from_fallback: true,
                }
            }
        }
    }
}
