//! Category policy: classification enums, the per-category policy table and
//! the product-name classifier.

mod category;
mod classify;
mod table;

pub use category::{Category, ExpirationMode, StorageLocation};
pub use classify::guess_category;
pub use table::{
    CategoryPolicy, EnvironmentalCoefficients, PolicySource, PolicyTable, UnitPrice,
    UnitPriceSource, DEFAULT_UNIT_PRICE, PIECE_UNIT,
};
