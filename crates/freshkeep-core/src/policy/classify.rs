//! Keyword classifier mapping a free-form product name to a category.
//!
//! Receipt and barcode adapters hand over bare product names; this picks the
//! category whose shelf-life default the classifier in `freshness` then uses.

use super::category::Category;

/// Keyword lists checked in order; the first category with a hit wins.
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Dairy, &["milk", "cheese", "yogurt", "butter", "cream", "yoghurt"]),
    (
        Category::Meat,
        &["beef", "pork", "lamb", "steak", "ground", "bacon", "ham", "sausage"],
    ),
    (
        Category::Poultry,
        &["chicken", "turkey", "duck", "wings", "breast", "thigh"],
    ),
    (
        Category::Fish,
        &["fish", "salmon", "tuna", "shrimp", "cod", "tilapia", "seafood"],
    ),
    (
        Category::Vegetables,
        &[
            "lettuce", "tomato", "onion", "pepper", "carrot", "broccoli", "spinach", "potato",
            "celery", "cucumber", "cabbage", "salad",
        ],
    ),
    (
        Category::Fruits,
        &[
            "apple", "banana", "orange", "grape", "berry", "strawberry", "mango", "peach", "pear",
            "melon", "lemon", "lime",
        ],
    ),
    (
        Category::Bread,
        &["bread", "bagel", "roll", "bun", "muffin", "croissant", "toast"],
    ),
    (Category::Eggs, &["egg", "eggs"]),
    (Category::Frozen, &["frozen", "ice cream", "pizza"]),
    (Category::Canned, &["can", "canned", "soup", "beans"]),
    (
        Category::Condiments,
        &["sauce", "ketchup", "mustard", "mayo", "dressing", "oil", "vinegar"],
    ),
    (
        Category::Beverages,
        &["juice", "soda", "water", "drink", "tea", "coffee"],
    ),
    (
        Category::Snacks,
        &["chips", "cookie", "cracker", "popcorn", "candy", "chocolate"],
    ),
    (
        Category::Grains,
        &["rice", "pasta", "cereal", "oat", "flour", "noodle"],
    ),
];

/// Guess a category from a product name; `other` when nothing matches.
pub fn guess_category(name: &str) -> Category {
    let name = name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
