//! Built-in curated recipe catalog.

use std::sync::OnceLock;

use super::candidate::{Ingredient, RecipeCandidate};
use super::source::{RecipeSource, SourceKind};
use crate::error::Result;

struct Entry {
    id: u64,
    title: &'static str,
    image: &'static str,
    ready_in_minutes: u32,
    servings: u32,
    category: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1001,
        title: "Masala Chai",
        image: "https://www.recipetineats.com/wp-content/uploads/2022/10/Masala-Chai_1.jpg",
        ready_in_minutes: 15,
        servings: 4,
        category: "beverages",
        ingredients: &["tea", "milk", "ginger", "cardamom", "cinnamon", "sugar"],
        instructions: "1. Boil water with ginger, cardamom, and cinnamon for 5 mins.\n2. Add tea powder and boil for 2 mins.\n3. Add milk and sugar.\n4. Simmer for 5 mins and strain.",
    },
    Entry {
        id: 1002,
        title: "Ginger Tea (Adrak Chai)",
        image: "https://www.teaforturmeric.com/wp-content/uploads/2022/01/Ginger-Tea-Social-1.jpg",
        ready_in_minutes: 10,
        servings: 2,
        category: "beverages",
        ingredients: &["tea", "ginger", "milk", "sugar"],
        instructions: "1. Crush ginger and boil in water for 3 mins.\n2. Add tea powder and simmer.\n3. Add milk and sugar to taste.\n4. Strain and serve hot.",
    },
    Entry {
        id: 1003,
        title: "Elaichi Tea (Cardamom Tea)",
        image: "https://www.teaforturmeric.com/wp-content/uploads/2021/12/Cardamom-Tea-5.jpg",
        ready_in_minutes: 10,
        servings: 2,
        category: "beverages",
        ingredients: &["tea", "cardamom", "milk", "sugar"],
        instructions: "1. Crush cardamom and boil in water.\n2. Add tea powder and simmer 2 mins.\n3. Add milk and sugar.\n4. Strain and enjoy.",
    },
    Entry {
        id: 1004,
        title: "Lemon Tea",
        image: "https://i.pinimg.com/originals/6a/eb/cf/6aebcf04a5b12c7f64e3d94e5e1a77a9.jpg",
        ready_in_minutes: 8,
        servings: 2,
        category: "beverages",
        ingredients: &["tea", "lemon", "honey", "sugar"],
        instructions: "1. Boil water and add tea powder.\n2. Steep for 3 mins.\n3. Strain and add lemon juice.\n4. Sweeten with honey or sugar.",
    },
    Entry {
        id: 1010,
        title: "Paneer Butter Masala",
        image: "https://www.cubesnjuliennes.com/wp-content/uploads/2020/01/Paneer-Butter-Masala-Recipe.jpg",
        ready_in_minutes: 40,
        servings: 4,
        category: "main",
        ingredients: &["paneer", "butter", "tomato", "cream", "onion", "ginger", "garlic"],
        instructions: "1. Saute onion, ginger, garlic.\n2. Add tomato puree and cook.\n3. Add cream and butter.\n4. Add paneer cubes and simmer.",
    },
    Entry {
        id: 1011,
        title: "Kheer (Rice Pudding)",
        image: "https://www.vegrecipesofindia.com/wp-content/uploads/2021/04/kheer-recipe-1.jpg",
        ready_in_minutes: 45,
        servings: 6,
        category: "dessert",
        ingredients: &["milk", "rice", "sugar", "cardamom", "almonds", "cashews"],
        instructions: "1. Wash and soak rice for 30 mins.\n2. Boil milk and add rice.\n3. Cook on low heat until thick.\n4. Add sugar, cardamom, and nuts.",
    },
    Entry {
        id: 1020,
        title: "Dal Tadka",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/01/dal-tadka-recipe.jpg",
        ready_in_minutes: 35,
        servings: 4,
        category: "main",
        ingredients: &["toor dal", "onion", "tomato", "cumin", "mustard", "turmeric", "red chilli"],
        instructions: "1. Pressure cook dal with turmeric.\n2. Prepare tadka with cumin, mustard, onion.\n3. Add tomatoes and cook.\n4. Mix tadka with dal.",
    },
    Entry {
        id: 1021,
        title: "Dal Makhani",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/03/dal-makhani-recipe.jpg",
        ready_in_minutes: 60,
        servings: 6,
        category: "main",
        ingredients: &[
            "urad dal", "rajma", "butter", "cream", "tomato", "onion", "ginger", "garlic",
        ],
        instructions: "1. Soak and pressure cook dals.\n2. Make gravy with butter, onion, tomato.\n3. Add cooked dal and simmer.\n4. Finish with cream.",
    },
    Entry {
        id: 1030,
        title: "Vegetable Pulao",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/02/veg-pulao-recipe.jpg",
        ready_in_minutes: 30,
        servings: 4,
        category: "main",
        ingredients: &["rice", "carrot", "beans", "peas", "onion", "cumin", "bay leaf"],
        instructions: "1. Saute whole spices and onion.\n2. Add vegetables and rice.\n3. Add water and cook.\n4. Garnish with coriander.",
    },
    Entry {
        id: 1031,
        title: "Lemon Rice",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2021/07/lemon-rice-recipe.jpg",
        ready_in_minutes: 20,
        servings: 4,
        category: "main",
        ingredients: &["rice", "lemon", "mustard", "turmeric", "curry leaves", "peanuts"],
        instructions: "1. Cook rice and cool.\n2. Prepare tempering with mustard, turmeric.\n3. Add peanuts and curry leaves.\n4. Mix with rice and lemon juice.",
    },
    Entry {
        id: 1040,
        title: "Aloo Paratha",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2021/08/aloo-paratha-recipe.jpg",
        ready_in_minutes: 40,
        servings: 4,
        category: "bread",
        ingredients: &["atta", "potato", "cumin", "coriander", "green chilli", "butter"],
        instructions: "1. Boil and mash potatoes.\n2. Add spices for filling.\n3. Make dough and stuff with filling.\n4. Cook on tawa with butter.",
    },
    Entry {
        id: 1050,
        title: "Vegetable Maggi",
        image: "https://i.ytimg.com/vi/rNQhMe7K4I0/maxresdefault.jpg",
        ready_in_minutes: 15,
        servings: 2,
        category: "snacks",
        ingredients: &["maggi", "noodles", "carrot", "beans", "peas", "onion"],
        instructions: "1. Boil water and add vegetables.\n2. Add maggi and tastemaker.\n3. Cook for 2-3 minutes.\n4. Serve hot.",
    },
    Entry {
        id: 1051,
        title: "Masala Maggi",
        image: "https://i.ytimg.com/vi/dNHKBSi2cFo/maxresdefault.jpg",
        ready_in_minutes: 12,
        servings: 2,
        category: "snacks",
        ingredients: &["maggi", "noodles", "onion", "tomato", "green chilli"],
        instructions: "1. Saute onions and tomatoes.\n2. Add water and boil.\n3. Add maggi and tastemaker.\n4. Cook and serve.",
    },
    Entry {
        id: 1060,
        title: "Masala Omelette",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2021/11/masala-omelette-recipe.jpg",
        ready_in_minutes: 10,
        servings: 1,
        category: "breakfast",
        ingredients: &["eggs", "onion", "tomato", "green chilli", "coriander"],
        instructions: "1. Beat eggs with salt.\n2. Add chopped onion, tomato, chilli.\n3. Cook on pan with oil.\n4. Fold and serve.",
    },
    Entry {
        id: 1061,
        title: "Bread Omelette",
        image: "https://i.ytimg.com/vi/f7C_eE9N7Oc/maxresdefault.jpg",
        ready_in_minutes: 15,
        servings: 2,
        category: "breakfast",
        ingredients: &["eggs", "bread", "onion", "butter"],
        instructions: "1. Beat eggs with salt and pepper.\n2. Dip bread in egg mixture.\n3. Toast on buttered pan.\n4. Serve hot.",
    },
    Entry {
        id: 1070,
        title: "Bhel Puri",
        image: "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/07/bhel-puri-recipe.jpg",
        ready_in_minutes: 10,
        servings: 4,
        category: "snacks",
        ingredients: &["puffed rice", "onion", "tomato", "coriander", "lemon", "chutney", "sev"],
        instructions: "1. Mix puffed rice with onion, tomato.\n2. Add chutneys and lemon juice.\n3. Top with sev and coriander.\n4. Serve immediately.",
    },
];

impl Entry {
    fn to_candidate(&self) -> RecipeCandidate {
        RecipeCandidate {
            id: self.id,
            title: self.title.to_string(),
            image: Some(self.image.to_string()),
            ingredients: self.ingredients.iter().map(|n| Ingredient::named(*n)).collect(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            category: Some(self.category.to_string()),
            instructions: Some(self.instructions.to_string()),
        }
    }
}

/// Recipes bundled with the engine, scored with [`SourceKind::LocalCatalog`] weights.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCatalog {
    recipes: Vec<RecipeCandidate>,
}

impl LocalCatalog {
    pub fn new(recipes: Vec<RecipeCandidate>) -> Self {
        Self { recipes }
    }

    pub fn builtin() -> &'static LocalCatalog {
        static CATALOG: OnceLock<LocalCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| LocalCatalog::new(ENTRIES.iter().map(Entry::to_candidate).collect()))
    }

    pub fn recipes(&self) -> &[RecipeCandidate] {
        &self.recipes
    }

    pub fn get(&self, id: u64) -> Option<&RecipeCandidate> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeSource for LocalCatalog {
    fn kind(&self) -> SourceKind {
        SourceKind::LocalCatalog
    }

    /// The whole catalog; scoring does the filtering.
    fn candidates(&self, _ingredients: &[String]) -> Result<Vec<RecipeCandidate>> {
        Ok(self.recipes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_sixteen_unique_recipes() {
        let catalog = LocalCatalog::builtin();
        assert_eq!(catalog.len(), 16);
        let mut ids: Vec<u64> = catalog.recipes().iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(catalog.get(1061).map(|r| r.title.as_str()), Some("Bread Omelette"));
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn catalog_is_a_local_source() {
        let catalog = LocalCatalog::builtin();
        assert_eq!(catalog.kind(), SourceKind::LocalCatalog);
        assert_eq!(catalog.candidates(&[]).unwrap().len(), 16);
    }
}
