//! # Catalog
//!
//! Canonical categories and units, keyword-based categorization of item
//! names, and the demo pantry used by `pantry session --seed`.

use chrono::{Duration, NaiveDate};

use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::NewItem;

pub const CATEGORIES: [&str; 19] = [
    "Grains & Pulses",
    "Grains & Flours",
    "Beverages",
    "Sweeteners",
    "Oils & Fats",
    "Souring Agents",
    "Salts",
    "Spices & Masalas",
    "Sauces & Condiments",
    "Packaged & Dry Goods",
    "Ready Mixes & Snacks",
    "Baking & Desserts",
    "Canned Goods",
    "Nuts & Dry Fruits",
    "Frozen Goods",
    "Supplies",
    "Produce",
    "Dairy",
    "Meat & Poultry",
];

pub const UNITS: [&str; 6] = ["kg", "g", "liters", "ml", "units", "packs"];

/// Fallback for names no rule recognizes.
pub const DEFAULT_CATEGORY: (&str, &str) = ("Packaged & Dry Goods", "units");

// =============================================================================
// Categorization
// =============================================================================

/// A keyword rule: any keyword in the lowercase name selects the category.
struct Rule {
    category: &'static str,
    unit: &'static str,
    keywords: &'static [&'static str],
}

/// Checked in order; the first match wins.
const RULES: &[Rule] = &[
    Rule {
        category: "Grains & Pulses",
        unit: "kg",
        keywords: &[
            "daal", "dal", "chana", "moong", "arad", "masoor", "rajma", "urad", "mug", "watana",
            "kathol", "chaula",
        ],
    },
    Rule {
        category: "Grains & Flours",
        unit: "kg",
        keywords: &[
            "chawal", "gehu", "wheat", "flour", "aato", "ravo", "maido", "besan", "thuli", "daliya",
            "juwar", "bajri", "poha", "parmal", "oats", "makhana", "sabu dana",
        ],
    },
    Rule {
        category: "Beverages",
        unit: "units",
        keywords: &["tea", "coffee", "rooh afza"],
    },
    Rule {
        category: "Sweeteners",
        unit: "kg",
        keywords: &["sugar", "gol", "shehed", "mithaimadi"],
    },
    Rule {
        category: "Oils & Fats",
        unit: "liters",
        keywords: &["ghee", "oil", "butter"],
    },
    Rule {
        category: "Souring Agents",
        unit: "kg",
        keywords: &["imli", "kokam", "amchur", "vinegar", "lemon", "lime juice", "dry mango powder"],
    },
    Rule {
        category: "Salts",
        unit: "kg",
        keywords: &["namak", "salt"],
    },
    Rule {
        category: "Spices & Masalas",
        unit: "g",
        keywords: &[
            "sonth", "masala", "biristo", "til", "mirch", "haldi", "jeeru", "dhaniya", "lavang",
            "elaichi", "miri", "methi", "taj", "tejpatta", "badiya", "rai", "ajwaan", "kilonji",
            "daal chini", "oregano", "chilli flake", "kesar", "garlic powder", "kasturi methi",
        ],
    },
    Rule {
        category: "Sauces & Condiments",
        unit: "units",
        keywords: &["sauce", "syrup", "crush", "jam", "achaar", "mayonese"],
    },
    Rule {
        category: "Packaged & Dry Goods",
        unit: "packs",
        keywords: &[
            "sev", "papad", "boondi", "noodles", "macroni", "pasta", "sivaiya", "chocos",
            "corn flakes", "chevda", "toast", "konkos",
        ],
    },
    Rule {
        category: "Ready Mixes & Snacks",
        unit: "packs",
        keywords: &["gulab jamun", "dahi wada", "khaman dhokla", "idli mix", "jaljira", "rasgulla"],
    },
    Rule {
        category: "Baking & Desserts",
        unit: "g",
        keywords: &[
            "milk powder", "khopru", "cornflour", "custurd powder", "baking powder", "gundar",
            "china grass", "choclate powder", "wip cream",
        ],
    },
    Rule {
        category: "Canned Goods",
        unit: "units",
        keywords: &["fruit cocktail", "pineapple slice"],
    },
    Rule {
        category: "Nuts & Dry Fruits",
        unit: "kg",
        keywords: &[
            "kaju", "badam", "zardalu", "charoli", "kismis", "magaj tari", "khajoor", "pista",
            "kaharak", "seeng dana",
        ],
    },
    Rule {
        category: "Frozen Goods",
        unit: "kg",
        keywords: &["frozen"],
    },
    Rule {
        category: "Supplies",
        unit: "packs",
        keywords: &["theli", "foil paper", "roll", "glass"],
    },
    Rule {
        category: "Produce",
        unit: "kg",
        keywords: &[
            "baigan", "beetroot", "paapri", "valor", "kolu", "methi bhaaji", "cholai bhaaji", "muli",
            "gaajar", "piyaj", "bateta", "cauli flower", "tomato", "guwar", "bhinda", "adrak",
            "lasan", "palak", "kothmir", "phudinu", "kaari patta", "fanshi", "shimla mirch", "kakri",
            "karela", "patta gobi", "turai", "tindoli", "corn", "aam", "loki", "spring onion",
            "sevta singh", "mushroom", "baby corn",
        ],
    },
    Rule {
        category: "Dairy",
        unit: "units",
        keywords: &["cheese", "dahi", "milk", "cream"],
    },
    Rule {
        category: "Meat & Poultry",
        unit: "kg",
        keywords: &[
            "fish", "gosh", "chiken", "mutton", "kaleji", "bhejo", "paya", "haddi", "bawra", "mundi",
            "egg",
        ],
    },
];

/// Picks `(category, default unit)` for an item name.
///
/// ```rust
/// use pantry_core::catalog::categorize;
///
/// assert_eq!(categorize("Moong Daal"), ("Grains & Pulses", "kg"));
/// assert_eq!(categorize("Haldi"), ("Spices & Masalas", "g"));
/// assert_eq!(categorize("Paper Napkins"), ("Packaged & Dry Goods", "units"));
/// ```
pub fn categorize(name: &str) -> (&'static str, &'static str) {
    let lower = name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| (rule.category, rule.unit))
        .unwrap_or(DEFAULT_CATEGORY)
}

// =============================================================================
// Stock Profiles
// =============================================================================

/// Opening quantity, price, threshold and shelf life for a demo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StockProfile {
    quantity: i64,
    price: i64,
    threshold: i64,
    shelf_life_days: i64,
}

fn profile(name: &str, category: &str, unit: &str) -> StockProfile {
    let lower = name.to_lowercase();
    let mut p = StockProfile {
        quantity: 50,
        price: 100,
        threshold: 10,
        shelf_life_days: 180,
    };

    if unit == "g" {
        p.quantity = 500;
        p.price = 50;
        p.threshold = 100;
    }

    match category {
        "Produce" => {
            p.quantity = 10;
            p.price = 40 + spread(name, 40);
            p.threshold = 3;
            p.shelf_life_days = 7;
        }
        "Dairy" | "Meat & Poultry" => {
            p.quantity = 15;
            p.price = 150 + spread(name, 100);
            p.threshold = 5;
            p.shelf_life_days = 5;
        }
        "Spices & Masalas" => p.price = 30 + spread(name, 70),
        "Nuts & Dry Fruits" => p.price = 500 + spread(name, 500),
        "Frozen Goods" => p.shelf_life_days = 90,
        _ if lower.contains("achaar") => p.shelf_life_days = 365,
        _ if lower.contains("sauce") => p.shelf_life_days = 270,
        _ => {}
    }

    // Eggs keep longer than the rest of the meat counter
    if lower == "egg" {
        p.shelf_life_days = 21;
    }

    p
}

/// Deterministic price variation in `0..span`, derived from the name.
fn spread(name: &str, span: i64) -> i64 {
    name.bytes().map(i64::from).sum::<i64>() % span
}

/// `"tuwar daal"` → `"Tuwar Daal"`. Other characters are left alone.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds opening stock for `names`, purchased `today`.
pub fn seed_inventory(names: &[&str], today: NaiveDate) -> Vec<NewItem> {
    names
        .iter()
        .map(|name| {
            let (category, unit) = categorize(name);
            let p = profile(name, category, unit);
            NewItem {
                name: title_case(name),
                category: category.to_string(),
                quantity: Quantity::from_units(p.quantity),
                unit: unit.to_string(),
                purchase_price: Money::from_major(p.price),
                purchase_date: today,
                expiry_date: Some(today + Duration::days(p.shelf_life_days)),
                low_stock_threshold: Quantity::from_units(p.threshold),
            }
        })
        .collect()
}

/// A small kitchen's pantry, one entry per shelf label.
pub const DEMO_ITEM_NAMES: &[&str] = &[
    "tuwar daal", "masoor daal", "chana daal", "moong daal", "kabuli chana", "rajma", "tea", "sugar",
    "chawal", "wheat flour", "ravo", "maido", "besan", "poha", "daliya", "ghee", "oil", "amul butter",
    "imli", "kokam", "amchur", "vinegar", "namak piso", "khado namak", "haldi", "jeeru",
    "dhaniya powder", "red chilli powder", "garam masala powder", "lavang", "elaichi green",
    "kasturi methi", "tejpatta", "rai", "ajwaan", "kesar", "tomato sauce", "soya sauce",
    "shezvan sauce", "jam", "limbu achaar", "sev", "papad", "noodles", "pasta", "corn flakes",
    "gulab jamun", "idli mix", "khaman dhokla", "milk powder", "cornflour", "baking powder",
    "fruit cocktail", "kaju", "badam", "kismis", "pista akha", "frozen mutter", "frozen corn",
    "foil paper", "plastic theli", "baigan", "bateta", "piyaj", "tomato", "adrak", "lasan",
    "palak", "kothmir", "shimla mirch", "baby corn", "mushroom", "cheese", "dahi", "amul cream",
    "milk tatra pack", "fish", "chiken", "mutton", "egg",
];

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_categorize_first_rule_wins() {
        assert_eq!(categorize("Tuwar Daal"), ("Grains & Pulses", "kg"));
        assert_eq!(categorize("amul butter"), ("Oils & Fats", "liters"));
        assert_eq!(categorize("tomato sauce"), ("Sauces & Condiments", "units"));
        assert_eq!(categorize("tomato"), ("Produce", "kg"));
        assert_eq!(categorize("frozen corn"), ("Frozen Goods", "kg"));
        assert_eq!(categorize("dahi"), ("Dairy", "units"));
        assert_eq!(categorize("egg"), ("Meat & Poultry", "kg"));
        assert_eq!(categorize("napkins"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_every_rule_targets_a_canonical_category_and_unit() {
        for rule in RULES {
            assert!(CATEGORIES.contains(&rule.category), "{}", rule.category);
            assert!(UNITS.contains(&rule.unit), "{}", rule.unit);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tuwar daal"), "Tuwar Daal");
        assert_eq!(title_case("PISTA AKHA"), "PISTA AKHA");
        assert_eq!(title_case("Ragra besan(nuqti)"), "Ragra Besan(nuqti)");
    }

    #[test]
    fn test_seed_profiles() {
        let items = seed_inventory(&["haldi", "tomato", "dahi", "frozen corn", "limbu achaar", "soya sauce", "egg", "sugar"], today());

        let by_name = |name: &str| items.iter().find(|i| i.name == name).unwrap();

        let haldi = by_name("Haldi");
        assert_eq!(haldi.quantity, Quantity::from_units(500));
        assert_eq!(haldi.low_stock_threshold, Quantity::from_units(100));
        assert!(haldi.purchase_price >= Money::from_major(30) && haldi.purchase_price < Money::from_major(100));

        let tomato = by_name("Tomato");
        assert_eq!(tomato.quantity, Quantity::from_units(10));
        assert_eq!(tomato.expiry_date, Some(today() + Duration::days(7)));

        assert_eq!(by_name("Dahi").expiry_date, Some(today() + Duration::days(5)));
        assert_eq!(by_name("Frozen Corn").expiry_date, Some(today() + Duration::days(90)));
        assert_eq!(by_name("Limbu Achaar").expiry_date, Some(today() + Duration::days(365)));
        assert_eq!(by_name("Soya Sauce").expiry_date, Some(today() + Duration::days(270)));
        assert_eq!(by_name("Egg").expiry_date, Some(today() + Duration::days(21)));

        let sugar = by_name("Sugar");
        assert_eq!(sugar.quantity, Quantity::from_units(50));
        assert_eq!(sugar.purchase_price, Money::from_major(100));
        assert_eq!(sugar.expiry_date, Some(today() + Duration::days(180)));
        assert!(items.iter().all(|i| i.purchase_date == today()));
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(
            seed_inventory(DEMO_ITEM_NAMES, today()),
            seed_inventory(DEMO_ITEM_NAMES, today())
        );
    }
}
