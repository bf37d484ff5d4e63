//! Food domain model.
//!
//! # Responsibility
//! - Define the food entry logged and recommended by the diet views.
//! - Provide ready-made filters for the food list.
//!
//! # Invariants
//! - Two foods are the same entity when their names match ignoring ASCII
//!   case; nutrition values do not take part in identity.
//! - `name` is trimmed, at most 40 chars, and starts with a letter or digit.
//! - Nutrition values are finite and non-negative; `gi` is at most 100.

use crate::collection::filter::EntityFilter;
use crate::collection::unique_list::SameEntity;
use crate::model::{
    contains_any_word, normalize_keywords, require_non_negative, require_text, ValidationError,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_FOOD_NAME_CHARS: usize = 40;
const MAX_GLYCEMIC_INDEX: f64 = 100.0;

static FOOD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 '\-]*$").expect("valid food name regex"));

/// Diet category used for grouping and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    NonStarchyVegetable,
    StarchyVegetable,
    Fruit,
    Protein,
    Snack,
    Meal,
}

impl FoodType {
    pub const ALL: [FoodType; 6] = [
        Self::NonStarchyVegetable,
        Self::StarchyVegetable,
        Self::Fruit,
        Self::Protein,
        Self::Snack,
        Self::Meal,
    ];

    /// Short code accepted by command input (`nsv|sv|f|p|s|m`).
    pub fn code(self) -> &'static str {
        match self {
            Self::NonStarchyVegetable => "nsv",
            Self::StarchyVegetable => "sv",
            Self::Fruit => "f",
            Self::Protein => "p",
            Self::Snack => "s",
            Self::Meal => "m",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::NonStarchyVegetable => "Non-starchy Vegetable",
            Self::StarchyVegetable => "Starchy Vegetable",
            Self::Fruit => "Fruit",
            Self::Protein => "Protein",
            Self::Snack => "Snack",
            Self::Meal => "Meal",
        }
    }

    pub fn parse_code(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == normalized.as_str())
    }
}

/// Per-serving nutrition values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kcal.
    pub calorie: f64,
    /// Glycemic index, 0..=100.
    pub gi: f64,
    /// Sugar in grams.
    pub sugar: f64,
    /// Fat in grams.
    pub fat: f64,
}

impl Nutrition {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("calorie", self.calorie)?;
        require_non_negative("gi", self.gi)?;
        if self.gi > MAX_GLYCEMIC_INDEX {
            return Err(ValidationError::OutOfRange {
                field: "gi",
                expected: "between 0 and 100",
            });
        }
        require_non_negative("sugar", self.sugar)?;
        require_non_negative("fat", self.fat)?;
        Ok(())
    }
}

/// Food entry in the diet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FoodData")]
pub struct Food {
    name: String,
    food_type: FoodType,
    nutrition: Nutrition,
}

#[derive(Deserialize)]
struct FoodData {
    name: String,
    food_type: FoodType,
    nutrition: Nutrition,
}

impl TryFrom<FoodData> for Food {
    type Error = ValidationError;

    fn try_from(data: FoodData) -> Result<Self, Self::Error> {
        Food::new(data.name, data.food_type, data.nutrition)
    }
}

impl Food {
    /// Creates a validated food entry.
    ///
    /// # Errors
    /// - `BlankField`, `TooLong` or `InvalidFormat` for a bad name.
    /// - `OutOfRange` for a bad nutrition value.
    pub fn new(
        name: impl AsRef<str>,
        food_type: FoodType,
        nutrition: Nutrition,
    ) -> Result<Self, ValidationError> {
        let name = require_text("food name", name.as_ref())?;
        if name.chars().count() > MAX_FOOD_NAME_CHARS {
            return Err(ValidationError::TooLong {
                field: "food name",
                max_chars: MAX_FOOD_NAME_CHARS,
            });
        }
        if !FOOD_NAME_RE.is_match(&name) {
            return Err(ValidationError::InvalidFormat {
                field: "food name",
                value: name,
            });
        }
        nutrition.validate()?;
        Ok(Self {
            name,
            food_type,
            nutrition,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn food_type(&self) -> FoodType {
        self.food_type
    }

    pub fn nutrition(&self) -> Nutrition {
        self.nutrition
    }
}

impl SameEntity for Food {
    const KIND: &'static str = "food";

    fn is_same_entity(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// Foods whose name contains any keyword as a whole word.
///
/// An empty keyword list matches nothing.
pub fn food_name_contains_keywords(keywords: &[&str]) -> EntityFilter<Food> {
    let keywords = normalize_keywords(keywords);
    EntityFilter::new("food_name_keywords", move |food: &Food| {
        contains_any_word(food.name(), &keywords)
    })
}

/// Foods of any of the given types. An empty slice accepts every food.
pub fn food_type_in(types: &[FoodType]) -> EntityFilter<Food> {
    if types.is_empty() {
        return EntityFilter::all();
    }
    let wanted = types.to_vec();
    EntityFilter::new("food_type_in", move |food: &Food| {
        wanted.contains(&food.food_type())
    })
}
