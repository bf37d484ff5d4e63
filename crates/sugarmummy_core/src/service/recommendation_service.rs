//! Food recommendation ordering.
//!
//! # Responsibility
//! - Select foods by type and order them by one nutrition attribute.
//! - Compose a mixed meal of one food per basic food group.
//!
//! # Invariants
//! - Ordering is stable: foods with equal keys keep list order.
//! - Callers receive clones; the model is never mutated here.

use crate::model::food::{Food, FoodType};
use std::cmp::Ordering;

/// Food groups a mixed meal draws from, in serving order. Snacks and meals
/// are already composite and never picked.
pub const MIXED_MEAL_GROUPS: [FoodType; 4] = [
    FoodType::NonStarchyVegetable,
    FoodType::StarchyVegetable,
    FoodType::Fruit,
    FoodType::Protein,
];

/// Attribute used to order food recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodSortKey {
    Name,
    Calorie,
    Gi,
    Sugar,
    Fat,
    FoodType,
}

impl FoodSortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Calorie => "calorie",
            Self::Gi => "gi",
            Self::Sugar => "sugar",
            Self::Fat => "fat",
            Self::FoodType => "food_type",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "calorie" => Some(Self::Calorie),
            "gi" => Some(Self::Gi),
            "sugar" => Some(Self::Sugar),
            "fat" => Some(Self::Fat),
            "food_type" | "type" => Some(Self::FoodType),
            _ => None,
        }
    }

    /// Ascending comparison of two foods under this key.
    pub fn compare(self, left: &Food, right: &Food) -> Ordering {
        let (l, r) = (left.nutrition(), right.nutrition());
        match self {
            Self::Name => left
                .name()
                .to_ascii_lowercase()
                .cmp(&right.name().to_ascii_lowercase()),
            Self::Calorie => l.calorie.total_cmp(&r.calorie),
            Self::Gi => l.gi.total_cmp(&r.gi),
            Self::Sugar => l.sugar.total_cmp(&r.sugar),
            Self::Fat => l.fat.total_cmp(&r.fat),
            Self::FoodType => left.food_type().cmp(&right.food_type()),
        }
    }
}

/// Returns foods of the wanted types, optionally ordered.
///
/// An empty `types` slice accepts every type. Without a sort key, source
/// order is kept.
pub fn recommend_foods<'a, I>(
    foods: I,
    types: &[FoodType],
    sort: Option<FoodSortKey>,
    descending: bool,
) -> Vec<Food>
where
    I: IntoIterator<Item = &'a Food>,
{
    let mut selected = foods
        .into_iter()
        .filter(|food| types.is_empty() || types.contains(&food.food_type()))
        .cloned()
        .collect::<Vec<_>>();

    if let Some(key) = sort {
        selected.sort_by(|left, right| directed(key.compare(left, right), descending));
    }
    selected
}

/// Picks one food from each of `MIXED_MEAL_GROUPS`.
///
/// Each group contributes its first food under `sort` (list order when
/// `None`). Groups without any food are skipped, so the result holds at most
/// four foods, ordered by group.
pub fn recommend_mixed_meal<'a, I>(
    foods: I,
    sort: Option<FoodSortKey>,
    descending: bool,
) -> Vec<Food>
where
    I: IntoIterator<Item = &'a Food>,
{
    let mut picks: [Option<&Food>; MIXED_MEAL_GROUPS.len()] = [None; MIXED_MEAL_GROUPS.len()];
    for food in foods {
        let Some(slot) = MIXED_MEAL_GROUPS
            .iter()
            .position(|group| *group == food.food_type())
        else {
            continue;
        };
        let better = match (picks[slot], sort) {
            (None, _) => true,
            (Some(current), Some(key)) => {
                directed(key.compare(food, current), descending) == Ordering::Less
            }
            (Some(_), None) => false,
        };
        if better {
            picks[slot] = Some(food);
        }
    }
    picks.into_iter().flatten().cloned().collect()
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[cfg(test)]
mod tests {
    use super::{recommend_foods, recommend_mixed_meal, FoodSortKey};
    use crate::model::food::{Food, FoodType, Nutrition};

    fn food(name: &str, food_type: FoodType, gi: f64) -> Food {
        Food::new(
            name,
            food_type,
            Nutrition {
                gi,
                ..Nutrition::default()
            },
        )
        .expect("valid food")
    }

    fn names(foods: &[Food]) -> Vec<&str> {
        foods.iter().map(Food::name).collect()
    }

    #[test]
    fn filters_by_type_and_sorts_by_gi() {
        let foods = vec![
            food("potato", FoodType::StarchyVegetable, 78.0),
            food("kale", FoodType::NonStarchyVegetable, 15.0),
            food("corn", FoodType::StarchyVegetable, 52.0),
            food("apple", FoodType::Fruit, 36.0),
        ];

        let picked = recommend_foods(
            &foods,
            &[FoodType::StarchyVegetable, FoodType::Fruit],
            Some(FoodSortKey::Gi),
            false,
        );
        assert_eq!(names(&picked), vec!["apple", "corn", "potato"]);

        let all_desc = recommend_foods(&foods, &[], Some(FoodSortKey::Gi), true);
        assert_eq!(names(&all_desc), vec!["potato", "corn", "apple", "kale"]);
    }

    #[test]
    fn keeps_source_order_without_sort_key_and_sorts_names_case_insensitively() {
        let foods = vec![
            food("banana", FoodType::Fruit, 51.0),
            food("Apple", FoodType::Fruit, 36.0),
        ];
        assert_eq!(
            names(&recommend_foods(&foods, &[], None, false)),
            vec!["banana", "Apple"]
        );
        assert_eq!(
            names(&recommend_foods(&foods, &[], Some(FoodSortKey::Name), false)),
            vec!["Apple", "banana"]
        );
    }

    #[test]
    fn mixed_meal_takes_best_food_per_group() {
        let foods = vec![
            food("potato", FoodType::StarchyVegetable, 78.0),
            food("cake", FoodType::Snack, 5.0),
            food("kale", FoodType::NonStarchyVegetable, 15.0),
            food("corn", FoodType::StarchyVegetable, 52.0),
            food("apple", FoodType::Fruit, 36.0),
            food("cherry", FoodType::Fruit, 20.0),
            food("yam", FoodType::StarchyVegetable, 52.0),
        ];

        let low_gi = recommend_mixed_meal(&foods, Some(FoodSortKey::Gi), false);
        assert_eq!(names(&low_gi), vec!["kale", "corn", "cherry"]);

        let high_gi = recommend_mixed_meal(&foods, Some(FoodSortKey::Gi), true);
        assert_eq!(names(&high_gi), vec!["kale", "potato", "apple"]);

        let unsorted = recommend_mixed_meal(&foods, None, false);
        assert_eq!(names(&unsorted), vec!["kale", "potato", "apple"]);

        assert!(recommend_mixed_meal(&foods[1..2], None, false).is_empty());
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!(FoodSortKey::parse(" GI "), Some(FoodSortKey::Gi));
        assert_eq!(FoodSortKey::parse("type"), Some(FoodSortKey::FoodType));
        assert_eq!(FoodSortKey::parse("protein"), None);
    }
}
