use chrono::NaiveDate;
use sugarmummy_core::{
    calendar_entry_in_month, calendar_entry_on, food_name_contains_keywords, food_type_in,
    record_type_is, record_within, CalendarEntry, EntityFilter, FilteredList, Food, FoodType,
    Nutrition, Record, RecordType, Repetition,
};

const DAY_MS: i64 = 86_400_000;

fn food(name: &str, food_type: FoodType) -> Food {
    Food::new(name, food_type, Nutrition::default()).unwrap()
}

fn visible(list: &FilteredList<Food>) -> Vec<&str> {
    list.view().map(Food::name).collect()
}

#[test]
fn view_tracks_backing_mutations_without_refresh() {
    let mut foods = FilteredList::new();
    foods.add(food("Apple", FoodType::Fruit)).unwrap();
    foods.set_predicate(EntityFilter::new("starts_y", |food: &Food| {
        food.name().starts_with('Y')
    }));
    assert!(visible(&foods).is_empty());

    foods.add(food("Yogurt", FoodType::Snack)).unwrap();
    assert_eq!(visible(&foods), vec!["Yogurt"]);

    foods
        .set_entity(&food("Yogurt", FoodType::Snack), food("Yam", FoodType::StarchyVegetable))
        .unwrap();
    assert_eq!(visible(&foods), vec!["Yam"]);

    foods.remove(&food("Yam", FoodType::StarchyVegetable)).unwrap();
    assert!(visible(&foods).is_empty());
    assert_eq!(foods.list().len(), 1);
}

#[test]
fn view_keeps_backing_order() {
    let mut foods = FilteredList::new();
    for name in ["A", "B", "C"] {
        foods.add(food(name, FoodType::Snack)).unwrap();
    }
    foods.set_predicate(EntityFilter::new("not_b", |food: &Food| food.name() != "B"));

    assert_eq!(visible(&foods), vec!["A", "C"]);
    assert_eq!(foods.filtered_len(), 2);

    foods.set_predicate(EntityFilter::all());
    assert_eq!(visible(&foods), vec!["A", "B", "C"]);
}

#[test]
fn keyword_filter_matches_whole_words_case_insensitively() {
    let mut foods = FilteredList::new();
    for name in ["Chicken Rice", "Ricecake", "fried rice", "Kale"] {
        foods.add(food(name, FoodType::Meal)).unwrap();
    }

    foods.set_predicate(food_name_contains_keywords(&["RICE"]));
    assert_eq!(visible(&foods), vec!["Chicken Rice", "fried rice"]);

    foods.set_predicate(food_name_contains_keywords(&[]));
    assert!(visible(&foods).is_empty());
}

#[test]
fn type_filter_and_composition() {
    let mut foods = FilteredList::new();
    foods.add(food("Apple", FoodType::Fruit)).unwrap();
    foods.add(food("Apple Pie", FoodType::Snack)).unwrap();
    foods.add(food("Pear", FoodType::Fruit)).unwrap();

    let fruit = food_type_in(&[FoodType::Fruit]);
    foods.set_predicate(fruit.and(food_name_contains_keywords(&["apple"])));
    assert_eq!(visible(&foods), vec!["Apple"]);

    foods.set_predicate(food_type_in(&[]));
    assert!(foods.filter().is_accept_all());
    assert_eq!(foods.filtered_len(), 3);
}

#[test]
fn record_filters_select_type_and_window() {
    let mut records = FilteredList::new();
    records.add(Record::blood_sugar(0, 5.0).unwrap()).unwrap();
    records.add(Record::bmi(0, 1.7, 65.0).unwrap()).unwrap();
    records.add(Record::blood_sugar(DAY_MS, 6.0).unwrap()).unwrap();

    records.set_predicate(record_type_is(RecordType::BloodSugar));
    assert_eq!(records.filtered_len(), 2);

    records.set_predicate(record_within(0, DAY_MS).and(record_type_is(RecordType::BloodSugar)));
    let kept: Vec<_> = records.view().map(Record::date_time_ms).collect();
    assert_eq!(kept, vec![0]);
}

#[test]
fn calendar_filters_expand_repetition() {
    let day = |d: u32| NaiveDate::from_ymd_opt(1970, 1, d).unwrap();
    let mut entries = FilteredList::new();
    entries
        .add(CalendarEntry::reminder("insulin", 0, Repetition::Weekly).unwrap())
        .unwrap();
    entries
        .add(CalendarEntry::event("checkup", 2 * DAY_MS, None).unwrap())
        .unwrap();

    entries.set_predicate(calendar_entry_on(day(8)));
    let on_eighth: Vec<_> = entries.view().map(CalendarEntry::description).collect();
    assert_eq!(on_eighth, vec!["insulin"]);

    entries.set_predicate(calendar_entry_on(day(3)));
    let on_third: Vec<_> = entries.view().map(CalendarEntry::description).collect();
    assert_eq!(on_third, vec!["checkup"]);

    entries.set_predicate(calendar_entry_in_month(1970, 2));
    assert_eq!(entries.filtered_len(), 1);
}
