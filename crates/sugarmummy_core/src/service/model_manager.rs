//! Model façade over per-kind entity stores.
//!
//! # Responsibility
//! - Aggregate one `FilteredList` per entity kind plus user preferences.
//! - Expose per-kind has/add/delete/set/filter operations to the command
//!   and UI layers.
//!
//! # Invariants
//! - Every per-kind operation delegates to exactly one list operation; the
//!   façade adds no invariant of its own.
//! - Mutation outcomes are logged as metadata only (kind, op, status), never
//!   entity content.

use crate::collection::filter::{EntityFilter, FilteredList, FilteredView};
use crate::collection::observer::{ListChange, SubscriptionId};
use crate::collection::unique_list::{ListResult, SameEntity};
use crate::model::calendar::CalendarEntry;
use crate::model::food::Food;
use crate::model::person::Person;
use crate::model::record::Record;
use crate::model::user::User;
use crate::prefs::{DataFile, GuiSettings, PrefsError, UserPrefs};
use crate::service::recommendation_service::FoodSortKey;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// In-memory model for one application session.
///
/// Not `Send`: filters and subscribers are `Rc`/`Box` based. Embedders that
/// need cross-thread access wrap the whole manager in one `Mutex`.
#[derive(Debug, Default)]
pub struct ModelManager {
    foods: FilteredList<Food>,
    records: FilteredList<Record>,
    users: FilteredList<User>,
    calendar_entries: FilteredList<CalendarEntry>,
    persons: FilteredList<Person>,
    user_prefs: UserPrefs,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty model with loaded preferences.
    pub fn with_prefs(user_prefs: UserPrefs) -> Result<Self, PrefsError> {
        user_prefs.validate()?;
        info!("event=model_init module=model status=ok");
        Ok(Self {
            user_prefs,
            ..Self::default()
        })
    }

    // ---- preferences ----

    pub fn user_prefs(&self) -> &UserPrefs {
        &self.user_prefs
    }

    pub fn set_user_prefs(&mut self, user_prefs: UserPrefs) -> Result<(), PrefsError> {
        user_prefs.validate()?;
        self.user_prefs = user_prefs;
        Ok(())
    }

    pub fn gui_settings(&self) -> &GuiSettings {
        &self.user_prefs.gui_settings
    }

    pub fn set_gui_settings(&mut self, gui_settings: GuiSettings) {
        self.user_prefs.gui_settings = gui_settings;
    }

    pub fn file_path(&self, file: DataFile) -> &Path {
        self.user_prefs.file_path(file)
    }

    pub fn set_file_path(
        &mut self,
        file: DataFile,
        path: impl Into<PathBuf>,
    ) -> Result<(), PrefsError> {
        self.user_prefs.set_file_path(file, path)
    }

    // ---- foods ----

    pub fn foods(&self) -> &FilteredList<Food> {
        &self.foods
    }

    pub fn has_food(&self, food: &Food) -> bool {
        self.foods.contains(food)
    }

    pub fn add_food(&mut self, food: Food) -> ListResult<()> {
        logged::<Food, _>("entity_add", self.foods.add(food))
    }

    pub fn delete_food(&mut self, target: &Food) -> ListResult<Food> {
        logged::<Food, _>("entity_delete", self.foods.remove(target))
    }

    pub fn set_food(&mut self, target: &Food, edited: Food) -> ListResult<()> {
        logged::<Food, _>("entity_set", self.foods.set_entity(target, edited))
    }

    /// Replaces the food list, e.g. from an external loader.
    pub fn set_food_list(&mut self, foods: Vec<Food>) -> ListResult<()> {
        logged::<Food, _>("entity_set_all", self.foods.set_all(foods))
    }

    pub fn food_list(&self) -> &[Food] {
        self.foods.list().as_slice()
    }

    pub fn filtered_food_list(&self) -> FilteredView<'_, Food> {
        self.foods.view()
    }

    pub fn update_filtered_food_list(&mut self, filter: EntityFilter<Food>) {
        log_filter::<Food>(&filter);
        self.foods.set_predicate(filter);
    }

    /// Reorders the backing food list for recommendation display.
    pub fn sort_food_list(&mut self, key: FoodSortKey, descending: bool) {
        self.foods.sort_by(|left, right| {
            let ordering = key.compare(left, right);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        debug!(
            "event=entity_sort module=model kind=food status=ok key={} descending={}",
            key.as_str(),
            descending
        );
    }

    pub fn subscribe_foods<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[Food]) + 'static,
    {
        self.foods.subscribe(callback)
    }

    pub fn unsubscribe_foods(&mut self, id: SubscriptionId) -> bool {
        self.foods.unsubscribe(id)
    }

    // ---- records ----

    pub fn records(&self) -> &FilteredList<Record> {
        &self.records
    }

    pub fn has_record(&self, record: &Record) -> bool {
        self.records.contains(record)
    }

    pub fn add_record(&mut self, record: Record) -> ListResult<()> {
        logged::<Record, _>("entity_add", self.records.add(record))
    }

    pub fn delete_record(&mut self, target: &Record) -> ListResult<Record> {
        logged::<Record, _>("entity_delete", self.records.remove(target))
    }

    pub fn set_record(&mut self, target: &Record, edited: Record) -> ListResult<()> {
        logged::<Record, _>("entity_set", self.records.set_entity(target, edited))
    }

    pub fn set_record_list(&mut self, records: Vec<Record>) -> ListResult<()> {
        logged::<Record, _>("entity_set_all", self.records.set_all(records))
    }

    pub fn record_list(&self) -> &[Record] {
        self.records.list().as_slice()
    }

    pub fn filtered_record_list(&self) -> FilteredView<'_, Record> {
        self.records.view()
    }

    pub fn update_filtered_record_list(&mut self, filter: EntityFilter<Record>) {
        log_filter::<Record>(&filter);
        self.records.set_predicate(filter);
    }

    pub fn subscribe_records<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[Record]) + 'static,
    {
        self.records.subscribe(callback)
    }

    pub fn unsubscribe_records(&mut self, id: SubscriptionId) -> bool {
        self.records.unsubscribe(id)
    }

    // ---- users (bio) ----

    pub fn users(&self) -> &FilteredList<User> {
        &self.users
    }

    /// Returns whether a bio has been recorded.
    pub fn bio_exists(&self) -> bool {
        !self.users.list().is_empty()
    }

    pub fn has_user(&self, user: &User) -> bool {
        self.users.contains(user)
    }

    pub fn add_user(&mut self, user: User) -> ListResult<()> {
        logged::<User, _>("entity_add", self.users.add(user))
    }

    pub fn delete_user(&mut self, target: &User) -> ListResult<User> {
        logged::<User, _>("entity_delete", self.users.remove(target))
    }

    pub fn set_user(&mut self, target: &User, edited: User) -> ListResult<()> {
        logged::<User, _>("entity_set", self.users.set_entity(target, edited))
    }

    pub fn set_user_list(&mut self, users: Vec<User>) -> ListResult<()> {
        logged::<User, _>("entity_set_all", self.users.set_all(users))
    }

    pub fn user_list(&self) -> &[User] {
        self.users.list().as_slice()
    }

    pub fn filtered_user_list(&self) -> FilteredView<'_, User> {
        self.users.view()
    }

    pub fn update_filtered_user_list(&mut self, filter: EntityFilter<User>) {
        log_filter::<User>(&filter);
        self.users.set_predicate(filter);
    }

    pub fn subscribe_users<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[User]) + 'static,
    {
        self.users.subscribe(callback)
    }

    pub fn unsubscribe_users(&mut self, id: SubscriptionId) -> bool {
        self.users.unsubscribe(id)
    }

    // ---- calendar entries ----

    pub fn calendar_entries(&self) -> &FilteredList<CalendarEntry> {
        &self.calendar_entries
    }

    pub fn has_calendar_entry(&self, entry: &CalendarEntry) -> bool {
        self.calendar_entries.contains(entry)
    }

    pub fn add_calendar_entry(&mut self, entry: CalendarEntry) -> ListResult<()> {
        logged::<CalendarEntry, _>("entity_add", self.calendar_entries.add(entry))
    }

    pub fn delete_calendar_entry(&mut self, target: &CalendarEntry) -> ListResult<CalendarEntry> {
        logged::<CalendarEntry, _>("entity_delete", self.calendar_entries.remove(target))
    }

    pub fn set_calendar_entry(
        &mut self,
        target: &CalendarEntry,
        edited: CalendarEntry,
    ) -> ListResult<()> {
        logged::<CalendarEntry, _>(
            "entity_set",
            self.calendar_entries.set_entity(target, edited),
        )
    }

    pub fn set_calendar_entry_list(&mut self, entries: Vec<CalendarEntry>) -> ListResult<()> {
        logged::<CalendarEntry, _>("entity_set_all", self.calendar_entries.set_all(entries))
    }

    pub fn calendar_entry_list(&self) -> &[CalendarEntry] {
        self.calendar_entries.list().as_slice()
    }

    pub fn filtered_calendar_entry_list(&self) -> FilteredView<'_, CalendarEntry> {
        self.calendar_entries.view()
    }

    pub fn update_filtered_calendar_entry_list(&mut self, filter: EntityFilter<CalendarEntry>) {
        log_filter::<CalendarEntry>(&filter);
        self.calendar_entries.set_predicate(filter);
    }

    pub fn subscribe_calendar_entries<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[CalendarEntry]) + 'static,
    {
        self.calendar_entries.subscribe(callback)
    }

    pub fn unsubscribe_calendar_entries(&mut self, id: SubscriptionId) -> bool {
        self.calendar_entries.unsubscribe(id)
    }

    // ---- persons ----

    pub fn persons(&self) -> &FilteredList<Person> {
        &self.persons
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> ListResult<()> {
        logged::<Person, _>("entity_add", self.persons.add(person))
    }

    pub fn delete_person(&mut self, target: &Person) -> ListResult<Person> {
        logged::<Person, _>("entity_delete", self.persons.remove(target))
    }

    pub fn set_person(&mut self, target: &Person, edited: Person) -> ListResult<()> {
        logged::<Person, _>("entity_set", self.persons.set_entity(target, edited))
    }

    pub fn set_person_list(&mut self, persons: Vec<Person>) -> ListResult<()> {
        logged::<Person, _>("entity_set_all", self.persons.set_all(persons))
    }

    pub fn person_list(&self) -> &[Person] {
        self.persons.list().as_slice()
    }

    pub fn filtered_person_list(&self) -> FilteredView<'_, Person> {
        self.persons.view()
    }

    pub fn update_filtered_person_list(&mut self, filter: EntityFilter<Person>) {
        log_filter::<Person>(&filter);
        self.persons.set_predicate(filter);
    }

    pub fn subscribe_persons<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[Person]) + 'static,
    {
        self.persons.subscribe(callback)
    }

    pub fn unsubscribe_persons(&mut self, id: SubscriptionId) -> bool {
        self.persons.unsubscribe(id)
    }
}

fn logged<T: SameEntity, R>(op: &'static str, result: ListResult<R>) -> ListResult<R> {
    match &result {
        Ok(_) => debug!(
            "event={} module=model kind={} status=ok",
            op,
            log_kind(T::KIND)
        ),
        Err(err) => warn!(
            "event={} module=model kind={} status=error error_code={}",
            op,
            log_kind(T::KIND),
            err.code()
        ),
    }
    result
}

fn log_filter<T: SameEntity>(filter: &EntityFilter<T>) {
    debug!(
        "event=filter_update module=model kind={} status=ok filter={}",
        log_kind(T::KIND),
        filter.label()
    );
}

fn log_kind(kind: &str) -> String {
    kind.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::ModelManager;
    use crate::model::food::{Food, FoodType, Nutrition};
    use crate::model::user::User;
    use crate::prefs::{DataFile, UserPrefs};
    use crate::service::recommendation_service::FoodSortKey;

    fn food(name: &str, calorie: f64) -> Food {
        Food::new(
            name,
            FoodType::Meal,
            Nutrition {
                calorie,
                ..Nutrition::default()
            },
        )
        .expect("valid food")
    }

    #[test]
    fn bio_exists_tracks_user_list() {
        let mut model = ModelManager::new();
        assert!(!model.bio_exists());
        let user = User::new("Amy").expect("valid user");
        model.add_user(user.clone()).expect("add user");
        assert!(model.bio_exists());
        model.delete_user(&user).expect("delete user");
        assert!(!model.bio_exists());
    }

    #[test]
    fn sort_food_list_reorders_backing_list() {
        let mut model = ModelManager::new();
        model.add_food(food("rice", 200.0)).expect("add");
        model.add_food(food("egg", 70.0)).expect("add");
        model.add_food(food("noodle", 300.0)).expect("add");

        model.sort_food_list(FoodSortKey::Calorie, true);
        let names: Vec<_> = model.food_list().iter().map(Food::name).collect();
        assert_eq!(names, vec!["noodle", "rice", "egg"]);
    }

    #[test]
    fn with_prefs_keeps_loaded_paths() {
        let mut prefs = UserPrefs::default();
        prefs
            .set_file_path(DataFile::FoodList, "/data/food.json")
            .expect("valid path");
        let model = ModelManager::with_prefs(prefs).expect("valid prefs");
        assert_eq!(
            model.file_path(DataFile::FoodList).to_str(),
            Some("/data/food.json")
        );
    }
}
