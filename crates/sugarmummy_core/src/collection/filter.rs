//! Live filtered projection over a unique entity list.
//!
//! # Responsibility
//! - Own one backing `UniqueEntityList` and the active `EntityFilter`.
//! - Yield the filtered subset lazily, in backing order.
//!
//! # Invariants
//! - The view never stores a second copy of the elements; it borrows the
//!   backing list, so it cannot outlive a mutation.
//! - All writes go through the backing list API.
//! - Replacing the filter notifies subscribers with `PredicateChanged`.

use crate::collection::observer::{ListChange, SubscriptionId};
use crate::collection::unique_list::{ListError, ListResult, SameEntity, UniqueEntityList};
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::rc::Rc;

const ACCEPT_ALL_LABEL: &str = "all";

/// Shareable entity predicate with a short label for diagnostics.
pub struct EntityFilter<T> {
    label: String,
    predicate: Rc<dyn Fn(&T) -> bool>,
    // Set only by `all()`; labels are free text.
    accept_all: bool,
}

impl<T: 'static> EntityFilter<T> {
    /// Predicate accepting every element.
    pub fn all() -> Self {
        Self {
            label: ACCEPT_ALL_LABEL.to_string(),
            predicate: Rc::new(|_: &T| true),
            accept_all: true,
        }
    }

    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self {
            label: label.into(),
            predicate: Rc::new(predicate),
            accept_all: false,
        }
    }

    /// Combines two filters; an element must pass both.
    pub fn and(self, other: EntityFilter<T>) -> Self {
        match (self.accept_all, other.accept_all) {
            (true, _) => return other,
            (_, true) => return self,
            _ => {}
        }
        let label = format!("{}&{}", self.label, other.label);
        let left = self.predicate;
        let right = other.predicate;
        Self {
            label,
            predicate: Rc::new(move |item: &T| left(item) && right(item)),
            accept_all: false,
        }
    }
}

impl<T> EntityFilter<T> {
    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True only for filters built by `all()` (or combinations of them).
    pub fn is_accept_all(&self) -> bool {
        self.accept_all
    }
}

impl<T> Clone for EntityFilter<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Rc::clone(&self.predicate),
            accept_all: self.accept_all,
        }
    }
}

impl<T: 'static> Default for EntityFilter<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> Debug for EntityFilter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityFilter")
            .field("label", &self.label)
            .field("accept_all", &self.accept_all)
            .finish()
    }
}

/// Unique list paired with its active filter.
#[derive(Debug)]
pub struct FilteredList<T: SameEntity> {
    list: UniqueEntityList<T>,
    filter: EntityFilter<T>,
}

impl<T: SameEntity> Default for FilteredList<T> {
    fn default() -> Self {
        Self::from_list(UniqueEntityList::new())
    }
}

impl<T: SameEntity> FilteredList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing list with the accept-all filter.
    pub fn from_list(list: UniqueEntityList<T>) -> Self {
        Self {
            list,
            filter: EntityFilter::all(),
        }
    }

    /// Backing list (read-only).
    pub fn list(&self) -> &UniqueEntityList<T> {
        &self.list
    }

    pub fn filter(&self) -> &EntityFilter<T> {
        &self.filter
    }

    /// Lazily yields backing elements accepted by the active filter.
    pub fn view(&self) -> FilteredView<'_, T> {
        FilteredView {
            items: self.list.iter(),
            filter: &self.filter,
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.view().count()
    }

    pub fn set_predicate(&mut self, filter: EntityFilter<T>) {
        self.filter = filter;
        self.list.emit(ListChange::PredicateChanged);
    }

    /// Replaces the filter from an optional input; `None` is rejected.
    ///
    /// Callers that want to clear filtering pass `EntityFilter::all()`.
    pub fn set_predicate_opt(&mut self, filter: Option<EntityFilter<T>>) -> ListResult<()> {
        let filter = filter.ok_or(ListError::NullArgument { what: "predicate" })?;
        self.set_predicate(filter);
        Ok(())
    }

    pub fn contains(&self, entity: &T) -> bool {
        self.list.contains(entity)
    }

    pub fn add(&mut self, entity: T) -> ListResult<()> {
        self.list.add(entity)
    }

    pub fn set_entity(&mut self, target: &T, edited: T) -> ListResult<()> {
        self.list.set_entity(target, edited)
    }

    pub fn remove(&mut self, target: &T) -> ListResult<T> {
        self.list.remove(target)
    }

    pub fn set_all(&mut self, source: Vec<T>) -> ListResult<()> {
        self.list.set_all(source)
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.list.sort_by(compare)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[T]) + 'static,
    {
        self.list.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.list.unsubscribe(id)
    }
}

/// Borrowing iterator over the filtered subset of a list.
pub struct FilteredView<'a, T> {
    items: std::slice::Iter<'a, T>,
    filter: &'a EntityFilter<T>,
}

impl<'a, T> Iterator for FilteredView<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.items.by_ref().find(|item| filter.matches(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

impl<T> DoubleEndedIterator for FilteredView<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.items.by_ref().rfind(|item| filter.matches(item))
    }
}

impl<T> FusedIterator for FilteredView<'_, T> {}
