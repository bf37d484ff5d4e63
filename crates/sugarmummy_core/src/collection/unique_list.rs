//! Ordered entity list enforcing same-entity uniqueness.
//!
//! # Responsibility
//! - Hold one entity kind in insertion order.
//! - Reject every mutation that would store two same-entity elements.
//! - Notify subscribers after each committed mutation.
//!
//! # Invariants
//! - For all `i != j`, `items[i].is_same_entity(&items[j])` is false.
//! - Failed operations leave contents untouched and emit nothing.
//! - `set_all` and `sort_by` emit exactly one `Reset`.

use crate::collection::observer::{ChangeObservers, ListChange, SubscriptionId};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Entity kinds stored in a `UniqueEntityList`.
///
/// `is_same_entity` is the weak identity used for duplicate detection. It is
/// deliberately looser than `PartialEq`, which compares every attribute and
/// is what `set_entity` and `remove` use to locate their target.
pub trait SameEntity: Clone + PartialEq + Debug + 'static {
    /// Stable kind name used in errors and log events.
    const KIND: &'static str;

    fn is_same_entity(&self, other: &Self) -> bool;
}

/// Errors from unique list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The mutation would store two same-entity elements.
    DuplicateEntity { kind: &'static str },
    /// No element equals the requested target.
    EntityNotFound { kind: &'static str },
    /// A required argument was absent at an optional-input boundary.
    NullArgument { what: &'static str },
}

impl ListError {
    /// Stable machine-readable code for logs and callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity { .. } => "duplicate_entity",
            Self::EntityNotFound { .. } => "entity_not_found",
            Self::NullArgument { .. } => "null_argument",
        }
    }
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { kind } => write!(f, "this {kind} already exists"),
            Self::EntityNotFound { kind } => write!(f, "{kind} not found"),
            Self::NullArgument { what } => write!(f, "required argument is missing: {what}"),
        }
    }
}

impl Error for ListError {}

/// Duplicate-free ordered collection of one entity kind.
#[derive(Debug)]
pub struct UniqueEntityList<T: SameEntity> {
    items: Vec<T>,
    observers: ChangeObservers<T>,
}

impl<T: SameEntity> Default for UniqueEntityList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            observers: ChangeObservers::new(),
        }
    }
}

impl<T: SameEntity> UniqueEntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from loaded contents, rejecting same-entity pairs.
    pub fn from_vec(items: Vec<T>) -> ListResult<Self> {
        if has_same_entity_pair(&items) {
            return Err(ListError::DuplicateEntity { kind: T::KIND });
        }
        Ok(Self {
            items,
            observers: ChangeObservers::new(),
        })
    }

    /// Returns whether any stored element is the same entity as `entity`.
    pub fn contains(&self, entity: &T) -> bool {
        self.items.iter().any(|item| item.is_same_entity(entity))
    }

    /// Appends `entity` unless a same-entity element already exists.
    pub fn add(&mut self, entity: T) -> ListResult<()> {
        if self.contains(&entity) {
            return Err(ListError::DuplicateEntity { kind: T::KIND });
        }
        self.items.push(entity);
        let index = self.items.len() - 1;
        self.emit(ListChange::Added { index });
        Ok(())
    }

    /// Replaces `target` with `edited`, keeping its position.
    ///
    /// `edited` may share identity with `target` itself; it must not share
    /// identity with any other element.
    pub fn set_entity(&mut self, target: &T, edited: T) -> ListResult<()> {
        let index = self
            .position_of(target)
            .ok_or(ListError::EntityNotFound { kind: T::KIND })?;

        let clashes = self
            .items
            .iter()
            .enumerate()
            .any(|(i, item)| i != index && item.is_same_entity(&edited));
        if clashes {
            return Err(ListError::DuplicateEntity { kind: T::KIND });
        }

        self.items[index] = edited;
        self.emit(ListChange::Replaced { index });
        Ok(())
    }

    /// Removes the element equal to `target` and returns it.
    pub fn remove(&mut self, target: &T) -> ListResult<T> {
        let index = self
            .position_of(target)
            .ok_or(ListError::EntityNotFound { kind: T::KIND })?;
        let removed = self.items.remove(index);
        self.emit(ListChange::Removed { index });
        Ok(removed)
    }

    /// Replaces all contents with `source` in one step.
    pub fn set_all(&mut self, source: Vec<T>) -> ListResult<()> {
        if has_same_entity_pair(&source) {
            return Err(ListError::DuplicateEntity { kind: T::KIND });
        }
        self.items = source;
        let len = self.items.len();
        self.emit(ListChange::Reset { len });
        Ok(())
    }

    /// Stable-sorts contents. Uniqueness is unaffected by reordering.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        let len = self.items.len();
        self.emit(ListChange::Reset { len });
    }

    /// Read-only view of the current contents.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registers a change callback. See `ChangeObservers::subscribe`.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[T]) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn emit(&mut self, change: ListChange) {
        self.observers.notify(&change, &self.items);
    }

    fn position_of(&self, target: &T) -> Option<usize> {
        self.items.iter().position(|item| item == target)
    }
}

impl<'a, T: SameEntity> IntoIterator for &'a UniqueEntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn has_same_entity_pair<T: SameEntity>(items: &[T]) -> bool {
    items.iter().enumerate().any(|(i, left)| {
        items[i + 1..]
            .iter()
            .any(|right| left.is_same_entity(right))
    })
}
