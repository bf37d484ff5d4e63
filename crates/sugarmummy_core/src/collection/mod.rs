//! Generic observable collections shared by every entity kind.
//!
//! # Responsibility
//! - Provide one duplicate-free list engine parameterized by each kind's
//!   same-entity rule.
//! - Provide live filtered views and change subscriptions over those lists.
//!
//! # Invariants
//! - Collections are single-threaded; callbacks and filters are `Rc`/`Box`
//!   based and therefore `!Send`.

pub mod filter;
pub mod observer;
pub mod unique_list;
