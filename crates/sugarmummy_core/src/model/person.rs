//! Contact domain model kept from the address-book base.

use crate::collection::filter::EntityFilter;
use crate::collection::unique_list::SameEntity;
use crate::model::{contains_any_word, normalize_keywords, require_text, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid person name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9+_.\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));

/// Contact entry.
///
/// Same-entity rule: equal names and at least one of phone or email equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersonData")]
pub struct Person {
    name: String,
    phone: String,
    email: String,
    address: String,
    tags: BTreeSet<String>,
}

#[derive(Deserialize)]
struct PersonData {
    name: String,
    phone: String,
    email: String,
    address: String,
    #[serde(default)]
    tags: BTreeSet<String>,
}

impl TryFrom<PersonData> for Person {
    type Error = ValidationError;

    fn try_from(data: PersonData) -> Result<Self, Self::Error> {
        Person::new(data.name, data.phone, data.email, data.address, data.tags)
    }
}

impl Person {
    pub fn new<I, S>(
        name: impl AsRef<str>,
        phone: impl AsRef<str>,
        email: impl AsRef<str>,
        address: impl AsRef<str>,
        tags: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = checked("name", name.as_ref(), &PERSON_NAME_RE)?;
        let phone = checked("phone", phone.as_ref(), &PHONE_RE)?;
        let email = checked("email", email.as_ref(), &EMAIL_RE)?;
        let address = require_text("address", address.as_ref())?;
        let tags = tags
            .into_iter()
            .map(|tag| checked("tag", tag.as_ref(), &TAG_RE))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            name,
            phone,
            email,
            address,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl SameEntity for Person {
    const KIND: &'static str = "person";

    fn is_same_entity(&self, other: &Self) -> bool {
        self.name == other.name && (self.phone == other.phone || self.email == other.email)
    }
}

pub fn person_name_contains_keywords(keywords: &[&str]) -> EntityFilter<Person> {
    let keywords = normalize_keywords(keywords);
    EntityFilter::new("person_name_keywords", move |person: &Person| {
        contains_any_word(person.name(), &keywords)
    })
}

fn checked(field: &'static str, value: &str, pattern: &Regex) -> Result<String, ValidationError> {
    let value = require_text(field, value)?;
    if !pattern.is_match(&value) {
        return Err(ValidationError::InvalidFormat { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::Person;
    use crate::collection::unique_list::SameEntity;
    use crate::model::ValidationError;

    fn alice(phone: &str, email: &str) -> Person {
        Person::new("Alice Pauline", phone, email, "123 Jurong West", ["friends"])
            .expect("valid person")
    }

    #[test]
    fn same_person_needs_name_and_one_contact_channel() {
        let base = alice("94351253", "alice@example.com");
        assert!(base.is_same_entity(&alice("94351253", "other@example.com")));
        assert!(base.is_same_entity(&alice("11111111", "alice@example.com")));
        assert!(!base.is_same_entity(&alice("11111111", "other@example.com")));
    }

    #[test]
    fn rejects_invalid_email_and_tag() {
        let err = Person::new("Bob", "123", "bob@", "addr", Vec::<String>::new())
            .expect_err("bad email");
        assert!(matches!(err, ValidationError::InvalidFormat { field: "email", .. }));

        let err = Person::new("Bob", "123", "bob@example.com", "addr", ["best friend"])
            .expect_err("bad tag");
        assert!(matches!(err, ValidationError::InvalidFormat { field: "tag", .. }));
    }
}
