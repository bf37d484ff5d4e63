//! User bio domain model.

use crate::collection::unique_list::SameEntity;
use crate::model::{require_text, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

static CONTACT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{3,}$").expect("valid contact number regex"));

/// Profile of the person using the tracker.
///
/// Only one bio is expected in practice, but the list engine still keys it by
/// trimmed name so that a second profile with the same name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserData")]
pub struct User {
    name: String,
    date_of_birth: Option<String>,
    gender: Option<String>,
    address: Option<String>,
    contact_numbers: Vec<String>,
    medical_conditions: Vec<String>,
    goals: Vec<String>,
}

#[derive(Deserialize)]
struct UserData {
    name: String,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    contact_numbers: Vec<String>,
    #[serde(default)]
    medical_conditions: Vec<String>,
    #[serde(default)]
    goals: Vec<String>,
}

impl TryFrom<UserData> for User {
    type Error = ValidationError;

    fn try_from(data: UserData) -> Result<Self, Self::Error> {
        let mut user = User::new(data.name)?;
        if let Some(dob) = data.date_of_birth {
            user = user.with_date_of_birth(dob)?;
        }
        if let Some(gender) = data.gender {
            user = user.with_gender(gender)?;
        }
        if let Some(address) = data.address {
            user = user.with_address(address)?;
        }
        for number in data.contact_numbers {
            user = user.with_contact_number(number)?;
        }
        for condition in data.medical_conditions {
            user = user.with_medical_condition(condition)?;
        }
        for goal in data.goals {
            user = user.with_goal(goal)?;
        }
        Ok(user)
    }
}

impl User {
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("user name", name.as_ref())?,
            date_of_birth: None,
            gender: None,
            address: None,
            contact_numbers: Vec::new(),
            medical_conditions: Vec::new(),
            goals: Vec::new(),
        })
    }

    /// Sets date of birth in `YYYY-MM-DD` form.
    pub fn with_date_of_birth(mut self, value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = require_text("date of birth", value.as_ref())?;
        if NaiveDate::parse_from_str(&value, DATE_OF_BIRTH_FORMAT).is_err() {
            return Err(ValidationError::InvalidFormat {
                field: "date of birth",
                value,
            });
        }
        self.date_of_birth = Some(value);
        Ok(self)
    }

    pub fn with_gender(mut self, value: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.gender = Some(require_text("gender", value.as_ref())?);
        Ok(self)
    }

    pub fn with_address(mut self, value: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.address = Some(require_text("address", value.as_ref())?);
        Ok(self)
    }

    pub fn with_contact_number(mut self, value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = require_text("contact number", value.as_ref())?;
        if !CONTACT_NUMBER_RE.is_match(&value) {
            return Err(ValidationError::InvalidFormat {
                field: "contact number",
                value,
            });
        }
        self.contact_numbers.push(value);
        Ok(self)
    }

    pub fn with_medical_condition(
        mut self,
        value: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.medical_conditions
            .push(require_text("medical condition", value.as_ref())?);
        Ok(self)
    }

    pub fn with_goal(mut self, value: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.goals.push(require_text("goal", value.as_ref())?);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn contact_numbers(&self) -> &[String] {
        &self.contact_numbers
    }

    pub fn medical_conditions(&self) -> &[String] {
        &self.medical_conditions
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }
}

impl SameEntity for User {
    const KIND: &'static str = "user";

    fn is_same_entity(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::collection::unique_list::SameEntity;
    use crate::model::ValidationError;

    #[test]
    fn builds_full_profile() {
        let user = User::new(" Amy ")
            .and_then(|u| u.with_date_of_birth("1990-02-28"))
            .and_then(|u| u.with_contact_number("+6591234567"))
            .and_then(|u| u.with_medical_condition("Type II Diabetes"))
            .and_then(|u| u.with_goal("lose 3kg"))
            .expect("valid profile");

        assert_eq!(user.name(), "Amy");
        assert_eq!(user.date_of_birth(), Some("1990-02-28"));
        assert_eq!(user.contact_numbers(), ["+6591234567".to_string()]);
        assert_eq!(user.goals().len(), 1);
    }

    #[test]
    fn rejects_impossible_birth_date_and_short_number() {
        let err = User::new("Amy")
            .and_then(|u| u.with_date_of_birth("1990-02-30"))
            .expect_err("invalid date");
        assert!(matches!(err, ValidationError::InvalidFormat { field: "date of birth", .. }));

        let err = User::new("Amy")
            .and_then(|u| u.with_contact_number("12"))
            .expect_err("too short");
        assert!(matches!(err, ValidationError::InvalidFormat { field: "contact number", .. }));
    }

    #[test]
    fn same_user_is_keyed_by_name() {
        let plain = User::new("Amy").expect("valid");
        let detailed = User::new("Amy")
            .and_then(|u| u.with_gender("female"))
            .expect("valid");
        assert!(plain.is_same_entity(&detailed));
        assert_ne!(plain, detailed);
    }
}
