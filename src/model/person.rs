use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::group::Group;
use super::tag::Tag;
use crate::error::BookResult;
use crate::validation;

/// The scalar fields of a person. These alone decide person identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub timetable_link: String,
    pub detail: String,
}

impl PersonDetails {
    /// Validates and trims every field.
    pub fn create(
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
        timetable_link: &str,
        detail: &str,
    ) -> BookResult<Self> {
        Ok(Self {
            name: validation::non_blank(name, "name")?,
            phone: validation::phone(phone)?,
            email: validation::email(email)?,
            address: validation::non_blank(address, "address")?,
            timetable_link: validation::non_blank(timetable_link, "timetable link")?,
            detail: detail.trim().to_string(),
        })
    }
}

/// A person in the address book.
///
/// Equality and hashing only consider [`PersonDetails`]. Two persons that
/// differ only in tags or groups are duplicates of each other, so changing a
/// person's group membership can never turn it into a duplicate of someone
/// else. Use [`Person::same_as`] for a full value comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub details: PersonDetails,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub groups: BTreeSet<Group>,
}

impl Person {
    pub fn new(details: PersonDetails) -> Self {
        Self {
            details,
            tags: BTreeSet::new(),
            groups: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.contains(group)
    }

    /// Compares every field, including tags and group names and colors.
    pub fn same_as(&self, other: &Person) -> bool {
        self.details == other.details
            && self.tags == other.tags
            && self.groups.len() == other.groups.len()
            && self
                .groups
                .iter()
                .zip(other.groups.iter())
                .all(|(a, b)| a.same_as(b))
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.details == other.details
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.details.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.details;
        write!(
            f,
            "{} Phone: {} Email: {} Address: {} Timetable link: {} Detail: {} Tags: ",
            d.name, d.phone, d.email, d.address, d.timetable_link, d.detail
        )?;
        for tag in &self.tags {
            write!(f, "{}", tag)?;
        }
        write!(f, " Groups: ")?;
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}
