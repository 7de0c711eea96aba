use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{BookError, BookResult};
use crate::validation;

/// Alphanumeric, non-empty group name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    pub fn parse(value: &str) -> BookResult<Self> {
        validation::alphanumeric(value, "group name").map(GroupName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = BookError;

    fn try_from(value: String) -> BookResult<Self> {
        GroupName::parse(&value)
    }
}

impl From<GroupName> for String {
    fn from(name: GroupName) -> Self {
        name.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed palette a group can be painted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Teal,
    Red,
    Yellow,
    Blue,
    Orange,
    Brown,
    Green,
    Pink,
    Black,
    Grey,
    #[default]
    Undefined,
}

impl GroupColor {
    /// Colors a user may pick; `Undefined` is only ever the default.
    pub const SELECTABLE: [GroupColor; 10] = [
        GroupColor::Teal,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Blue,
        GroupColor::Orange,
        GroupColor::Brown,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Black,
        GroupColor::Grey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupColor::Teal => "teal",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Blue => "blue",
            GroupColor::Orange => "orange",
            GroupColor::Brown => "brown",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Black => "black",
            GroupColor::Grey => "grey",
            GroupColor::Undefined => "undefined",
        }
    }

    pub fn palette_description() -> String {
        let names: Vec<&str> = Self::SELECTABLE.iter().map(|c| c.as_str()).collect();
        format!("Colors available are: {}", names.join(", "))
    }
}

impl FromStr for GroupColor {
    type Err = BookError;

    fn from_str(s: &str) -> BookResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::SELECTABLE
            .iter()
            .chain(std::iter::once(&GroupColor::Undefined))
            .find(|c| c.as_str() == wanted)
            .copied()
            .ok_or_else(|| BookError::InvalidValue {
                field: "group color".into(),
                reason: Self::palette_description(),
            })
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, colored label shared across persons.
///
/// Equality, ordering and hashing look at the name only: two groups with the
/// same name and different colors are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: GroupName,
    #[serde(default)]
    pub color: GroupColor,
}

impl Group {
    pub fn new(name: GroupName) -> Self {
        Self {
            name,
            color: GroupColor::Undefined,
        }
    }

    pub fn with_color(name: GroupName, color: GroupColor) -> Self {
        Self { name, color }
    }

    /// Validates `name` and builds an uncolored group.
    pub fn named(name: &str) -> BookResult<Self> {
        Ok(Self::new(GroupName::parse(name)?))
    }

    /// Field-wise comparison including the color.
    pub fn same_as(&self, other: &Group) -> bool {
        self.name == other.name && self.color == other.color
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Group {}

impl PartialOrd for Group {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Group {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_name_rejects_non_alphanumeric() {
        assert!(GroupName::parse("CS 1010").is_err());
        assert!(GroupName::parse("").is_err());
        assert!(GroupName::parse("CS1010").is_ok());
    }

    #[test]
    fn groups_with_same_name_are_equal_regardless_of_color() {
        let plain = Group::named("CS1010").unwrap();
        let red = Group::with_color(plain.name.clone(), GroupColor::Red);
        assert_eq!(plain, red);
        assert!(!plain.same_as(&red));
    }

    #[test]
    fn color_parsing_is_case_insensitive_and_trimmed() {
        assert_eq!(" Red ".parse::<GroupColor>().unwrap(), GroupColor::Red);
        assert_eq!("GREY".parse::<GroupColor>().unwrap(), GroupColor::Grey);
    }

    #[test]
    fn color_parsing_rejects_unknown() {
        let err = "purple".parse::<GroupColor>().unwrap_err();
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn default_color_is_undefined() {
        assert_eq!(Group::named("CS2010").unwrap().color, GroupColor::Undefined);
    }

    #[test]
    fn group_serializes_name_and_color() {
        let group = Group::with_color(GroupName::parse("CS2010").unwrap(), GroupColor::Teal);
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, r#"{"name":"CS2010","color":"teal"}"#);
        assert!(serde_json::from_str::<Group>(r#"{"name":"bad name"}"#).is_err());
    }
}
