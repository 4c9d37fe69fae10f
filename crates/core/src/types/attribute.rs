// FILE: crates/core/src/types/attribute.rs

//! Catalog attributes

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// One attribute table of the catalog
///
/// The set is closed: every table the catalog reads or writes is named here, so
/// a misspelled attribute is a compile error rather than a silently empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Age,
    Author,
    Circle,
    CreationDate,
    Directory,
    Illustration,
    ProductFormat,
    ReleaseDate,
    Scenario,
    Series,
    Tag,
    Title,
    VoiceActor,
}

impl Attribute {
    /// Every attribute, in persisted-file order
    pub const ALL: [Attribute; 13] = [
        Self::Age,
        Self::Author,
        Self::Circle,
        Self::CreationDate,
        Self::Directory,
        Self::Illustration,
        Self::ProductFormat,
        Self::ReleaseDate,
        Self::Scenario,
        Self::Series,
        Self::Tag,
        Self::Title,
        Self::VoiceActor,
    ];

    /// The table whose rows mean "this work is catalogued"
    pub const PRESENCE: Attribute = Self::Title;

    /// Attribute name as used for file names and record keys
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Author => "author",
            Self::Circle => "circle",
            Self::CreationDate => "creationDate",
            Self::Directory => "directory",
            Self::Illustration => "illustration",
            Self::ProductFormat => "productFormat",
            Self::ReleaseDate => "releaseDate",
            Self::Scenario => "scenario",
            Self::Series => "series",
            Self::Tag => "tag",
            Self::Title => "title",
            Self::VoiceActor => "voiceActor",
        }
    }

    /// Multi-valued tables may hold several rows per identifier
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            Self::Author
                | Self::Illustration
                | Self::ProductFormat
                | Self::Scenario
                | Self::Tag
                | Self::VoiceActor
        )
    }

    /// False for the attributes synthesized from the folder scan
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Directory | Self::CreationDate)
    }

    pub fn single_valued() -> impl Iterator<Item = Attribute> {
        Self::ALL.into_iter().filter(|a| !a.is_multi_valued())
    }

    pub fn remote() -> impl Iterator<Item = Attribute> {
        Self::ALL.into_iter().filter(|a| a.is_remote())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| CoreError::UnknownAttribute(s.to_string()))
    }
}

/// A normalized attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Values in row order; a single value yields one row
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }
}
