//! Knights, categories, catalogs, and comments.
//!
//! These are the wire types exchanged with the mock data server plus the
//! selection type the controller carries between requests.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label of the selector entry that spans every category.
pub const ALL_LABEL: &str = "All";

/// A knight as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knight {
    pub name: String,
    pub title: String,
}

impl Knight {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

/// The fixed set of catalog groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Historical,
    Legendary,
    Fictional,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [
        Category::Historical,
        Category::Legendary,
        Category::Fictional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Historical => "Historical",
            Category::Legendary => "Legendary",
            Category::Fictional => "Fictional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// What the category selector currently points at.
///
/// Named selections are free-form so that a category the catalog does not
/// know about can still be selected (and simply yields nothing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Category(String),
}

impl Selection {
    /// Parse a selector value. `"All"` is the sentinel, anything else names a group.
    ///
    /// Matching is case-insensitive like [`Category::from_str`]; known
    /// categories come back in their canonical spelling.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case(ALL_LABEL) {
            Selection::All
        } else if let Ok(category) = value.parse::<Category>() {
            Selection::from(category)
        } else {
            Selection::Category(value.to_string())
        }
    }

    /// The value sent as a comment's `category` and used as a catalog key.
    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL_LABEL,
            Selection::Category(name) => name,
        }
    }

    /// Selector entries: `All` followed by the fixed categories.
    pub fn options() -> Vec<Selection> {
        std::iter::once(Selection::All)
            .chain(Category::ALL.into_iter().map(Selection::from))
            .collect()
    }
}

impl From<Category> for Selection {
    fn from(category: Category) -> Self {
        Selection::Category(category.as_str().to_string())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full knight catalog as served by `GET /knights`.
///
/// Group and key order follow the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: IndexMap<String, IndexMap<String, Knight>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a knight under `group`, creating the group if needed.
    pub fn with_knight(mut self, group: impl Into<String>, key: impl Into<String>, knight: Knight) -> Self {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(key.into(), knight);
        self
    }

    /// Add an empty group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.entry(group.into()).or_default();
        self
    }

    pub fn group(&self, name: &str) -> Option<&IndexMap<String, Knight>> {
        self.groups.get(name)
    }

    /// Group names in payload order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of knights across every group.
    pub fn len(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A free-text comment attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub category: String,
    pub comment: String,
}

/// Hand-edited mock databases often use numeric ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// A resolved encyclopedia summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub extract: String,
}
