use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The category of an expense.
///
/// The set is closed. Free-form labels are carried by `Other`, which is written as
/// `Other: <label>` so that stored records never mix conventions.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Bills,
    Entertainment,
    Other(Option<String>),
}

impl Category {
    /// The categories offered when logging an expense, in display order.
    pub const CHOICES: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Bills,
        Category::Entertainment,
        Category::Other(None),
    ];

    /// The name of the category without any `Other` label.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => FOOD_STR,
            Category::Transport => TRANSPORT_STR,
            Category::Bills => BILLS_STR,
            Category::Entertainment => ENTERTAINMENT_STR,
            Category::Other(_) => OTHER_STR,
        }
    }

    /// Position of the category in `CHOICES`, used to order per-category breakdowns.
    pub(crate) fn rank(&self) -> usize {
        match self {
            Category::Food => 0,
            Category::Transport => 1,
            Category::Bills => 2,
            Category::Entertainment => 3,
            Category::Other(_) => 4,
        }
    }
}

/// An error returned when a category string is empty.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EmptyCategory;

impl Display for EmptyCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("category cannot be empty")
    }
}

impl std::error::Error for EmptyCategory {}

impl FromStr for Category {
    type Err = EmptyCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyCategory);
        }

        for choice in &Category::CHOICES[..4] {
            if trimmed.eq_ignore_ascii_case(choice.name()) {
                return Ok(choice.clone());
            }
        }

        if trimmed.eq_ignore_ascii_case(OTHER_STR) {
            return Ok(Category::Other(None));
        }

        // "Other: Gifts", or a free-form label written by an older version.
        let label = match trimmed.split_once(':') {
            Some((head, tail)) if head.trim().eq_ignore_ascii_case(OTHER_STR) => tail.trim(),
            _ => trimmed,
        };
        if label.is_empty() {
            Ok(Category::Other(None))
        } else {
            Ok(Category::Other(Some(label.to_string())))
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Other(Some(label)) => write!(f, "{OTHER_STR}: {label}"),
            _ => f.write_str(self.name()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Category::from_str(&s).map_err(serde::de::Error::custom)
    }
}

const FOOD_STR: &str = "Food";
const TRANSPORT_STR: &str = "Transport";
const BILLS_STR: &str = "Bills";
const ENTERTAINMENT_STR: &str = "Entertainment";
const OTHER_STR: &str = "Other";
