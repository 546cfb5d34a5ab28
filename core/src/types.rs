//! Shared primitive types used across the entire tree generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year. Birth and death years are whole years.
pub type Year = i32;

/// A stable arena index into the population. Never reused — the
/// population only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PersonId(pub usize);

impl PersonId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A decade, stored as its first year (always a multiple of 10).
///
/// Reference tables key most lookups by the label form ("1950s");
/// life expectancy and the decade query use the integer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Decade(pub Year);

impl Decade {
    /// The decade a year falls in. Rounds toward negative infinity.
    pub fn of(year: Year) -> Self {
        Self(year.div_euclid(10) * 10)
    }

    pub fn year(self) -> Year {
        self.0
    }

    pub fn label(self) -> String {
        format!("{}s", self.0)
    }

    /// Parse the "1950s" label form. Returns None for anything else,
    /// including years that are not a multiple of 10.
    pub fn parse_label(label: &str) -> Option<Self> {
        let year: Year = label.trim().strip_suffix('s')?.parse().ok()?;
        if year.rem_euclid(10) != 0 {
            return None;
        }
        Some(Self(year))
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male   => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
