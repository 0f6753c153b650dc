use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A turning movement through the intersection, in declared order.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Thru,
    Left,
    Right,
    UTurn,
}

impl Movement {
    /// All movements in declared order. Tie-breaking relies on this order.
    pub const ALL: [Movement; 4] = [Movement::Thru, Movement::Left, Movement::Right, Movement::UTurn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::Thru => "thru",
            Movement::Left => "left",
            Movement::Right => "right",
            Movement::UTurn => "u_turn",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Travel direction of an approach entering the intersection
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Direction {
    Northbound,
    Southbound,
    Eastbound,
    Westbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Northbound => "northbound",
            Direction::Southbound => "southbound",
            Direction::Eastbound => "eastbound",
            Direction::Westbound => "westbound",
        }
    }

    /// Capitalized name as written in signal plans, e.g. "Southbound"
    pub fn title(&self) -> &'static str {
        match self {
            Direction::Northbound => "Northbound",
            Direction::Southbound => "Southbound",
            Direction::Eastbound => "Eastbound",
            Direction::Westbound => "Westbound",
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    /// Accepts the full name in any case or the two-letter abbreviation (`NB`, `sb`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northbound" | "nb" => Ok(Direction::Northbound),
            "southbound" | "sb" => Ok(Direction::Southbound),
            "eastbound" | "eb" => Ok(Direction::Eastbound),
            "westbound" | "wb" => Ok(Direction::Westbound),
            _ => Err(ValidationError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle counts per movement for one approach.
///
/// Counts are hourly volumes. Deserialization goes through [`RawMovementCounts`]
/// so that negative input is rejected with the name of the offending movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMovementCounts")]
pub struct MovementCounts {
    pub thru: u32,
    pub left: u32,
    pub right: u32,
    pub u_turn: u32,
}

/// Unvalidated movement counts as they arrive from configuration or transport
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovementCounts {
    #[serde(default)]
    pub thru: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub right: i64,
    #[serde(default)]
    pub u_turn: i64,
}

impl MovementCounts {
    /// Creates validated counts, failing on the first negative movement
    pub fn new(thru: i64, left: i64, right: i64, u_turn: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            thru: count_field("thru", thru)?,
            left: count_field("left", left)?,
            right: count_field("right", right)?,
            u_turn: count_field("u_turn", u_turn)?,
        })
    }

    pub fn get(&self, movement: Movement) -> u32 {
        match movement {
            Movement::Thru => self.thru,
            Movement::Left => self.left,
            Movement::Right => self.right,
            Movement::UTurn => self.u_turn,
        }
    }

    /// Iterates `(movement, count)` pairs in declared order
    pub fn iter(&self) -> impl Iterator<Item = (Movement, u32)> + '_ {
        Movement::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| count as u64).sum()
    }

    /// Largest single movement count
    pub fn max(&self) -> u32 {
        self.iter().map(|(_, count)| count).max().unwrap_or(0)
    }
}

impl TryFrom<RawMovementCounts> for MovementCounts {
    type Error = ValidationError;

    fn try_from(raw: RawMovementCounts) -> Result<Self, Self::Error> {
        MovementCounts::new(raw.thru, raw.left, raw.right, raw.u_turn)
    }
}

fn count_field(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeCount { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

/// Identity of an approach: street name plus direction.
///
/// The display form is the snake-case slug used in reports, e.g. `driveway_westbound`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ApproachKey {
    pub street_name: String,
    pub direction: Direction,
}

impl ApproachKey {
    pub fn new(street_name: impl Into<String>, direction: Direction) -> Self {
        Self { street_name: street_name.into(), direction }
    }

    pub fn slug(&self) -> String {
        format!("{}_{}", slugify(&self.street_name), self.direction.as_str())
    }

    /// Display name as written in signal plans, e.g. "Mass Ave Southbound"
    pub fn label(&self) -> String {
        format!("{} {}", self.street_name, self.direction.title())
    }
}

impl fmt::Display for ApproachKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Lowercases and collapses every run of non-alphanumeric characters into one `_`
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// One directional traffic leg entering the intersection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approach {
    /// Street name, e.g. "Mass Ave"
    pub name: String,
    /// Direction of travel
    pub direction: Direction,
    /// Hourly vehicle counts per movement
    pub movement_counts: MovementCounts,
}

impl Approach {
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        movement_counts: MovementCounts,
    ) -> Result<Self, ValidationError> {
        let approach = Self { name: name.into(), direction, movement_counts };
        approach.validate()?;
        Ok(approach)
    }

    /// Re-checks invariants on values that were built field by field (e.g. deserialized)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(())
    }

    pub fn key(&self) -> ApproachKey {
        ApproachKey::new(self.name.clone(), self.direction)
    }

    pub fn total_volume(&self) -> u64 {
        self.movement_counts.total()
    }
}
