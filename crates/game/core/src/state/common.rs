use std::fmt;

use uuid::Uuid;

/// Unique identifier for a combatant tracked in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds a deterministic identifier, handy for fixtures and replays.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable.
        let simple = self.0.simple().to_string();
        write!(f, "#{}", &simple[..8])
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance, the metric movement and default targeting use.
    ///
    /// Saturates at `u32::MAX` for positions at opposite ends of the `i32` range.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Squared straight-line distance. Kept squared so comparisons stay integral.
    pub fn euclidean_squared(self, other: Position) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        (dx * dx).saturating_add(dy * dy)
    }

    /// The cardinal neighbours in west, east, north (-y), south (+y) order.
    ///
    /// Neighbours that would fall outside the `i32` range are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let Self { x, y } = self;
        [
            x.checked_sub(1).map(|x| Position::new(x, y)),
            x.checked_add(1).map(|x| Position::new(x, y)),
            y.checked_sub(1).map(|y| Position::new(x, y)),
            y.checked_add(1).map(|y| Position::new(x, y)),
        ]
        .into_iter()
        .flatten()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
