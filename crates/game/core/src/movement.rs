//! Reachable-tile computation.
//!
//! Movement range is a Manhattan diamond around the origin, carved by walls:
//! a tile counts only if a breadth-first walk through walkable tiles, never
//! leaving the diamond, can discover it.

use std::collections::{HashSet, VecDeque};

use crate::env::MapOracle;
use crate::state::Position;

/// Tiles a combatant may end its move on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReachableSet {
    tiles: HashSet<Position>,
}

impl ReachableSet {
    pub fn contains(&self, position: Position) -> bool {
        self.tiles.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().copied()
    }

    /// Positions sorted row by row, for stable display and comparisons.
    pub fn sorted(&self) -> Vec<Position> {
        let mut tiles: Vec<Position> = self.iter().collect();
        tiles.sort_by_key(|position| (position.y, position.x));
        tiles
    }
}

impl IntoIterator for ReachableSet {
    type Item = Position;
    type IntoIter = std::collections::hash_set::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.into_iter()
    }
}

/// Breadth-first search bounded by Manhattan distance from `origin`.
///
/// The origin is always part of the result, even when it is not walkable.
/// A neighbour is admitted when it is walkable and within `budget`; it is
/// expanded only while strictly inside the budget.
pub fn reachable_tiles<M>(map: &M, origin: Position, budget: u32) -> ReachableSet
where
    M: MapOracle + ?Sized,
{
    let mut tiles = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if tiles.contains(&neighbor) || !map.is_walkable(neighbor) {
                continue;
            }

            let distance = origin.manhattan(neighbor);
            if distance > budget {
                continue;
            }

            tiles.insert(neighbor);
            if distance < budget {
                queue.push_back(neighbor);
            }
        }
    }

    ReachableSet { tiles }
}
