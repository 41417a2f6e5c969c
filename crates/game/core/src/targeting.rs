//! Target selection for attacks and abilities.
//!
//! Ranges are pure radii: there is no line-of-sight check. Evaluation is
//! side-effect free so a driver may call it on every pointer move.

use std::collections::BTreeSet;

use strum::Display;

use crate::state::{ActionKind, Combatant, CombatantId, Position, Roster, Stats};

/// Distance rule used for range checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// Taxicab distance, consistent with movement.
    #[default]
    Manhattan,
    /// Straight-line distance in tile units.
    Euclidean,
}

impl DistanceMetric {
    pub fn within(self, from: Position, to: Position, range: u32) -> bool {
        match self {
            DistanceMetric::Manhattan => from.manhattan(to) <= range,
            DistanceMetric::Euclidean => {
                let range = u64::from(range);
                from.euclidean_squared(to) <= range * range
            }
        }
    }
}

/// Range granted by `stats` for a targeted action. `Move` has none.
pub fn range_for(stats: &Stats, action: ActionKind) -> Option<u32> {
    match action {
        ActionKind::Attack => Some(stats.attack_range),
        ActionKind::Ability => Some(stats.ability_range),
        ActionKind::Move => None,
    }
}

/// Ids of every other living combatant within `range` of `source`.
pub fn valid_targets(
    source: &Combatant,
    candidates: &Roster,
    range: u32,
    metric: DistanceMetric,
) -> BTreeSet<CombatantId> {
    candidates
        .living()
        .filter(|candidate| candidate.id != source.id)
        .filter(|candidate| metric.within(source.position, candidate.position, range))
        .map(|candidate| candidate.id)
        .collect()
}
