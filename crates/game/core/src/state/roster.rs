use std::collections::HashMap;

use super::{Combatant, CombatantId, Position};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    #[error("combatant {0} is already in the roster")]
    DuplicateId(CombatantId),

    #[error("combatant {0} is dead and cannot join the roster")]
    Dead(CombatantId),

    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::DuplicateId(_) => "ROSTER_DUPLICATE_ID",
            RosterError::Dead(_) => "ROSTER_DEAD",
            RosterError::UnknownCombatant(_) => "ROSTER_UNKNOWN_COMBATANT",
        }
    }
}

/// Live combatants in the current encounter, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: HashMap<CombatantId, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, combatant: Combatant) -> Result<(), RosterError> {
        if self.combatants.contains_key(&combatant.id) {
            return Err(RosterError::DuplicateId(combatant.id));
        }
        self.combatants.insert(combatant.id, combatant);
        Ok(())
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        self.combatants.remove(&id)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.iter().filter(|combatant| combatant.is_alive())
    }

    /// Living combatant standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<&Combatant> {
        self.living().find(|combatant| combatant.position == position)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Combatant> {
        self.iter()
            .find(|combatant| combatant.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl FromIterator<Combatant> for Roster {
    /// Later entries with a duplicate id replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        Self {
            combatants: iter
                .into_iter()
                .map(|combatant| (combatant.id, combatant))
                .collect(),
        }
    }
}
