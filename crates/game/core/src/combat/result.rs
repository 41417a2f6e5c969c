//! Attack resolution.

use crate::state::{Combatant, CombatantId};

use super::damage::{DamageParams, calculate_damage};

/// Outcome of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    /// Hit points actually removed (the roll can exceed remaining hp).
    pub amount_dealt: u32,
    pub defender_died: bool,
}

/// Resolves `attacker` hitting `defender` and applies the damage.
///
/// This is the only place combat changes health.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    params: &DamageParams,
) -> DamageResult {
    let damage = calculate_damage(attacker.stats().attack, defender.stats().defense, params);
    let taken = defender.take_damage(damage);

    DamageResult {
        attacker: attacker.id,
        defender: defender.id,
        amount_dealt: taken.dealt,
        defender_died: taken.died,
    }
}
