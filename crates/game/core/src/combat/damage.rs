//! Damage calculation.

/// Balance parameters for the damage formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Defense is divided by this (truncating) before it is subtracted.
    pub defense_divisor: i32,
    /// Floor applied to every hit.
    pub minimum: u32,
}

impl DamageParams {
    pub const DEFAULT: Self = Self {
        defense_divisor: 2,
        minimum: 1,
    };
}

impl Default for DamageParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// reduced = attack - defense / defense_divisor   (integer, truncating)
/// damage  = max(reduced, minimum)
/// ```
///
/// With the defaults an attack always deals at least 1 damage, whatever the
/// defense disparity. A non-positive divisor is treated as 1.
pub fn calculate_damage(attack: i32, defense: i32, params: &DamageParams) -> u32 {
    let divisor = params.defense_divisor.max(1);
    let reduced = i64::from(attack) - i64::from(defense / divisor);
    let reduced = u32::try_from(reduced.max(0)).unwrap_or(u32::MAX);
    reduced.max(params.minimum)
}
