use strum::Display;

use super::{CombatantId, Position};

/// Side a combatant fights for. Only presentation depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Enemy,
}

/// Combat-relevant numbers for a single combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    /// Movement budget in tiles (Manhattan).
    pub movement: u32,
    pub attack_range: u32,
    pub ability_range: u32,
}

impl Stats {
    pub const DEFAULT: Self = Self {
        hp: 100,
        max_hp: 100,
        attack: 10,
        defense: 5,
        movement: 3,
        attack_range: 2,
        ability_range: 3,
    };

    /// Same stats with `hp` clamped into `0..=max_hp`.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.hp = self.hp.min(self.max_hp);
        self
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial stats merged over a base block. Unset fields keep the base value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsOverride {
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub attack: Option<i32>,
    pub defense: Option<i32>,
    pub movement: Option<u32>,
    pub attack_range: Option<u32>,
    pub ability_range: Option<u32>,
}

impl StatsOverride {
    pub fn apply(&self, base: Stats) -> Stats {
        Stats {
            hp: self.hp.unwrap_or(base.hp),
            max_hp: self.max_hp.unwrap_or(base.max_hp),
            attack: self.attack.unwrap_or(base.attack),
            defense: self.defense.unwrap_or(base.defense),
            movement: self.movement.unwrap_or(base.movement),
            attack_range: self.attack_range.unwrap_or(base.attack_range),
            ability_range: self.ability_range.unwrap_or(base.ability_range),
        }
        .clamped()
    }
}

/// Result of a single `take_damage` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamageTaken {
    /// Hit points actually removed.
    pub dealt: u32,
    /// True only for the call that brought hp to zero.
    pub died: bool,
}

/// A unit on the battlefield.
///
/// Health only changes through [`Combatant::take_damage`], [`Combatant::heal`]
/// and the external-authority [`Combatant::replace_stats`]; `alive` mirrors
/// `hp > 0` and never flips back once false.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CombatantData"))]
pub struct Combatant {
    pub id: CombatantId,
    pub owner: String,
    pub name: String,
    pub faction: Faction,
    stats: Stats,
    pub position: Position,
    alive: bool,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        faction: Faction,
        position: Position,
    ) -> Self {
        Self::spawn(CombatantId::generate(), name, owner, faction, Stats::DEFAULT, position)
    }

    /// Player-controlled unit with default stats.
    pub fn player(name: impl Into<String>, owner: impl Into<String>, position: Position) -> Self {
        Self::new(name, owner, Faction::Player, position)
    }

    /// Unowned enemy unit with default stats.
    pub fn enemy(name: impl Into<String>, position: Position) -> Self {
        Self::new(name, "", Faction::Enemy, position)
    }

    fn spawn(
        id: CombatantId,
        name: impl Into<String>,
        owner: impl Into<String>,
        faction: Faction,
        stats: Stats,
        position: Position,
    ) -> Self {
        let stats = stats.clamped();
        Self {
            id,
            owner: owner.into(),
            name: name.into(),
            faction,
            stats,
            position,
            alive: stats.hp > 0,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: CombatantId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats.clamped();
        self.alive = self.stats.hp > 0;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hp_percent(&self) -> f32 {
        if self.stats.max_hp == 0 {
            return 0.0;
        }
        self.stats.hp as f32 / self.stats.max_hp as f32
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageTaken {
        if !self.alive {
            return DamageTaken::default();
        }
        let before = self.stats.hp;
        self.stats.hp = before.saturating_sub(amount);
        let died = self.stats.hp == 0;
        if died {
            self.alive = false;
        }
        DamageTaken {
            dealt: before - self.stats.hp,
            died,
        }
    }

    /// Restores up to `amount` hp and returns how much was restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let before = self.stats.hp;
        self.stats.hp = before.saturating_add(amount).min(self.stats.max_hp);
        self.stats.hp - before
    }

    /// Unconditional position write. Legality belongs to the turn controller.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Overwrites the stat block with externally authoritative values.
    ///
    /// Returns true when the write killed a living combatant. A dead
    /// combatant keeps `hp == 0` whatever the incoming value.
    pub fn replace_stats(&mut self, stats: Stats) -> bool {
        let mut stats = stats.clamped();
        if !self.alive {
            stats.hp = 0;
            self.stats = stats;
            return false;
        }
        self.stats = stats;
        if stats.hp == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Wire form of a [`Combatant`]. Decoding goes through [`Combatant::spawn`]
/// so hp is clamped and `alive` is derived rather than trusted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CombatantData {
    id: CombatantId,
    #[serde(default)]
    owner: String,
    name: String,
    faction: Faction,
    #[serde(default)]
    stats: Stats,
    position: Position,
}

#[cfg(feature = "serde")]
impl From<CombatantData> for Combatant {
    fn from(data: CombatantData) -> Self {
        Combatant::spawn(
            data.id,
            data.name,
            data.owner,
            data.faction,
            data.stats,
            data.position,
        )
    }
}

/// Packed `0xRRGGBB` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const GREEN: Self = Self(0x00FF00);
    pub const YELLOW: Self = Self(0xFFFF00);
    pub const RED: Self = Self(0xFF0000);
    pub const ENEMY_RED: Self = Self(0xFF4A4A);
}

/// Health-ring colour shown by renderers.
pub fn health_bar_color(faction: Faction, hp_percent: f32) -> Rgb {
    match faction {
        Faction::Enemy => Rgb::ENEMY_RED,
        Faction::Player if hp_percent > 0.6 => Rgb::GREEN,
        Faction::Player if hp_percent > 0.3 => Rgb::YELLOW,
        Faction::Player => Rgb::RED,
    }
}
