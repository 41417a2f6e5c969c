//! Turn/phase state machine and request gate.
//!
//! [`TurnController`] is the authoritative owner of the session: map, roster
//! and [`TurnState`]. Every mutation goes through it, and every accepted
//! request returns the [`Notification`]s describing what changed.
//!
//! ```text
//! MOVEMENT --begin_targeting--> TARGETING --confirm_target--> BATTLE
//!    ^                              |                           |
//!    +------------cancel------------+<---------resolve----------+
//! ```
//!
//! Moves are only legal in MOVEMENT. The death of the active source or of any
//! targeted combatant forces MOVEMENT and clears targeting.

mod errors;
mod notification;
mod request;

pub use errors::{CommandError, MoveError, ResolveError, TargetError};
pub use notification::Notification;
pub use request::Request;

use std::collections::BTreeSet;

use crate::combat;
use crate::config::RulesConfig;
use crate::env::TileGrid;
use crate::movement::{ReachableSet, reachable_tiles};
use crate::state::{
    ActionKind, Combatant, CombatantId, Phase, Position, Roster, RosterError, Stats, TurnState,
};
use crate::targeting::{range_for, valid_targets};

/// Notifications emitted by an accepted request, in order.
pub type Notifications = Vec<Notification>;

#[derive(Clone, Debug)]
pub struct TurnController {
    grid: TileGrid,
    roster: Roster,
    turn: TurnState,
    targets: BTreeSet<CombatantId>,
    rules: RulesConfig,
}

impl TurnController {
    pub fn new(grid: TileGrid, rules: RulesConfig) -> Self {
        Self::with_roster(grid, Roster::new(), rules)
    }

    /// Starts a match with a pre-populated roster. Dead entries are dropped.
    pub fn with_roster(grid: TileGrid, roster: Roster, rules: RulesConfig) -> Self {
        let roster = roster.living().cloned().collect();
        Self {
            grid,
            roster,
            turn: TurnState::new(),
            targets: BTreeSet::new(),
            rules,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Valid targets cached when targeting began.
    pub fn cached_targets(&self) -> &BTreeSet<CombatantId> {
        &self.targets
    }

    /// Tiles `id` could move to right now, ignoring occupancy.
    pub fn reachable_for(&self, id: CombatantId) -> Option<ReachableSet> {
        let combatant = self.roster.get(id)?;
        Some(reachable_tiles(
            &self.grid,
            combatant.position,
            combatant.stats().movement,
        ))
    }

    /// Dispatches a request to the matching operation.
    pub fn execute(&mut self, request: Request) -> Result<Notifications, CommandError> {
        match request {
            Request::Spawn { combatant } => self.spawn(combatant).map_err(Into::into),
            Request::BeginTargeting { source, action } => {
                self.begin_targeting(source, action).map_err(Into::into)
            }
            Request::ConfirmTarget { target } => self.confirm_target(target).map_err(Into::into),
            Request::Cancel => Ok(self.cancel()),
            Request::Resolve => self.resolve().map_err(Into::into),
            Request::RequestMove {
                combatant,
                destination,
            } => self.request_move(combatant, destination).map_err(Into::into),
            Request::SetPosition {
                combatant,
                position,
            } => self
                .set_combatant_position(combatant, position)
                .map_err(Into::into),
            Request::SetStats { combatant, stats } => self
                .set_combatant_stats(combatant, stats)
                .map_err(Into::into),
            Request::Heal { combatant, amount } => self.heal(combatant, amount).map_err(Into::into),
            Request::Reset => Ok(self.reset()),
        }
    }

    /// Match start: back to MOVEMENT with no source, action or targets.
    pub fn reset(&mut self) -> Notifications {
        let mut notifications = Vec::new();
        self.clear_targeting(&mut notifications);
        notifications
    }

    pub fn spawn(&mut self, combatant: Combatant) -> Result<Notifications, RosterError> {
        if !combatant.is_alive() {
            return Err(RosterError::Dead(combatant.id));
        }
        let id = combatant.id;
        let position = combatant.position;
        self.roster.insert(combatant)?;
        self.refresh_targets();
        Ok(vec![Notification::CombatantSpawned { id, position }])
    }

    pub fn begin_targeting(
        &mut self,
        source: CombatantId,
        action: ActionKind,
    ) -> Result<Notifications, TargetError> {
        if self.turn.phase != Phase::Movement {
            return Err(TargetError::WrongPhase {
                phase: self.turn.phase,
            });
        }
        let combatant = self
            .roster
            .get(source)
            .ok_or(TargetError::UnknownSource(source))?;
        if !combatant.is_alive() {
            return Err(TargetError::SourceDead(source));
        }
        let range =
            range_for(combatant.stats(), action).ok_or(TargetError::NotTargetable(action))?;

        self.targets = valid_targets(combatant, &self.roster, range, self.rules.distance_metric);
        self.turn = TurnState {
            phase: Phase::Targeting,
            active_source: Some(source),
            active_action: Some(action),
            target: None,
        };
        Ok(vec![Notification::PhaseChanged {
            phase: Phase::Targeting,
        }])
    }

    /// Always legal. A no-op in MOVEMENT.
    pub fn cancel(&mut self) -> Notifications {
        let mut notifications = Vec::new();
        self.clear_targeting(&mut notifications);
        notifications
    }

    pub fn confirm_target(&mut self, target: CombatantId) -> Result<Notifications, TargetError> {
        if self.turn.phase != Phase::Targeting {
            return Err(TargetError::WrongPhase {
                phase: self.turn.phase,
            });
        }
        if !self.targets.contains(&target) {
            return Err(TargetError::InvalidTarget(target));
        }

        self.turn.phase = Phase::Battle;
        self.turn.target = Some(target);
        Ok(vec![Notification::PhaseChanged {
            phase: Phase::Battle,
        }])
    }

    /// Runs the confirmed action and returns to MOVEMENT whatever the outcome.
    pub fn resolve(&mut self) -> Result<Notifications, ResolveError> {
        if self.turn.phase != Phase::Battle {
            return Err(ResolveError::WrongPhase {
                phase: self.turn.phase,
            });
        }

        let mut notifications = Vec::new();
        let attacker = self
            .turn
            .active_source
            .and_then(|id| self.roster.get(id))
            .filter(|combatant| combatant.is_alive())
            .cloned();
        let Some(attacker) = attacker else {
            let id = self.turn.active_source;
            self.clear_targeting(&mut notifications);
            return Err(ResolveError::StaleReference { id });
        };
        let defender = self
            .turn
            .target
            .and_then(|id| self.roster.get_mut(id))
            .filter(|combatant| combatant.is_alive());
        let Some(defender) = defender else {
            let id = self.turn.target;
            self.clear_targeting(&mut notifications);
            return Err(ResolveError::StaleReference { id });
        };

        let result = combat::resolve_attack(&attacker, defender, &self.rules.damage);
        notifications.push(Notification::DamageApplied {
            defender: result.defender,
            amount: result.amount_dealt,
            died: result.defender_died,
        });
        if result.defender_died {
            self.remove_dead(result.defender, &mut notifications);
        }
        self.clear_targeting(&mut notifications);
        Ok(notifications)
    }

    pub fn request_move(
        &mut self,
        id: CombatantId,
        destination: Position,
    ) -> Result<Notifications, MoveError> {
        if self.turn.phase != Phase::Movement {
            return Err(MoveError::WrongPhase {
                phase: self.turn.phase,
            });
        }
        let combatant = self.roster.get(id).ok_or(MoveError::UnknownCombatant(id))?;
        if !combatant.is_alive() {
            return Err(MoveError::Dead(id));
        }

        let origin = combatant.position;
        if destination == origin {
            return Ok(Vec::new());
        }

        let reach = reachable_tiles(&self.grid, origin, combatant.stats().movement);
        if !reach.contains(destination) {
            return Err(MoveError::Unreachable {
                origin,
                destination,
            });
        }
        if let Some(occupant) = self.roster.occupant_at(destination) {
            return Err(MoveError::Occupied {
                origin,
                destination,
                by: occupant.id,
            });
        }

        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(MoveError::UnknownCombatant(id))?;
        combatant.move_to(destination);
        Ok(vec![Notification::CombatantMoved {
            id,
            position: destination,
        }])
    }

    /// Authoritative position write from an external source. No legality checks.
    pub fn set_combatant_position(
        &mut self,
        id: CombatantId,
        position: Position,
    ) -> Result<Notifications, RosterError> {
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(RosterError::UnknownCombatant(id))?;
        combatant.move_to(position);
        self.refresh_targets();
        Ok(vec![Notification::CombatantMoved { id, position }])
    }

    /// Authoritative stats write from an external source. Zero hp kills.
    pub fn set_combatant_stats(
        &mut self,
        id: CombatantId,
        stats: Stats,
    ) -> Result<Notifications, RosterError> {
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(RosterError::UnknownCombatant(id))?;
        let died = combatant.replace_stats(stats);
        let mut notifications = vec![Notification::StatsChanged {
            id,
            stats: *combatant.stats(),
        }];

        if died {
            self.remove_dead(id, &mut notifications);
        } else {
            self.refresh_targets();
        }
        Ok(notifications)
    }

    /// Out-of-combat healing; not gated by phase.
    pub fn heal(&mut self, id: CombatantId, amount: u32) -> Result<Notifications, RosterError> {
        let combatant = self
            .roster
            .get_mut(id)
            .ok_or(RosterError::UnknownCombatant(id))?;
        if combatant.heal(amount) == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![Notification::StatsChanged {
            id,
            stats: *combatant.stats(),
        }])
    }

    fn remove_dead(&mut self, id: CombatantId, notifications: &mut Notifications) {
        if self.roster.remove(id).is_some() {
            notifications.push(Notification::CombatantRemoved { id });
        }
        if self.turn.involves(id) || self.targets.contains(&id) {
            self.clear_targeting(notifications);
        }
    }

    fn clear_targeting(&mut self, notifications: &mut Notifications) {
        let previous = self.turn.phase;
        self.turn = TurnState::new();
        self.targets.clear();
        if previous != Phase::Movement {
            notifications.push(Notification::PhaseChanged {
                phase: Phase::Movement,
            });
        }
    }

    /// Re-evaluates the cached target set after an external write while
    /// TARGETING is open.
    fn refresh_targets(&mut self) {
        if self.turn.phase != Phase::Targeting {
            return;
        }
        let (Some(source), Some(action)) = (self.turn.active_source, self.turn.active_action)
        else {
            return;
        };
        let Some(combatant) = self.roster.get(source) else {
            return;
        };
        if let Some(range) = range_for(combatant.stats(), action) {
            self.targets =
                valid_targets(combatant, &self.roster, range, self.rules.distance_metric);
        }
    }
}
