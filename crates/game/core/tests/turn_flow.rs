use tactics_core::{
    ActionKind, Combatant, CombatantId, MoveError, Notification, Phase, Position, RulesConfig,
    Stats, TargetError, TileGrid, TurnController, TurnState, reachable_tiles,
};

fn stats(hp: u32, attack: i32, defense: i32) -> Stats {
    Stats {
        hp,
        attack,
        defense,
        ..Stats::DEFAULT
    }
}

struct Duel {
    controller: TurnController,
    hero: CombatantId,
    orc: CombatantId,
}

fn duel(hero_stats: Stats, orc_stats: Stats) -> Duel {
    let hero = Combatant::player("Hero", "player1", Position::new(2, 2)).with_stats(hero_stats);
    let orc = Combatant::enemy("Orc", Position::new(3, 2)).with_stats(orc_stats);
    let (hero_id, orc_id) = (hero.id, orc.id);
    let controller = TurnController::with_roster(
        TileGrid::open(10, 10),
        [hero, orc].into_iter().collect(),
        RulesConfig::default(),
    );
    Duel {
        controller,
        hero: hero_id,
        orc: orc_id,
    }
}

#[test]
fn full_attack_cycle_returns_to_movement() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(stats(100, 15, 5), stats(100, 10, 10));

    assert_eq!(
        controller.begin_targeting(hero, ActionKind::Attack).unwrap(),
        vec![Notification::PhaseChanged {
            phase: Phase::Targeting
        }]
    );
    assert_eq!(controller.turn().active_source, Some(hero));
    assert_eq!(controller.turn().active_action, Some(ActionKind::Attack));

    controller.confirm_target(orc).unwrap();
    assert_eq!(controller.phase(), Phase::Battle);

    let notifications = controller.resolve().unwrap();
    assert_eq!(
        notifications,
        vec![
            Notification::DamageApplied {
                defender: orc,
                amount: 10,
                died: false
            },
            Notification::PhaseChanged {
                phase: Phase::Movement
            },
        ]
    );
    assert_eq!(controller.roster().get(orc).unwrap().stats().hp, 90);
    assert_eq!(*controller.turn(), TurnState::new());
}

#[test]
fn minimum_damage_is_one() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(stats(100, 5, 0), stats(100, 0, 30));

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    controller.confirm_target(orc).unwrap();
    controller.resolve().unwrap();

    assert_eq!(controller.roster().get(orc).unwrap().stats().hp, 99);
}

#[test]
fn lethal_attack_removes_defender_and_clears_targeting() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(stats(100, 50, 0), stats(10, 0, 0));

    controller.begin_targeting(hero, ActionKind::Ability).unwrap();
    controller.confirm_target(orc).unwrap();

    let notifications = controller.resolve().unwrap();
    assert_eq!(
        notifications,
        vec![
            Notification::DamageApplied {
                defender: orc,
                amount: 10,
                died: true
            },
            Notification::CombatantRemoved { id: orc },
            Notification::PhaseChanged {
                phase: Phase::Movement
            },
        ]
    );
    assert!(controller.roster().get(orc).is_none());
    assert_eq!(controller.phase(), Phase::Movement);

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    assert!(controller.cached_targets().is_empty());
}

#[test]
fn confirm_outside_targeting_is_rejected() {
    let Duel {
        mut controller,
        orc,
        ..
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    assert_eq!(
        controller.confirm_target(orc),
        Err(TargetError::WrongPhase {
            phase: Phase::Movement
        })
    );
    assert_eq!(controller.phase(), Phase::Movement);
}

#[test]
fn confirm_with_uncached_target_is_rejected() {
    let hero = Combatant::player("Hero", "player1", Position::new(0, 0));
    let far = Combatant::enemy("Far", Position::new(9, 9));
    let (hero_id, far_id) = (hero.id, far.id);
    let mut controller = TurnController::with_roster(
        TileGrid::open(10, 10),
        [hero, far].into_iter().collect(),
        RulesConfig::default(),
    );

    controller.begin_targeting(hero_id, ActionKind::Attack).unwrap();
    assert_eq!(
        controller.confirm_target(far_id),
        Err(TargetError::InvalidTarget(far_id))
    );
    assert_eq!(
        controller.confirm_target(hero_id),
        Err(TargetError::InvalidTarget(hero_id)),
        "a combatant never targets itself"
    );
    assert_eq!(controller.phase(), Phase::Targeting);
}

#[test]
fn cancel_in_movement_is_a_no_op() {
    let Duel { mut controller, .. } = duel(Stats::DEFAULT, Stats::DEFAULT);
    let before = *controller.turn();

    assert!(controller.cancel().is_empty());
    assert_eq!(*controller.turn(), before);
}

#[test]
fn cancel_from_targeting_clears_everything() {
    let Duel {
        mut controller,
        hero,
        ..
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    assert_eq!(
        controller.cancel(),
        vec![Notification::PhaseChanged {
            phase: Phase::Movement
        }]
    );
    assert_eq!(*controller.turn(), TurnState::new());
    assert!(controller.cached_targets().is_empty());
}

#[test]
fn moves_are_validated_against_reachable_tiles() {
    let Duel {
        mut controller,
        hero,
        ..
    } = duel(Stats::DEFAULT, Stats::DEFAULT);
    let origin = Position::new(2, 2);
    let reach = reachable_tiles(controller.grid(), origin, 3);

    // Every tile outside the reachable set is rejected without moving.
    for destination in [Position::new(9, 9), Position::new(6, 2), Position::new(-1, 2)] {
        assert!(!reach.contains(destination));
        let err = controller.request_move(hero, destination).unwrap_err();
        assert!(matches!(err, MoveError::Unreachable { .. }));
        assert_eq!(controller.roster().get(hero).unwrap().position, origin);
    }

    let destination = Position::new(2, 5);
    assert_eq!(
        controller.request_move(hero, destination).unwrap(),
        vec![Notification::CombatantMoved {
            id: hero,
            position: destination
        }]
    );
    assert_eq!(controller.roster().get(hero).unwrap().position, destination);
}

#[test]
fn moves_are_illegal_outside_movement() {
    let Duel {
        mut controller,
        hero,
        ..
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    assert_eq!(
        controller.request_move(hero, Position::new(2, 3)),
        Err(MoveError::WrongPhase {
            phase: Phase::Targeting
        })
    );
}

#[test]
fn mirror_death_of_source_forces_movement() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    controller.begin_targeting(orc, ActionKind::Attack).unwrap();
    controller.confirm_target(hero).unwrap();

    let notifications = controller
        .set_combatant_stats(orc, stats(0, 10, 5))
        .unwrap();
    assert_eq!(
        notifications[1..],
        [
            Notification::CombatantRemoved { id: orc },
            Notification::PhaseChanged {
                phase: Phase::Movement
            },
        ]
    );
    assert!(controller.roster().get(orc).is_none());
    assert_eq!(*controller.turn(), TurnState::new());
}

#[test]
fn mirror_position_bypasses_movement_rules() {
    let Duel {
        mut controller,
        orc,
        ..
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    let far = Position::new(9, 0);
    controller.set_combatant_position(orc, far).unwrap();
    assert_eq!(controller.roster().get(orc).unwrap().position, far);
}

#[test]
fn mirror_death_of_cached_target_forces_movement() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    assert!(controller.cached_targets().contains(&orc));

    let lethal = stats(0, 10, 5);
    assert_eq!(
        controller.set_combatant_stats(orc, lethal).unwrap(),
        vec![
            Notification::StatsChanged {
                id: orc,
                stats: lethal
            },
            Notification::CombatantRemoved { id: orc },
            Notification::PhaseChanged {
                phase: Phase::Movement
            },
        ]
    );
    assert_eq!(*controller.turn(), TurnState::new());
    assert!(controller.cached_targets().is_empty());
}

#[test]
fn mirror_death_of_confirmed_target_forces_movement() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    controller.confirm_target(orc).unwrap();

    let lethal = stats(0, 10, 5);
    assert_eq!(
        controller.set_combatant_stats(orc, lethal).unwrap(),
        vec![
            Notification::StatsChanged {
                id: orc,
                stats: lethal
            },
            Notification::CombatantRemoved { id: orc },
            Notification::PhaseChanged {
                phase: Phase::Movement
            },
        ]
    );
    assert_eq!(*controller.turn(), TurnState::new());
}

#[test]
fn extreme_positions_are_rejected_not_fatal() {
    let Duel {
        mut controller,
        hero,
        orc,
    } = duel(Stats::DEFAULT, Stats::DEFAULT);

    let edge = Position::new(i32::MAX, 0);
    controller.set_combatant_position(hero, edge).unwrap();
    assert_eq!(controller.reachable_for(hero).unwrap().sorted(), vec![edge]);
    assert!(matches!(
        controller.request_move(hero, Position::ORIGIN),
        Err(MoveError::Unreachable { .. })
    ));

    controller
        .set_combatant_position(orc, Position::new(i32::MIN, 1))
        .unwrap();
    controller.begin_targeting(hero, ActionKind::Attack).unwrap();
    assert!(controller.cached_targets().is_empty());
}
