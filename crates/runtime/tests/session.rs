use runtime::{Runtime, RuntimeConfig, RuntimeError, Topic};
use tactics_core::{
    ActionKind, Combatant, CombatantId, CommandError, ErrorSeverity, MoveError, Notification,
    Phase, Position, RulesConfig, Stats, TileGrid, TurnController,
};

struct Arena {
    runtime: Runtime,
    hero: CombatantId,
    orc: CombatantId,
}

async fn arena() -> Arena {
    let hero = Combatant::player("Hero", "player1", Position::new(1, 1)).with_stats(Stats {
        attack: 15,
        ..Stats::DEFAULT
    });
    let orc = Combatant::enemy("Orc", Position::new(2, 1)).with_stats(Stats {
        hp: 10,
        defense: 10,
        ..Stats::DEFAULT
    });
    let (hero_id, orc_id) = (hero.id, orc.id);
    let controller = TurnController::with_roster(
        TileGrid::open(8, 8),
        [hero, orc].into_iter().collect(),
        RulesConfig::default(),
    );

    let runtime = Runtime::builder()
        .config(RuntimeConfig::default())
        .controller(controller)
        .build()
        .await
        .expect("runtime should build");

    Arena {
        runtime,
        hero: hero_id,
        orc: orc_id,
    }
}

#[tokio::test]
async fn build_requires_a_controller() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingController)));
}

#[tokio::test]
async fn attack_flow_publishes_on_each_topic() {
    let Arena { runtime, hero, orc } = arena().await;
    let handle = runtime.handle();
    let mut phase_rx = handle.subscribe(Topic::Phase);
    let mut combat_rx = handle.subscribe(Topic::Combat);
    let mut roster_rx = handle.subscribe(Topic::Roster);

    handle
        .begin_targeting(hero, ActionKind::Attack)
        .await
        .unwrap();
    handle.confirm_target(orc).await.unwrap();
    let notifications = handle.resolve().await.unwrap();
    assert_eq!(notifications.len(), 3, "{notifications:?}");

    let damage = combat_rx.recv().await.unwrap();
    assert_eq!(
        damage.notification,
        Notification::DamageApplied {
            defender: orc,
            amount: 10,
            died: true
        }
    );
    let removed = roster_rx.recv().await.unwrap();
    assert_eq!(removed.notification, Notification::CombatantRemoved { id: orc });
    assert!(damage.sequence < removed.sequence);

    let phases: Vec<Phase> = [
        phase_rx.recv().await.unwrap(),
        phase_rx.recv().await.unwrap(),
        phase_rx.recv().await.unwrap(),
    ]
    .iter()
    .map(|event| match event.notification {
        Notification::PhaseChanged { phase } => phase,
        other => panic!("unexpected {other:?}"),
    })
    .collect();
    assert_eq!(phases, [Phase::Targeting, Phase::Battle, Phase::Movement]);

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.roster().get(orc).is_none());
    assert_eq!(snapshot.phase(), Phase::Movement);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejections_keep_their_error_and_publish_nothing() {
    let Arena { runtime, hero, .. } = arena().await;
    let handle = runtime.handle();
    let mut roster_rx = handle.subscribe(Topic::Roster);

    let err = handle
        .request_move(hero, Position::new(7, 7))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Command(CommandError::Move(MoveError::Unreachable { .. }))
    ));
    assert_ne!(err.severity(), ErrorSeverity::Internal);
    assert!(roster_rx.try_recv().is_err());

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(
        snapshot.roster().get(hero).unwrap().position,
        Position::new(1, 1)
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn concurrent_moves_are_serialized() {
    let Arena { runtime, hero, orc } = arena().await;
    let handle = runtime.handle();

    // Both race for the same tile; exactly one wins.
    let target = Position::new(1, 2);
    let (first, second) = tokio::join!(
        handle.request_move(hero, target),
        handle.request_move(orc, target)
    );
    assert!(first.is_ok() ^ second.is_ok());

    let snapshot = handle.snapshot().await.unwrap();
    let occupant = snapshot.roster().occupant_at(target).unwrap();
    assert!(occupant.id == hero || occupant.id == orc);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
