use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::timeout;

use runtime::{Event, MirrorError, MirrorState, Runtime, RuntimeConfig, StateSource, Topic};
use tactics_core::{
    Combatant, CombatantId, Notification, Position, RulesConfig, Stats, TileGrid, TurnController,
};

/// Scriptable source; `None` makes the next fetches fail.
#[derive(Clone, Default)]
struct ScriptedSource {
    states: Arc<Mutex<Option<Vec<MirrorState>>>>,
}

impl ScriptedSource {
    fn set(&self, states: Option<Vec<MirrorState>>) {
        *self.states.lock().unwrap() = states;
    }
}

#[async_trait]
impl StateSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<MirrorState>, MirrorError> {
        self.states
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| MirrorError::Unavailable("scripted outage".into()))
    }
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        mirror_poll_interval: Duration::from_millis(10),
        ..RuntimeConfig::default()
    }
}

async fn next(rx: &mut broadcast::Receiver<Event>) -> Notification {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("mirror should forward within the timeout")
        .expect("event bus open")
        .notification
}

async fn quiet(rx: &mut broadcast::Receiver<Event>) -> bool {
    timeout(Duration::from_millis(80), rx.recv()).await.is_err()
}

fn controller() -> (TurnController, CombatantId) {
    let orc = Combatant::enemy("Orc", Position::new(1, 1));
    let id = orc.id;
    let controller = TurnController::with_roster(
        TileGrid::open(10, 10),
        [orc].into_iter().collect(),
        RulesConfig::default(),
    );
    (controller, id)
}

#[tokio::test]
async fn forwards_only_changed_state() {
    let (controller, orc) = controller();
    let source = ScriptedSource::default();
    let far = Position::new(9, 9);
    source.set(Some(vec![MirrorState {
        id: orc,
        position: far,
        stats: Stats::DEFAULT,
    }]));

    let runtime = Runtime::builder()
        .config(config())
        .controller(controller)
        .state_source(source.clone())
        .build()
        .await
        .unwrap();
    let mut roster_rx = runtime.handle().subscribe(Topic::Roster);

    // First sighting forwards both halves; the far jump ignores movement rules.
    assert_eq!(
        next(&mut roster_rx).await,
        Notification::CombatantMoved {
            id: orc,
            position: far
        }
    );
    assert_eq!(
        next(&mut roster_rx).await,
        Notification::StatsChanged {
            id: orc,
            stats: Stats::DEFAULT
        }
    );
    assert!(quiet(&mut roster_rx).await, "unchanged state is not re-sent");

    // Only the stats changed, so only the stats are written.
    let wounded = Stats {
        hp: 40,
        ..Stats::DEFAULT
    };
    source.set(Some(vec![MirrorState {
        id: orc,
        position: far,
        stats: wounded,
    }]));
    assert_eq!(
        next(&mut roster_rx).await,
        Notification::StatsChanged {
            id: orc,
            stats: wounded
        }
    );
    assert!(quiet(&mut roster_rx).await);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn mirrored_death_removes_the_combatant() {
    let (controller, orc) = controller();
    let source = ScriptedSource::default();
    source.set(Some(vec![MirrorState {
        id: orc,
        position: Position::new(1, 1),
        stats: Stats {
            hp: 0,
            ..Stats::DEFAULT
        },
    }]));

    let runtime = Runtime::builder()
        .config(config())
        .controller(controller)
        .state_source(source)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut roster_rx = handle.subscribe(Topic::Roster);

    loop {
        if let Notification::CombatantRemoved { id } = next(&mut roster_rx).await {
            assert_eq!(id, orc);
            break;
        }
    }
    assert!(handle.snapshot().await.unwrap().roster().is_empty());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn source_outages_do_not_stop_the_mirror() {
    let (controller, orc) = controller();
    let source = ScriptedSource::default();
    source.set(None);

    let runtime = Runtime::builder()
        .config(config())
        .controller(controller)
        .state_source(source.clone())
        .build()
        .await
        .unwrap();
    let mut roster_rx = runtime.handle().subscribe(Topic::Roster);
    assert!(quiet(&mut roster_rx).await);

    source.set(Some(vec![MirrorState {
        id: orc,
        position: Position::new(2, 1),
        stats: Stats::DEFAULT,
    }]));
    assert_eq!(
        next(&mut roster_rx).await,
        Notification::CombatantMoved {
            id: orc,
            position: Position::new(2, 1)
        }
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_combatants_are_skipped() {
    let (controller, orc) = controller();
    let source = ScriptedSource::default();
    source.set(Some(vec![
        MirrorState {
            id: CombatantId::from_u128(99),
            position: Position::new(0, 0),
            stats: Stats::DEFAULT,
        },
        MirrorState {
            id: orc,
            position: Position::new(3, 3),
            stats: Stats::DEFAULT,
        },
    ]));

    let runtime = Runtime::builder()
        .config(config())
        .controller(controller)
        .state_source(source)
        .build()
        .await
        .unwrap();
    let mut roster_rx = runtime.handle().subscribe(Topic::Roster);

    assert_eq!(
        next(&mut roster_rx).await,
        Notification::CombatantMoved {
            id: orc,
            position: Position::new(3, 3)
        }
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn combatants_that_leave_the_source_are_forgotten() {
    let (controller, orc) = controller();
    let source = ScriptedSource::default();
    let state = MirrorState {
        id: orc,
        position: Position::new(4, 4),
        stats: Stats::DEFAULT,
    };
    source.set(Some(vec![state]));

    let runtime = Runtime::builder()
        .config(config())
        .controller(controller)
        .state_source(source.clone())
        .build()
        .await
        .unwrap();
    let mut roster_rx = runtime.handle().subscribe(Topic::Roster);

    assert!(matches!(
        next(&mut roster_rx).await,
        Notification::CombatantMoved { .. }
    ));
    assert!(matches!(
        next(&mut roster_rx).await,
        Notification::StatsChanged { .. }
    ));

    source.set(Some(Vec::new()));
    assert!(quiet(&mut roster_rx).await);

    // A returning combatant counts as a first sighting again.
    source.set(Some(vec![state]));
    assert_eq!(
        next(&mut roster_rx).await,
        Notification::CombatantMoved {
            id: orc,
            position: Position::new(4, 4)
        }
    );

    runtime.shutdown().await.unwrap();
}
