use std::fs;

use tactics_content::{ContentFactory, Encounter, MapLoader, RosterLoader};
use tactics_core::{
    ActionKind, Combatant, DistanceMetric, Faction, MapOracle, Phase, Position, Request,
    RulesConfig, Stats, TileGrid, TileKind, TurnController,
};

const MAP: &str = r#"(
    dimensions: (6, 4),
    tiles: [(2, 0, Wall), (2, 1, Wall), (2, 2, Wall), (5, 3, Spawn)],
)"#;

const ROSTER: &str = r#"#![enable(implicit_some)]
[
    (name: "Knight", owner: "player1", faction: Player, position: (x: 0, y: 0)),
    (name: "Archer", faction: Enemy, position: (x: 4, y: 0), stats: (attack_range: 5)),
]"#;

const RULES: &str = r#"
distance_metric = "euclidean"

[default_stats]
movement = 2
"#;

#[test]
fn map_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.ron");
    fs::write(&path, MAP).unwrap();

    let grid = MapLoader::load(&path).unwrap();
    assert_eq!((grid.width(), grid.height()), (6, 4));
    assert!(!grid.is_walkable(Position::new(2, 1)));
    assert!(grid.is_walkable(Position::new(2, 3)));
    assert_eq!(grid.kind_at(Position::new(5, 3)), Some(TileKind::Spawn));
}

#[test]
fn roster_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.ron");
    fs::write(&path, ROSTER).unwrap();

    let units = RosterLoader::load(&path).unwrap();
    let roster = RosterLoader::build(&units, Stats::DEFAULT).unwrap();
    assert_eq!(roster.len(), 2);
    let archer = roster.find_by_name("Archer").unwrap();
    assert_eq!(archer.faction, Faction::Enemy);
    assert_eq!(archer.stats().attack_range, 5);
}

#[test]
fn parse_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, "(dimensions: oops)").unwrap();

    let err = MapLoader::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.ron"));
}

#[test]
fn factory_assembles_a_playable_encounter() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("maps")).unwrap();
    fs::create_dir_all(dir.path().join("rosters")).unwrap();
    fs::write(dir.path().join("maps/keep.ron"), MAP).unwrap();
    fs::write(dir.path().join("rosters/keep.ron"), ROSTER).unwrap();
    fs::write(dir.path().join("rules.toml"), RULES).unwrap();

    let encounter = ContentFactory::new(dir.path())
        .load_encounter("keep")
        .unwrap();
    assert_eq!(encounter.rules.distance_metric, DistanceMetric::Euclidean);

    let mut controller = encounter.into_controller().unwrap();
    let knight = controller.roster().find_by_name("knight").unwrap().id;
    let archer = controller.roster().find_by_name("archer").unwrap().id;

    // Movement default comes from rules.toml.
    assert_eq!(controller.roster().get(knight).unwrap().stats().movement, 2);

    // Archer at (4,0) reaches the knight at (0,0) with range 5.
    controller.begin_targeting(archer, ActionKind::Attack).unwrap();
    assert!(controller.cached_targets().contains(&knight));
    controller.confirm_target(knight).unwrap();
    assert_eq!(controller.phase(), Phase::Battle);
}

#[test]
fn factory_rules_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    let rules = ContentFactory::new(dir.path()).load_rules().unwrap();
    assert_eq!(rules.distance_metric, DistanceMetric::Manhattan);
}

#[test]
fn encounter_mixes_files_and_builtin_parts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    fs::write(&path, RULES).unwrap();

    let encounter = Encounter::from_paths(None, None, Some(&path)).unwrap();
    assert_eq!(encounter.rules.default_stats.movement, 2);
    assert_eq!(encounter.grid.width(), 12);
}

#[test]
fn decoded_combatants_keep_health_invariants() {
    let fallen: Combatant = ron::from_str(
        r#"(
            id: "00000000-0000-0000-0000-000000000001",
            name: "Ghost",
            faction: Enemy,
            position: (x: 1, y: 1),
            stats: (hp: 0),
            alive: true,
        )"#,
    )
    .unwrap();
    assert!(!fallen.is_alive());

    let bloated: Combatant = ron::from_str(
        r#"(
            id: "00000000-0000-0000-0000-000000000002",
            name: "Bloated",
            faction: Player,
            position: (x: 2, y: 2),
            stats: (hp: 500, max_hp: 100),
        )"#,
    )
    .unwrap();
    assert_eq!(bloated.stats().hp, 100);
    assert!(bloated.is_alive());
    assert_eq!(bloated.owner, "");

    let mut controller = TurnController::new(TileGrid::open(4, 4), RulesConfig::default());
    controller
        .execute(Request::Spawn { combatant: fallen })
        .unwrap_err();
    controller
        .execute(Request::Spawn { combatant: bloated })
        .unwrap();
    assert_eq!(controller.roster().len(), 1);
}

#[test]
fn decoded_grids_must_match_their_dimensions() {
    let grid: TileGrid =
        ron::from_str("(dimensions: (width: 2, height: 1), tiles: [Normal, Wall])").unwrap();
    assert!(!grid.is_walkable(Position::new(1, 0)));

    let short = ron::from_str::<TileGrid>("(dimensions: (width: 3, height: 3), tiles: [Normal])");
    assert!(short.is_err());
}
