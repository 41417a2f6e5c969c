//! Built-in demo arena used when no content files are configured.

use crate::loaders::{Encounter, LoadResult};

/// 12x8 arena with a broken wall line, a chest and a portal.
pub const DEMO_MAP: &str = r#"(
    rows: [
        "S...........",
        "............",
        "...#..#.....",
        "...#..#..C..",
        "...#........",
        "......#.....",
        ".R..........",
        "...........P",
    ],
)"#;

pub const DEMO_ROSTER: &str = r#"#![enable(implicit_some)]
[
    (name: "Player", owner: "player1", faction: Player, position: (x: 1, y: 1)),
    (name: "Ranger", owner: "player1", faction: Player, position: (x: 2, y: 3), stats: (attack: 8, attack_range: 4)),
    (name: "Grunt", faction: Enemy, position: (x: 8, y: 2)),
    (name: "Brute", faction: Enemy, position: (x: 9, y: 5), stats: (hp: 140, max_hp: 140, attack: 14, defense: 8, movement: 2)),
]"#;

pub const DEMO_RULES: &str = "";

/// Parses the built-in arena.
pub fn demo_encounter() -> LoadResult<Encounter> {
    Encounter::from_paths(None, None, None)
}
