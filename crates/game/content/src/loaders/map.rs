//! Map data loader.
//!
//! Loads terrain only; combatant placement comes from roster files.
//!
//! Two layouts are accepted and may be combined:
//!
//! ```ron
//! (
//!     dimensions: (8, 6),
//!     tiles: [(3, 2, Wall), (4, 4, Chest)],
//! )
//! ```
//!
//! ```ron
//! (
//!     rows: [
//!         "S..#",
//!         "..#P",
//!     ],
//! )
//! ```
//!
//! When `rows` is present it defines the dimensions and `tiles` entries
//! override individual cells; otherwise every cell defaults to `Normal`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Position, TileGrid, TileKind};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files (terrain only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct MapDataRon {
    dimensions: Option<(u32, u32)>,
    rows: Vec<String>,
    tiles: Vec<(i32, i32, TileKind)>,
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<TileGrid> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in map {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<TileGrid> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut grid = if data.rows.is_empty() {
            let (width, height) = data
                .dimensions
                .ok_or_else(|| anyhow::anyhow!("map needs either `rows` or `dimensions`"))?;
            TileGrid::open(width, height)
        } else {
            let grid = TileGrid::parse_ascii(&data.rows)?;
            if let Some((width, height)) = data.dimensions
                && (width, height) != (grid.width(), grid.height())
            {
                anyhow::bail!(
                    "declared dimensions {}x{} disagree with rows {}x{}",
                    width,
                    height,
                    grid.width(),
                    grid.height()
                );
            }
            grid
        };

        for (x, y, kind) in data.tiles {
            let position = Position::new(x, y);
            if !tactics_core::MapOracle::contains(&grid, position) {
                anyhow::bail!("tile override {} lies outside the map", position);
            }
            grid = grid.with_tile(position, kind);
        }

        Ok(grid)
    }
}
