use strum::{Display, EnumIter};

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Read-only view of the static map layout.
///
/// Queries outside the map never fail: they report "absent", which every
/// caller treats as blocked.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;
    fn kind_at(&self, position: Position) -> Option<TileKind>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.kind_at(position).is_some_and(TileKind::is_walkable)
    }

    fn tile(&self, position: Position) -> Option<Tile> {
        self.kind_at(position).map(|kind| Tile::new(position, kind))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canonical tile classes. Only `Wall` blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Normal,
    Wall,
    Chest,
    Resource,
    Portal,
    Spawn,
}

impl TileKind {
    pub const fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Glyph used by ASCII layouts.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Normal => '.',
            TileKind::Wall => '#',
            TileKind::Chest => 'C',
            TileKind::Resource => 'R',
            TileKind::Portal => 'P',
            TileKind::Spawn => 'S',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TileKind::Normal),
            '#' => Some(TileKind::Wall),
            'C' => Some(TileKind::Chest),
            'R' => Some(TileKind::Resource),
            'P' => Some(TileKind::Portal),
            'S' => Some(TileKind::Spawn),
            _ => None,
        }
    }
}

/// A single cell. Walkability is derived from the kind, never stored apart
/// from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub kind: TileKind,
}

impl Tile {
    pub const fn new(position: Position, kind: TileKind) -> Self {
        Self { position, kind }
    }

    pub const fn walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("expected {expected} tiles for the given dimensions, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("unknown tile glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("ragged layout: row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::SizeMismatch { .. } => "GRID_SIZE_MISMATCH",
            GridError::UnknownGlyph { .. } => "GRID_UNKNOWN_GLYPH",
            GridError::RaggedRow { .. } => "GRID_RAGGED_ROW",
        }
    }
}

/// Immutable tile layout stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TileGridData"))]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// A grid with every tile `Normal`.
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![TileKind::Normal; dimensions.area()],
        }
    }

    pub fn from_tiles(width: u32, height: u32, tiles: Vec<TileKind>) -> Result<Self, GridError> {
        let dimensions = MapDimensions::new(width, height);
        if tiles.len() != dimensions.area() {
            return Err(GridError::SizeMismatch {
                expected: dimensions.area(),
                actual: tiles.len(),
            });
        }
        Ok(Self { dimensions, tiles })
    }

    /// Parses a layout drawn with [`TileKind::glyph`] characters, one string
    /// per row, top row first.
    pub fn parse_ascii<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row_width = row.chars().count();
            if row_width != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    width: row_width,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = TileKind::from_glyph(glyph).ok_or(GridError::UnknownGlyph {
                    glyph,
                    position: Position::new(x as i32, y as i32),
                })?;
                tiles.push(kind);
            }
        }

        Self::from_tiles(width as u32, rows.len() as u32, tiles)
    }

    /// Returns a copy with one tile replaced. Out-of-bounds positions are ignored.
    #[must_use]
    pub fn with_tile(mut self, position: Position, kind: TileKind) -> Self {
        if let Some(index) = self.index(position) {
            self.tiles[index] = kind;
        }
        self
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.dimensions.width.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, &kind)| {
            let position = Position::new((index % width) as i32, (index / width) as i32);
            Tile::new(position, kind)
        })
    }

    /// Renders the layout back into glyph rows.
    pub fn to_ascii(&self) -> Vec<String> {
        let width = self.dimensions.width as usize;
        if width == 0 {
            return Vec::new();
        }
        self.tiles
            .chunks(width)
            .map(|row| row.iter().map(|kind| kind.glyph()).collect())
            .collect()
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TileGridData {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<TileGridData> for TileGrid {
    type Error = GridError;

    fn try_from(data: TileGridData) -> Result<Self, Self::Error> {
        TileGrid::from_tiles(data.dimensions.width, data.dimensions.height, data.tiles)
    }
}

impl MapOracle for TileGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn kind_at(&self, position: Position) -> Option<TileKind> {
        self.index(position).map(|index| self.tiles[index])
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_has_a_distinct_glyph() {
        let mut seen = std::collections::HashSet::new();
        for kind in TileKind::iter() {
            assert_eq!(TileKind::from_glyph(kind.glyph()), Some(kind));
            assert!(seen.insert(kind.glyph()), "{kind} reuses a glyph");
        }
        assert_eq!(TileKind::iter().filter(|kind| !kind.is_walkable()).count(), 1);
    }

    #[test]
    fn out_of_bounds_is_absent_and_blocked() {
        let grid = TileGrid::open(3, 3);
        for position in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(3, 0),
            Position::new(0, 3),
        ] {
            assert_eq!(grid.kind_at(position), None);
            assert!(!grid.is_walkable(position));
        }
    }

    #[test]
    fn only_walls_block() {
        let grid = TileGrid::parse_ascii(&["#.CRPS"]).unwrap();
        let walkable: Vec<bool> = (0..6)
            .map(|x| grid.is_walkable(Position::new(x, 0)))
            .collect();
        assert_eq!(walkable, [false, true, true, true, true, true]);
        assert!(grid.tiles().all(|tile| tile.walkable() == (tile.kind != TileKind::Wall)));
    }

    #[test]
    fn parse_ascii_rejects_unknown_glyph() {
        let err = TileGrid::parse_ascii(&["..", ".x"]).unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownGlyph {
                glyph: 'x',
                position: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn parse_ascii_rejects_ragged_rows() {
        let err = TileGrid::parse_ascii(&["...", ".."]).unwrap_err();
        assert_eq!(err.error_code(), "GRID_RAGGED_ROW");
    }

    #[test]
    fn from_tiles_checks_length() {
        let err = TileGrid::from_tiles(2, 2, vec![TileKind::Normal; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn ascii_layout_survives_rendering() {
        let rows = ["S..#", ".##.", "C..P"];
        let grid = TileGrid::parse_ascii(&rows).unwrap();
        assert_eq!(grid.to_ascii(), rows);
        assert_eq!(grid.kind_at(Position::new(3, 2)), Some(TileKind::Portal));
    }
}
