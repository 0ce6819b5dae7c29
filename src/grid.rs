use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dungeon_gen::{DungeonGenerator, Rect};
use crate::error::DungeonError;
use crate::tile::TileType;

/// The tile map for one dungeon floor: a row-major array of tile codes
/// plus the rooms carved during generation (for spawn-point selection).
///
/// The grid is the durable artifact of generation; it lives for the
/// whole floor and is replaced wholesale on a floor transition. After
/// generation it is read-mostly: the only expected writes are explicit
/// single-cell edits by the caller, such as placing stairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileType>,
    pub rooms: Vec<Rect>,
}

impl Grid {
    /// All-wall grid. Carving writes floor into it.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; width * height],
            rooms: Vec::new(),
        }
    }

    /// Generate a dungeon floor with the default BSP parameters.
    /// All randomness comes from `rng`, so a seeded generator
    /// reproduces the exact layout.
    pub fn generate(
        width: usize,
        height: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, DungeonError> {
        DungeonGenerator::generate(width, height, rng)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    /// Single-cell write. Returns false when (x, y) is out of bounds.
    pub fn set(&mut self, x: i32, y: i32, tile: TileType) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.tiles[y as usize * self.width + x as usize] = tile;
        true
    }

    /// Iterate every cell with its coordinate, row by row. Read-only
    /// view for renderers and spawn-point selection.
    pub fn iter_tiles(&self) -> impl Iterator<Item = ((i32, i32), TileType)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &tile)| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            ((x, y), tile)
        })
    }

    /// Pick a uniformly random floor cell, e.g. for spawn or stairs
    /// placement. None when the grid has no floor.
    pub fn random_floor_tile(&self, rng: &mut impl Rng) -> Option<(i32, i32)> {
        let floors: Vec<(i32, i32)> = self
            .iter_tiles()
            .filter(|&(_, tile)| tile == TileType::Floor)
            .map(|(pos, _)| pos)
            .collect();
        if floors.is_empty() {
            return None;
        }
        Some(floors[rng.gen_range(0..floors.len())])
    }
}
