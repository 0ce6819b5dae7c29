use serde::{Deserialize, Serialize};

/// The three tile codes a grid cell can hold. The generator only writes
/// `Floor` and `Wall`; `Stairs` is placed by the caller on a floor cell
/// of its choosing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    Stairs,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor | TileType::Stairs)
    }
}
