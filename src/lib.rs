//! BSP dungeon generation and grid pathfinding for a roguelike floor.
//!
//! The crate owns two things: carving a connected tile map out of an
//! all-wall grid (binary space partition with randomized rooms and
//! L-shaped corridors), and finding shortest paths across the result
//! for agent movement. Rendering, input, and combat live with the
//! caller; they only read the [`Grid`] this crate produces.

pub mod constants;
pub mod dungeon_gen;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod tile;

pub use dungeon_gen::{carve, BspNode, BspTree, DungeonGenerator, Rect};
pub use error::{DungeonError, PathError};
pub use grid::Grid;
pub use pathfinding::{find_path, next_step};
pub use tile::TileType;
