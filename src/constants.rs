//! Dungeon generation constants.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

/// Recursion depth for BSP splitting; higher values yield more rooms
pub const BSP_MAX_DEPTH: u32 = 4;
/// Minimum size of a BSP leaf region; an axis shorter than twice this refuses to split
pub const BSP_MIN_LEAF_SIZE: i32 = 8;
/// Minimum room size within a leaf
pub const BSP_MIN_ROOM_SIZE: i32 = 5;
/// Margin between a room and its leaf region's boundary
pub const BSP_ROOM_MARGIN: i32 = 1;
/// Default dungeon width in tiles
pub const DUNGEON_DEFAULT_WIDTH: usize = 30;
/// Default dungeon height in tiles
pub const DUNGEON_DEFAULT_HEIGHT: usize = 20;
