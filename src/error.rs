use std::fmt;

/// Errors from dungeon generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonError {
    /// Grid dimensions must both be positive.
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for DungeonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DungeonError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for DungeonError {}

/// Errors from pathfinding queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Start or goal coordinate lies outside the grid.
    OutOfBounds { x: i32, y: i32 },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::OutOfBounds { x, y } => {
                write!(f, "coordinate ({x}, {y}) is outside the grid")
            }
        }
    }
}

impl std::error::Error for PathError {}
