use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::DungeonError;
use crate::grid::Grid;
use crate::tile::TileType;

/// A rectangle representing a room or region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A node in the BSP arena. Either a leaf (owns a room once carving has
/// run) or an internal node with exactly two children, addressed by
/// arena index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BspNode {
    /// The region this node covers
    pub region: Rect,
    /// The room carved in this region (leaves only, after carving)
    pub room: Option<Rect>,
    /// Arena indices of the two children after a split
    pub children: Option<(usize, usize)>,
}

impl BspNode {
    fn new(region: Rect) -> Self {
        Self {
            region,
            room: None,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// BSP tree stored as an arena of nodes; index [`BspTree::ROOT`] is the
/// root. The tree is transient scaffolding: built, used to carve a
/// [`Grid`], then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    pub const ROOT: usize = 0;

    /// Recursively partition a `width` x `height` region. Fails fast on
    /// zero dimensions rather than producing a degenerate tree.
    pub fn build(
        width: usize,
        height: usize,
        max_depth: u32,
        min_leaf_size: i32,
        rng: &mut impl Rng,
    ) -> Result<Self, DungeonError> {
        if width == 0 || height == 0 {
            return Err(DungeonError::InvalidDimensions { width, height });
        }

        let root = Rect::new(0, 0, width as i32, height as i32);
        let mut tree = Self {
            nodes: vec![BspNode::new(root)],
        };
        tree.split(Self::ROOT, max_depth, min_leaf_size, rng);
        tracing::debug!(nodes = tree.len(), "bsp tree built");
        Ok(tree)
    }

    pub fn node(&self, idx: usize) -> &BspNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Split the node at `idx`, then recurse into both children with one
    /// less level of depth budget. A node whose chosen axis is shorter
    /// than twice `min_leaf` refuses the split and stays a leaf.
    fn split(&mut self, idx: usize, depth: u32, min_leaf: i32, rng: &mut impl Rng) {
        if depth == 0 {
            return;
        }

        let region = self.nodes[idx].region;

        // Much wider than tall forces an x-cut and vice versa
        // (threshold 1.5), so slivers don't survive to room placement.
        let split_vertical = if region.width * 2 > region.height * 3 {
            true
        } else if region.height * 2 > region.width * 3 {
            false
        } else {
            rng.gen_bool(0.5)
        };

        if split_vertical {
            if region.width < min_leaf * 2 {
                return;
            }
            let cut = rng.gen_range(min_leaf..=region.width - min_leaf);
            let left = Rect::new(region.x, region.y, cut, region.height);
            let right = Rect::new(region.x + cut, region.y, region.width - cut, region.height);
            self.attach_children(idx, left, right, depth, min_leaf, rng);
        } else {
            if region.height < min_leaf * 2 {
                return;
            }
            let cut = rng.gen_range(min_leaf..=region.height - min_leaf);
            let top = Rect::new(region.x, region.y, region.width, cut);
            let bottom = Rect::new(region.x, region.y + cut, region.width, region.height - cut);
            self.attach_children(idx, top, bottom, depth, min_leaf, rng);
        }
    }

    fn attach_children(
        &mut self,
        idx: usize,
        first: Rect,
        second: Rect,
        depth: u32,
        min_leaf: i32,
        rng: &mut impl Rng,
    ) {
        let left = self.nodes.len();
        self.nodes.push(BspNode::new(first));
        self.nodes.push(BspNode::new(second));
        self.nodes[idx].children = Some((left, left + 1));
        self.split(left, depth - 1, min_leaf, rng);
        self.split(left + 1, depth - 1, min_leaf, rng);
    }

    /// Corridor endpoint for the subtree at `idx`: the center of its
    /// left-most carved room, falling back to the region's own center
    /// if the subtree has no room yet.
    fn representative(&self, idx: usize) -> (i32, i32) {
        if let Some(room) = self.nodes[idx].room {
            return room.center();
        }
        if let Some((left, right)) = self.nodes[idx].children {
            if self.subtree_has_room(left) {
                return self.representative(left);
            }
            if self.subtree_has_room(right) {
                return self.representative(right);
            }
        }
        self.nodes[idx].region.center()
    }

    fn subtree_has_room(&self, idx: usize) -> bool {
        if self.nodes[idx].room.is_some() {
            return true;
        }
        match self.nodes[idx].children {
            Some((left, right)) => self.subtree_has_room(left) || self.subtree_has_room(right),
            None => false,
        }
    }
}

/// Carve rooms and corridors for `tree` into `grid`, mutating both in
/// place (rooms are recorded on their leaves). Returns the placed rooms
/// in carve order.
///
/// Carving is post-order: both children of an internal node are fully
/// carved before the corridor connecting them, so corridor endpoints
/// are always the centers of already-carved rooms.
pub fn carve(tree: &mut BspTree, grid: &mut Grid, rng: &mut impl Rng) -> Vec<Rect> {
    let mut rooms = Vec::new();
    carve_node(tree, BspTree::ROOT, grid, rng, &mut rooms);
    rooms
}

fn carve_node(
    tree: &mut BspTree,
    idx: usize,
    grid: &mut Grid,
    rng: &mut impl Rng,
    rooms: &mut Vec<Rect>,
) {
    let children = tree.node(idx).children;
    match children {
        Some((left, right)) => {
            carve_node(tree, left, grid, rng, rooms);
            carve_node(tree, right, grid, rng, rooms);
            let from = tree.representative(left);
            let to = tree.representative(right);
            carve_corridor(grid, from, to, rng);
        }
        None => {
            let room = place_room(tree.node(idx).region, rng);
            carve_room(grid, &room);
            tree.nodes[idx].room = Some(room);
            rooms.push(room);
        }
    }
}

/// Choose a room rectangle inside `region`, keeping the configured
/// margin and minimum size where the region allows it. Regions too
/// small for both clamp to the largest room that fits.
fn place_room(region: Rect, rng: &mut impl Rng) -> Rect {
    let max_w = (region.width - 2 * BSP_ROOM_MARGIN).max(1).min(region.width);
    let max_h = (region.height - 2 * BSP_ROOM_MARGIN).max(1).min(region.height);
    let min_w = BSP_MIN_ROOM_SIZE.min(max_w);
    let min_h = BSP_MIN_ROOM_SIZE.min(max_h);

    let room_w = rng.gen_range(min_w..=max_w);
    let room_h = rng.gen_range(min_h..=max_h);

    // Random offset inside the region, margin honored on both sides
    // whenever the slack allows it.
    let x_slack = region.width - room_w;
    let y_slack = region.height - room_h;
    let x_lo = BSP_ROOM_MARGIN.min(x_slack);
    let x_hi = (x_slack - BSP_ROOM_MARGIN).max(x_lo);
    let y_lo = BSP_ROOM_MARGIN.min(y_slack);
    let y_hi = (y_slack - BSP_ROOM_MARGIN).max(y_lo);

    let room_x = region.x + rng.gen_range(x_lo..=x_hi);
    let room_y = region.y + rng.gen_range(y_lo..=y_hi);
    Rect::new(room_x, room_y, room_w, room_h)
}

fn carve_room(grid: &mut Grid, room: &Rect) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            grid.set(x, y, TileType::Floor);
        }
    }
}

/// Connect two points with an L-shaped corridor, randomly choosing
/// whether the horizontal or vertical segment comes first.
fn carve_corridor(grid: &mut Grid, from: (i32, i32), to: (i32, i32), rng: &mut impl Rng) {
    let (x1, y1) = from;
    let (x2, y2) = to;

    if rng.gen_bool(0.5) {
        carve_h_corridor(grid, x1, x2, y1);
        carve_v_corridor(grid, y1, y2, x2);
    } else {
        carve_v_corridor(grid, y1, y2, x1);
        carve_h_corridor(grid, x1, x2, y2);
    }
}

fn carve_h_corridor(grid: &mut Grid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.set(x, y, TileType::Floor);
    }
}

fn carve_v_corridor(grid: &mut Grid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.set(x, y, TileType::Floor);
    }
}

pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Generate a dungeon floor: build the BSP tree over an all-wall
    /// grid, carve rooms and corridors, and return the grid with its
    /// room list. The tree itself is discarded.
    pub fn generate(
        width: usize,
        height: usize,
        rng: &mut impl Rng,
    ) -> Result<Grid, DungeonError> {
        let mut tree = BspTree::build(width, height, BSP_MAX_DEPTH, BSP_MIN_LEAF_SIZE, rng)?;
        let mut grid = Grid::new(width, height);
        let rooms = carve(&mut tree, &mut grid, rng);
        tracing::debug!(
            width,
            height,
            rooms = rooms.len(),
            "dungeon floor generated"
        );
        grid.rooms = rooms;
        Ok(grid)
    }
}
