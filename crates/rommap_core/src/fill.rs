//! Paint stamping, flood fill, magic fill, smart-path autotiling and shift.
//!
//! Every function mutates a [`Blockdata`] in place and returns the number of
//! cells written. All fills are iterative with explicit work lists so a
//! pathological grid can never exhaust the call stack, and each completes
//! within a single event-handler invocation.

use std::collections::VecDeque;

use crate::{Block, Blockdata, MetatileSelection};

/// Tile offsets from the top-left cell of the 3x3 smart-path selection, one
/// per marching-squares value (top = 1, right = 2, bottom = 4, left = 8).
///
/// Empirically matched against the reference editor; treat as opaque data.
pub const SMART_PATH_TABLE: [usize; 16] = [
    4, // 0000
    4, // 0001
    4, // 0010
    6, // 0011
    4, // 0100
    4, // 0101
    0, // 0110
    3, // 0111
    4, // 1000
    8, // 1001
    4, // 1010
    7, // 1011
    2, // 1100
    5, // 1101
    1, // 1110
    4, // 1111
];

/// Index of the open (center) tile within a 3x3 smart-path selection
const SMART_PATH_CENTER: usize = 4;

/// Stamp the brush at `(x, y)`, snapped to a block boundary relative to
/// `anchor` (where the gesture started).
///
/// Snapping uses floor division adjusted for negative offsets, so dragging
/// the mouse tiles the brush without gaps or partial overlaps. Brush cells
/// falling outside the grid are clipped.
pub fn paint_normal(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    anchor: (i32, i32),
    selection: &MetatileSelection,
) -> usize {
    let sel_w = selection.width();
    let sel_h = selection.height();

    // Snap the selected position to the top-left of the block boundary.
    let mut x_diff = x - anchor.0;
    let mut y_diff = y - anchor.1;
    if x_diff < 0 && x_diff % sel_w != 0 {
        x_diff -= sel_w;
    }
    if y_diff < 0 && y_diff % sel_h != 0 {
        y_diff -= sel_h;
    }
    let x = anchor.0 + (x_diff / sel_w) * sel_w;
    let y = anchor.1 + (y_diff / sel_h) * sel_h;

    let mut written = 0;
    for i in 0..sel_w {
        for j in 0..sel_h {
            let index = (j * sel_w + i) as usize;
            let Some(cell) = selection.cell(index) else {
                continue;
            };
            if !cell.enabled {
                continue;
            }
            if let Some(mut block) = grid.get(x + i, y + j) {
                block.metatile_id = cell.metatile_id;
                if let Some((collision, elevation)) = selection.collision_at(index) {
                    block.collision = collision;
                    block.elevation = elevation;
                }
                grid.set(x + i, y + j, block);
                written += 1;
            }
        }
    }
    written
}

/// 4-connected flood fill from `(x, y)` with the brush tiled modulo its
/// dimensions around the starting cell.
///
/// Region membership follows each visited cell's pre-write metatile id.
/// Filling a cell that already holds a 1x1 brush's value terminates
/// immediately without visiting the grid.
pub fn flood_fill(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    selection: &MetatileSelection,
) -> usize {
    let Some(start) = grid.get(x, y) else {
        return 0;
    };
    if selection.len() == 1 && selection.metatile_at(0) == Some(start.metatile_id) {
        return 0;
    }

    let width = grid.width();
    let mut visited = vec![false; grid.size()];
    let mut written = 0;

    let mut todo = VecDeque::new();
    todo.push_back((x, y));
    while let Some((cx, cy)) = todo.pop_front() {
        visited[(cy * width + cx) as usize] = true;

        let Some(mut block) = grid.get(cx, cy) else {
            continue;
        };

        let index = brush_index(selection, cx - x, cy - y);
        let Some(tile) = selection.metatile_at(index) else {
            continue;
        };
        let old_tile = block.metatile_id;
        if selection.len() != 1 || old_tile != tile {
            block.metatile_id = tile;
            if let Some((collision, elevation)) = selection.collision_at(index) {
                block.collision = collision;
                block.elevation = elevation;
            }
            grid.set(cx, cy, block);
            written += 1;
        }

        for (nx, ny) in neighbors(cx, cy) {
            if let Some(neighbor) = grid.get(nx, ny) {
                let i = (ny * width + nx) as usize;
                if !visited[i] && neighbor.metatile_id == old_tile {
                    todo.push_back((nx, ny));
                    visited[i] = true;
                }
            }
        }
    }
    written
}

/// Replace every cell in the grid whose metatile id matches the cell at
/// `(x, y)`, tiling the brush modulo its dimensions from the anchor.
///
/// The non-contiguous counterpart of [`flood_fill`]: disjoint regions with
/// the anchor's id change too.
pub fn magic_fill(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    selection: &MetatileSelection,
) -> usize {
    let Some(start) = grid.get(x, y) else {
        return 0;
    };
    let target = start.metatile_id;
    let mut written = 0;
    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            let Some(mut block) = grid.get(cx, cy) else {
                continue;
            };
            if block.metatile_id != target {
                continue;
            }
            let index = brush_index(selection, cx - x, cy - y);
            let Some(tile) = selection.metatile_at(index) else {
                continue;
            };
            block.metatile_id = tile;
            if let Some((collision, elevation)) = selection.collision_at(index) {
                block.collision = collision;
                block.elevation = elevation;
            }
            grid.set(cx, cy, block);
            written += 1;
        }
    }
    written
}

/// Paint one step of a smart path at `(x, y)`.
///
/// Fills a 2x2 area with the selection's center tile, then re-resolves the
/// surrounding ring (corners excluded) against [`SMART_PATH_TABLE`] so
/// edges, corners and junctions connect as the user drags.
pub fn paint_smart_path(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    selection: &MetatileSelection,
) -> usize {
    // Smart path should never be enabled without a 3x3 block selection.
    if !selection.is_smart_path() {
        return 0;
    }
    let open_tile = match selection.metatile_at(SMART_PATH_CENTER) {
        Some(tile) => tile,
        None => return 0,
    };
    let open_collision = selection.collision_at(SMART_PATH_CENTER);

    let mut written = 0;

    // Fill the region with the open tile.
    for i in 0..=1 {
        for j in 0..=1 {
            if let Some(mut block) = grid.get(x + i, y + j) {
                block.metatile_id = open_tile;
                if let Some((collision, elevation)) = open_collision {
                    block.collision = collision;
                    block.elevation = elevation;
                }
                grid.set(x + i, y + j, block);
                written += 1;
            }
        }
    }

    // Go back and resolve the edge tiles.
    for i in -1..=2 {
        for j in -1..=2 {
            // The corners can't be affected by the smart path.
            if (i == -1 || i == 2) && (j == -1 || j == 2) {
                continue;
            }
            let (cx, cy) = (x + i, y + j);
            let Some(block) = grid.get(cx, cy) else {
                continue;
            };
            if !selection.contains_metatile(block.metatile_id) {
                continue;
            }
            resolve_path_tile(grid, cx, cy, selection);
            written += 1;
        }
    }
    written
}

/// Flood-fill variant of [`paint_smart_path`]: fills the contiguous region
/// with the open tile, then re-resolves every affected path tile.
pub fn flood_fill_smart_path(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    selection: &MetatileSelection,
) -> usize {
    if !selection.is_smart_path() || !grid.in_bounds(x, y) {
        return 0;
    }
    let open_tile = match selection.metatile_at(SMART_PATH_CENTER) {
        Some(tile) => tile,
        None => return 0,
    };
    let open_collision = selection.collision_at(SMART_PATH_CENTER);

    let mut written = 0;

    // Flood fill the region with the open tile.
    let mut todo = VecDeque::new();
    todo.push_back((x, y));
    while let Some((cx, cy)) = todo.pop_front() {
        let Some(mut block) = grid.get(cx, cy) else {
            continue;
        };
        let old_tile = block.metatile_id;
        if old_tile == open_tile {
            continue;
        }
        block.metatile_id = open_tile;
        if let Some((collision, elevation)) = open_collision {
            block.collision = collision;
            block.elevation = elevation;
        }
        grid.set(cx, cy, block);
        written += 1;

        for (nx, ny) in neighbors(cx, cy) {
            if let Some(neighbor) = grid.get(nx, ny) {
                if neighbor.metatile_id == old_tile {
                    todo.push_back((nx, ny));
                }
            }
        }
    }

    // Go back and resolve the flood-filled edge tiles,
    // marking tiles as visited along the way.
    let width = grid.width();
    let mut visited = vec![false; grid.size()];
    todo.push_back((x, y));
    while let Some((cx, cy)) = todo.pop_front() {
        visited[(cy * width + cx) as usize] = true;

        if grid.get(cx, cy).is_none() {
            continue;
        }
        resolve_path_tile(grid, cx, cy, selection);
        written += 1;

        for (nx, ny) in neighbors(cx, cy) {
            if let Some(neighbor) = grid.get(nx, ny) {
                let i = (ny * width + nx) as usize;
                if !visited[i] && selection.contains_metatile(neighbor.metatile_id) {
                    todo.push_back((nx, ny));
                    visited[i] = true;
                }
            }
        }
    }
    written
}

/// 4-connected flood fill over the joint collision/elevation fields
pub fn flood_fill_collision(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    collision: u16,
    elevation: u16,
) -> usize {
    let Some(start) = grid.get(x, y) else {
        return 0;
    };
    if start.collision == collision && start.elevation == elevation {
        return 0;
    }

    let mut written = 0;
    let mut todo = VecDeque::new();
    todo.push_back((x, y));
    while let Some((cx, cy)) = todo.pop_front() {
        let Some(mut block) = grid.get(cx, cy) else {
            continue;
        };
        let old_collision = block.collision;
        let old_elevation = block.elevation;
        if old_collision == collision && old_elevation == elevation {
            continue;
        }
        block.collision = collision;
        block.elevation = elevation;
        grid.set(cx, cy, block);
        written += 1;

        for (nx, ny) in neighbors(cx, cy) {
            if let Some(neighbor) = grid.get(nx, ny) {
                if neighbor.collision == old_collision && neighbor.elevation == old_elevation {
                    todo.push_back((nx, ny));
                }
            }
        }
    }
    written
}

/// Whole-grid replace of every cell matching the anchor's joint
/// collision/elevation value
pub fn magic_fill_collision(
    grid: &mut Blockdata,
    x: i32,
    y: i32,
    collision: u16,
    elevation: u16,
) -> usize {
    let Some(start) = grid.get(x, y) else {
        return 0;
    };
    if start.collision == collision && start.elevation == elevation {
        return 0;
    }
    let old_collision = start.collision;
    let old_elevation = start.elevation;

    let mut written = 0;
    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            if let Some(mut block) = grid.get(cx, cy) {
                if block.collision == old_collision && block.elevation == old_elevation {
                    block.collision = collision;
                    block.elevation = elevation;
                    grid.set(cx, cy, block);
                    written += 1;
                }
            }
        }
    }
    written
}

/// Translate every metatile id by `(dx, dy)` with wraparound at the grid
/// edges. Collision and elevation stay at their positions.
pub fn shift(grid: &mut Blockdata, dx: i32, dy: i32) {
    let backup = grid.clone();
    let width = grid.width();
    let height = grid.height();
    for i in 0..width {
        for j in 0..height {
            let dest_x = (i + dx).rem_euclid(width);
            let dest_y = (j + dy).rem_euclid(height);
            if let (Some(src), Some(dest)) = (backup.get(i, j), grid.get(dest_x, dest_y)) {
                grid.set(dest_x, dest_y, dest.with_metatile_id(src.metatile_id));
            }
        }
    }
}

/// Row-major brush index for a cell `(dx, dy)` away from the fill anchor,
/// wrapping the brush modulo its dimensions
fn brush_index(selection: &MetatileSelection, dx: i32, dy: i32) -> usize {
    let i = dx.rem_euclid(selection.width());
    let j = dy.rem_euclid(selection.height());
    (j * selection.width() + i) as usize
}

fn neighbors(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
}

/// Rewrite the path tile at `(x, y)` from its marching-squares neighborhood
fn resolve_path_tile(grid: &mut Blockdata, x: i32, y: i32, selection: &MetatileSelection) {
    let in_path = |block: Option<Block>| {
        block.is_some_and(|b| selection.contains_metatile(b.metatile_id))
    };

    let mut id = 0;
    if in_path(grid.get(x, y - 1)) {
        id += 1;
    }
    if in_path(grid.get(x + 1, y)) {
        id += 2;
    }
    if in_path(grid.get(x, y + 1)) {
        id += 4;
    }
    if in_path(grid.get(x - 1, y)) {
        id += 8;
    }

    let index = SMART_PATH_TABLE[id];
    if let Some(mut block) = grid.get(x, y) {
        if let Some(tile) = selection.metatile_at(index) {
            block.metatile_id = tile;
        }
        if let Some((collision, elevation)) = selection.collision_at(index) {
            block.collision = collision;
            block.elevation = elevation;
        }
        grid.set(x, y, block);
    }
}
