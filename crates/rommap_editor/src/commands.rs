//! Undoable commands over a map layout.
//!
//! Each variant stores the full before/after snapshot of every grid it
//! touches, so undo and redo are plain snapshot replays. Merging is only
//! attempted between commands of the same variant; the action id decides
//! whether two edits belong to the same gesture.

use rommap_core::Blockdata;
use uuid::Uuid;

use crate::history::Command;
use crate::layout::{LayoutChange, LayoutState};

/// An undoable edit to a [`LayoutState`]
#[derive(Debug, Clone)]
pub enum LayoutCommand {
    /// Brush stroke over the metatile layer; merges within one gesture
    Paint {
        old: Blockdata,
        new: Blockdata,
        action_id: u64,
    },
    /// Brush stroke over the collision/elevation layer
    PaintCollision {
        old: Blockdata,
        new: Blockdata,
        action_id: u64,
    },
    /// Contiguous flood fill; one entry per click
    BucketFill { old: Blockdata, new: Blockdata },
    BucketFillCollision { old: Blockdata, new: Blockdata },
    /// Whole-grid fill of all cells matching the anchor
    MagicFill { old: Blockdata, new: Blockdata },
    MagicFillCollision { old: Blockdata, new: Blockdata },
    /// Wraparound translation of the metatile layer; merges while dragging
    Shift {
        old: Blockdata,
        new: Blockdata,
        action_id: u64,
    },
    /// Stamp onto the border grid
    PaintBorder { old: Blockdata, new: Blockdata },
    /// Map and border resize, replacing both grids wholesale
    Resize {
        old_blocks: Blockdata,
        new_blocks: Blockdata,
        old_border: Blockdata,
        new_border: Blockdata,
    },
    /// Swap the layout's tileset references
    ChangeTilesets {
        old_primary: Uuid,
        new_primary: Uuid,
        old_secondary: Uuid,
        new_secondary: Uuid,
    },
    /// Catch-all for a batch of scripted mutations committed at once
    ScriptEdit {
        old_blocks: Blockdata,
        new_blocks: Blockdata,
        old_border: Blockdata,
        new_border: Blockdata,
    },
}

impl LayoutCommand {
    /// Human-readable label, used for logging
    pub fn label(&self) -> &'static str {
        match self {
            LayoutCommand::Paint { .. } => "Paint Metatiles",
            LayoutCommand::PaintCollision { .. } => "Paint Collision",
            LayoutCommand::BucketFill { .. } => "Bucket Fill Metatiles",
            LayoutCommand::BucketFillCollision { .. } => "Bucket Fill Collision",
            LayoutCommand::MagicFill { .. } => "Magic Fill Metatiles",
            LayoutCommand::MagicFillCollision { .. } => "Magic Fill Collision",
            LayoutCommand::Shift { .. } => "Shift Metatiles",
            LayoutCommand::PaintBorder { .. } => "Paint Border",
            LayoutCommand::Resize { .. } => "Resize Map",
            LayoutCommand::ChangeTilesets { .. } => "Change Tilesets",
            LayoutCommand::ScriptEdit { .. } => "Script Edit",
        }
    }

    /// Which dependent views need repainting after this command replays
    pub fn change(&self) -> LayoutChange {
        match self {
            LayoutCommand::PaintBorder { .. } => LayoutChange::Border,
            LayoutCommand::Resize { .. } | LayoutCommand::ScriptEdit { .. } => {
                LayoutChange::Dimensions
            }
            LayoutCommand::ChangeTilesets { .. } => LayoutChange::Tilesets,
            _ => LayoutChange::Blocks,
        }
    }

    /// True when replaying this command in either direction changes nothing.
    /// No-op commands are suppressed before they reach the stack.
    pub fn is_noop(&self) -> bool {
        match self {
            LayoutCommand::Paint { old, new, .. }
            | LayoutCommand::PaintCollision { old, new, .. }
            | LayoutCommand::BucketFill { old, new }
            | LayoutCommand::BucketFillCollision { old, new }
            | LayoutCommand::MagicFill { old, new }
            | LayoutCommand::MagicFillCollision { old, new }
            | LayoutCommand::Shift { old, new, .. }
            | LayoutCommand::PaintBorder { old, new } => old == new,
            LayoutCommand::Resize {
                old_blocks,
                new_blocks,
                old_border,
                new_border,
            }
            | LayoutCommand::ScriptEdit {
                old_blocks,
                new_blocks,
                old_border,
                new_border,
            } => old_blocks == new_blocks && old_border == new_border,
            LayoutCommand::ChangeTilesets {
                old_primary,
                new_primary,
                old_secondary,
                new_secondary,
            } => old_primary == new_primary && old_secondary == new_secondary,
        }
    }
}

impl Command for LayoutCommand {
    type Target = LayoutState;

    fn apply(&self, target: &mut LayoutState) {
        match self {
            LayoutCommand::Paint { new, .. }
            | LayoutCommand::PaintCollision { new, .. }
            | LayoutCommand::BucketFill { new, .. }
            | LayoutCommand::BucketFillCollision { new, .. }
            | LayoutCommand::MagicFill { new, .. }
            | LayoutCommand::MagicFillCollision { new, .. }
            | LayoutCommand::Shift { new, .. } => {
                target.blockdata.copy_cells_from(new);
            }
            LayoutCommand::PaintBorder { new, .. } => {
                target.border.copy_cells_from(new);
            }
            LayoutCommand::Resize {
                new_blocks,
                new_border,
                ..
            }
            | LayoutCommand::ScriptEdit {
                new_blocks,
                new_border,
                ..
            } => {
                target.blockdata = new_blocks.clone();
                target.border = new_border.clone();
            }
            LayoutCommand::ChangeTilesets {
                new_primary,
                new_secondary,
                ..
            } => {
                target.tileset_primary = *new_primary;
                target.tileset_secondary = *new_secondary;
            }
        }
    }

    fn revert(&self, target: &mut LayoutState) {
        match self {
            LayoutCommand::Paint { old, .. }
            | LayoutCommand::PaintCollision { old, .. }
            | LayoutCommand::BucketFill { old, .. }
            | LayoutCommand::BucketFillCollision { old, .. }
            | LayoutCommand::MagicFill { old, .. }
            | LayoutCommand::MagicFillCollision { old, .. }
            | LayoutCommand::Shift { old, .. } => {
                target.blockdata.copy_cells_from(old);
            }
            LayoutCommand::PaintBorder { old, .. } => {
                target.border.copy_cells_from(old);
            }
            LayoutCommand::Resize {
                old_blocks,
                old_border,
                ..
            }
            | LayoutCommand::ScriptEdit {
                old_blocks,
                old_border,
                ..
            } => {
                target.blockdata = old_blocks.clone();
                target.border = old_border.clone();
            }
            LayoutCommand::ChangeTilesets {
                old_primary,
                old_secondary,
                ..
            } => {
                target.tileset_primary = *old_primary;
                target.tileset_secondary = *old_secondary;
            }
        }
    }

    fn merge_with(&mut self, other: &Self) -> bool {
        // Only identical variants from the same gesture may merge.
        match (self, other) {
            (
                LayoutCommand::Paint {
                    new, action_id, ..
                },
                LayoutCommand::Paint {
                    new: other_new,
                    action_id: other_id,
                    ..
                },
            )
            | (
                LayoutCommand::PaintCollision {
                    new, action_id, ..
                },
                LayoutCommand::PaintCollision {
                    new: other_new,
                    action_id: other_id,
                    ..
                },
            )
            | (
                LayoutCommand::Shift {
                    new, action_id, ..
                },
                LayoutCommand::Shift {
                    new: other_new,
                    action_id: other_id,
                    ..
                },
            ) => {
                if *action_id != *other_id {
                    return false;
                }
                *new = other_new.clone();
                true
            }
            _ => false,
        }
    }
}
