//! Undoable commands over a region-map document.
//!
//! Snapshot commands like the layout side: apply and revert are whole-grid
//! assignments. Tilemap edits merge within a gesture, layout resizes always
//! collapse into one entry, and tilemap resizes never merge.

use std::collections::BTreeMap;

use crate::history::Command;
use crate::region_map::{MapSectionEntry, RegionChange, RegionMapState, SectionGrid, TileGrid};

/// An undoable edit to a [`RegionMapState`]
#[derive(Debug, Clone)]
pub enum RegionCommand {
    /// Tile writes from a brush gesture
    EditTilemap {
        old: TileGrid,
        new: TileGrid,
        action_id: u64,
    },
    /// Tilemap dimension change. Kept distinct from [`Self::EditTilemap`]
    /// because it must never merge, even mid-gesture.
    ResizeTilemap { old: TileGrid, new: TileGrid },
    /// Section writes over the layout grid
    EditLayout {
        old: SectionGrid,
        new: SectionGrid,
        action_id: u64,
    },
    /// Layout dimension change; successive resizes collapse into one entry
    ResizeLayout { old: SectionGrid, new: SectionGrid },
    /// Insert, replace or delete one map-section entry
    EditEntry {
        section: String,
        old: Option<MapSectionEntry>,
        new: Option<MapSectionEntry>,
    },
    /// Drop every map-section entry
    ClearEntries {
        old: BTreeMap<String, MapSectionEntry>,
    },
}

impl RegionCommand {
    pub fn label(&self) -> &'static str {
        match self {
            RegionCommand::EditTilemap { .. } => "Edit Tilemap",
            RegionCommand::ResizeTilemap { .. } => "Resize Tilemap",
            RegionCommand::EditLayout { .. } => "Edit Layout",
            RegionCommand::ResizeLayout { .. } => "Resize Layout",
            RegionCommand::EditEntry { .. } => "Edit Entry",
            RegionCommand::ClearEntries { .. } => "Clear Entries",
        }
    }

    /// Which part of the region map this command touches
    pub fn change(&self) -> RegionChange {
        match self {
            RegionCommand::EditTilemap { .. } | RegionCommand::ResizeTilemap { .. } => {
                RegionChange::Tilemap
            }
            RegionCommand::EditLayout { .. } | RegionCommand::ResizeLayout { .. } => {
                RegionChange::Layout
            }
            RegionCommand::EditEntry { .. } | RegionCommand::ClearEntries { .. } => {
                RegionChange::Entries
            }
        }
    }

    /// True when apply and revert would both change nothing
    pub fn is_noop(&self) -> bool {
        match self {
            RegionCommand::EditTilemap { old, new, .. }
            | RegionCommand::ResizeTilemap { old, new } => old == new,
            RegionCommand::EditLayout { old, new, .. }
            | RegionCommand::ResizeLayout { old, new } => old == new,
            RegionCommand::EditEntry { old, new, .. } => old == new,
            RegionCommand::ClearEntries { old } => old.is_empty(),
        }
    }
}

impl Command for RegionCommand {
    type Target = RegionMapState;

    fn apply(&self, target: &mut RegionMapState) {
        match self {
            RegionCommand::EditTilemap { new, .. }
            | RegionCommand::ResizeTilemap { new, .. } => {
                target.tilemap = new.clone();
            }
            RegionCommand::EditLayout { new, .. } | RegionCommand::ResizeLayout { new, .. } => {
                target.layout = new.clone();
            }
            RegionCommand::EditEntry { section, new, .. } => match new {
                Some(entry) => {
                    target.entries.insert(section.clone(), *entry);
                }
                None => {
                    target.entries.remove(section);
                }
            },
            RegionCommand::ClearEntries { .. } => {
                target.entries.clear();
            }
        }
    }

    fn revert(&self, target: &mut RegionMapState) {
        match self {
            RegionCommand::EditTilemap { old, .. }
            | RegionCommand::ResizeTilemap { old, .. } => {
                target.tilemap = old.clone();
            }
            RegionCommand::EditLayout { old, .. } | RegionCommand::ResizeLayout { old, .. } => {
                target.layout = old.clone();
            }
            RegionCommand::EditEntry { section, old, .. } => match old {
                Some(entry) => {
                    target.entries.insert(section.clone(), *entry);
                }
                None => {
                    target.entries.remove(section);
                }
            },
            RegionCommand::ClearEntries { old } => {
                target.entries = old.clone();
            }
        }
    }

    fn merge_with(&mut self, other: &Self) -> bool {
        match (self, other) {
            (
                RegionCommand::EditTilemap {
                    new, action_id, ..
                },
                RegionCommand::EditTilemap {
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
            (
                RegionCommand::EditLayout {
                    new, action_id, ..
                },
                RegionCommand::EditLayout {
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
            // Resizing the layout repeatedly in the size dialog is one edit.
            (
                RegionCommand::ResizeLayout { new, .. },
                RegionCommand::ResizeLayout { new: other_new, .. },
            ) => {
                *new = other_new.clone();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rommap_core::{TilemapFormat, TilemapTile};

    fn tilemap(width: i32, height: i32) -> TileGrid {
        TileGrid::new(width, height, TilemapFormat::Bpp4).unwrap()
    }

    fn edited(base: &TileGrid, x: i32, y: i32, id: u16) -> TileGrid {
        let mut grid = base.clone();
        let tile = grid.get(x, y).unwrap().with_id(id);
        grid.set(x, y, tile);
        grid
    }

    #[test]
    fn test_tilemap_edit_merges_within_gesture() {
        let base = tilemap(4, 4);
        let mut first = RegionCommand::EditTilemap {
            old: base.clone(),
            new: edited(&base, 0, 0, 1),
            action_id: 3,
        };
        let second = RegionCommand::EditTilemap {
            old: edited(&base, 0, 0, 1),
            new: edited(&base, 1, 0, 2),
            action_id: 3,
        };
        assert!(first.merge_with(&second));

        let third = RegionCommand::EditTilemap {
            old: edited(&base, 1, 0, 2),
            new: edited(&base, 2, 0, 3),
            action_id: 4,
        };
        assert!(!first.merge_with(&third));
    }

    #[test]
    fn test_tilemap_resize_never_merges() {
        let base = tilemap(4, 4);
        let mut first = RegionCommand::ResizeTilemap {
            old: base.clone(),
            new: base.resized(5, 5).unwrap(),
        };
        let second = RegionCommand::ResizeTilemap {
            old: base.resized(5, 5).unwrap(),
            new: base.resized(6, 6).unwrap(),
        };
        assert!(!first.merge_with(&second));
    }

    #[test]
    fn test_layout_resize_always_merges() {
        let base = SectionGrid::new(4, 4).unwrap();
        let mut first = RegionCommand::ResizeLayout {
            old: base.clone(),
            new: base.resized(5, 5).unwrap(),
        };
        let second = RegionCommand::ResizeLayout {
            old: base.resized(5, 5).unwrap(),
            new: base.resized(3, 3).unwrap(),
        };
        assert!(first.merge_with(&second));
        match &first {
            RegionCommand::ResizeLayout { new, .. } => {
                assert_eq!(new.width(), 3);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_entry_edit_apply_revert() {
        let mut state = RegionMapState {
            tilemap: tilemap(2, 2),
            layout: SectionGrid::new(2, 2).unwrap(),
            entries: BTreeMap::new(),
        };
        let entry = MapSectionEntry::new(1, 2, 3, 4);
        let command = RegionCommand::EditEntry {
            section: "MAPSEC_TOWN".into(),
            old: None,
            new: Some(entry),
        };
        command.apply(&mut state);
        assert_eq!(state.entries.get("MAPSEC_TOWN"), Some(&entry));
        command.revert(&mut state);
        assert!(state.entries.is_empty());
    }

    #[test]
    fn test_noop_detection() {
        let base = tilemap(2, 2);
        assert!(RegionCommand::EditTilemap {
            old: base.clone(),
            new: base.clone(),
            action_id: 0,
        }
        .is_noop());
        assert!(RegionCommand::ClearEntries {
            old: BTreeMap::new()
        }
        .is_noop());
        assert!(!RegionCommand::EditTilemap {
            old: base.clone(),
            new: edited(&base, 0, 0, 9),
            action_id: 0,
        }
        .is_noop());
    }

    #[test]
    fn test_plain_tile_edit_round_trip() {
        let base = TileGrid::new(2, 1, TilemapFormat::Plain).unwrap();
        let mut state = RegionMapState {
            tilemap: base.clone(),
            layout: SectionGrid::new(1, 1).unwrap(),
            entries: BTreeMap::new(),
        };
        let command = RegionCommand::EditTilemap {
            old: base.clone(),
            new: {
                let mut grid = base.clone();
                grid.set(1, 0, TilemapTile::Plain { id: 0x42 });
                grid
            },
            action_id: 0,
        };
        command.apply(&mut state);
        assert_eq!(state.tilemap.get(1, 0).unwrap().id(), 0x42);
        command.revert(&mut state);
        assert_eq!(state.tilemap, base);
    }
}
