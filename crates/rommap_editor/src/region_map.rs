//! The region-map document: a tilemap grid, a map-section layout grid and
//! the per-section entry table, all behind one undo history.
//!
//! The layout grid occupies a rectangular window inside the tilemap, offset
//! from its top-left corner; [`RegionTilemapDocument::tilemap_to_layout_index`]
//! maps tilemap coordinates into that window.

use std::collections::{BTreeMap, VecDeque};

use rommap_core::{GridError, TilemapFormat, TilemapTile};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::history::History;
use crate::region_commands::RegionCommand;

/// Section id of a layout cell with no map assigned
pub const MAPSEC_NONE: &str = "MAPSEC_NONE";

/// Which part of a region map an edit touched, for dependent views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChange {
    Tilemap,
    Layout,
    Entries,
}

/// Row-major grid of tilemap tiles, all in one format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    format: TilemapFormat,
    tiles: Vec<TilemapTile>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32, format: TilemapFormat) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            format,
            tiles: vec![TilemapTile::default_for(format); (width as usize) * (height as usize)],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn format(&self) -> TilemapFormat {
        self.format
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TilemapTile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Replace the tile at `(x, y)`; ignored outside the grid
    pub fn set(&mut self, x: i32, y: i32, tile: TilemapTile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    pub fn tiles(&self) -> &[TilemapTile] {
        &self.tiles
    }

    /// A copy at new dimensions; exposed cells get the format's zero tile
    pub fn resized(&self, width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let fill = TilemapTile::default_for(self.format);
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                tiles.push(self.get(x, y).unwrap_or(fill));
            }
        }
        Ok(Self {
            width,
            height,
            format: self.format,
            tiles,
        })
    }

    /// Serialize row-major: one byte per tile for [`TilemapFormat::Plain`],
    /// little-endian 16-bit words otherwise
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.tiles.len() * self.format.bytes_per_tile());
        for tile in &self.tiles {
            let raw = tile.raw();
            match self.format {
                TilemapFormat::Plain => data.push(raw as u8),
                TilemapFormat::Bpp4 | TilemapFormat::Bpp8 => {
                    data.extend_from_slice(&raw.to_le_bytes());
                }
            }
        }
        data
    }

    /// Deserialize the encoding produced by [`Self::to_bytes`]; the buffer
    /// must hold exactly `width * height` tiles
    pub fn from_bytes(
        data: &[u8],
        width: i32,
        height: i32,
        format: TilemapFormat,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let cells = (width as usize) * (height as usize);
        let expected = cells * format.bytes_per_tile();
        if data.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let tiles = match format {
            TilemapFormat::Plain => data
                .iter()
                .map(|&byte| TilemapTile::decode(format, u16::from(byte)))
                .collect(),
            TilemapFormat::Bpp4 | TilemapFormat::Bpp8 => data
                .chunks_exact(2)
                .map(|pair| TilemapTile::decode(format, u16::from_le_bytes([pair[0], pair[1]])))
                .collect(),
        };
        Ok(Self {
            width,
            height,
            format,
            tiles,
        })
    }
}

/// Row-major grid of map-section ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGrid {
    width: i32,
    height: i32,
    sections: Vec<String>,
}

impl SectionGrid {
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            sections: vec![MAPSEC_NONE.to_string(); (width as usize) * (height as usize)],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&str> {
        self.index(x, y).map(|i| self.sections[i].as_str())
    }

    pub fn set(&mut self, x: i32, y: i32, section: impl Into<String>) {
        if let Some(i) = self.index(x, y) {
            self.sections[i] = section.into();
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Whether the cell has a real map section assigned, rather than being
    /// empty or the none sentinel
    pub fn has_map(&self, x: i32, y: i32) -> bool {
        self.get(x, y)
            .is_some_and(|section| !section.is_empty() && section != MAPSEC_NONE)
    }

    /// A copy at new dimensions; exposed cells get [`MAPSEC_NONE`]
    pub fn resized(&self, width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut sections = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                sections.push(self.get(x, y).unwrap_or(MAPSEC_NONE).to_string());
            }
        }
        Ok(Self {
            width,
            height,
            sections,
        })
    }
}

/// Position and extent of one map section on the layout grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSectionEntry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MapSectionEntry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The undoable state of a region map
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMapState {
    pub tilemap: TileGrid,
    pub layout: SectionGrid,
    pub entries: BTreeMap<String, MapSectionEntry>,
}

/// An open region map with its own undo stack.
///
/// Tile and section paints participate in gestures the same way layout
/// paints do. Tilemap resizes always stand alone in the history; layout
/// resizes collapse into a single entry while the user tries sizes.
pub struct RegionTilemapDocument {
    pub id: Uuid,
    pub name: String,
    state: RegionMapState,
    history: History<RegionCommand>,
    action_id: u64,
    /// Layout window position inside the tilemap, in tiles
    offset_left: i32,
    offset_top: i32,
    on_changed: Option<Box<dyn FnMut(RegionChange)>>,
}

impl RegionTilemapDocument {
    pub fn new(
        name: impl Into<String>,
        tilemap_width: i32,
        tilemap_height: i32,
        format: TilemapFormat,
        layout_width: i32,
        layout_height: i32,
        offset_left: i32,
        offset_top: i32,
    ) -> Result<Self, GridError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            state: RegionMapState {
                tilemap: TileGrid::new(tilemap_width, tilemap_height, format)?,
                layout: SectionGrid::new(layout_width, layout_height)?,
                entries: BTreeMap::new(),
            },
            history: History::new(),
            action_id: 0,
            offset_left,
            offset_top,
            on_changed: None,
        })
    }

    pub fn tilemap(&self) -> &TileGrid {
        &self.state.tilemap
    }

    pub fn layout(&self) -> &SectionGrid {
        &self.state.layout
    }

    pub fn entries(&self) -> &BTreeMap<String, MapSectionEntry> {
        &self.state.entries
    }

    pub fn format(&self) -> TilemapFormat {
        self.state.tilemap.format()
    }

    pub fn offsets(&self) -> (i32, i32) {
        (self.offset_left, self.offset_top)
    }

    /// Register a callback fired after every committed, undone or redone edit
    pub fn set_on_changed(&mut self, callback: impl FnMut(RegionChange) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    /// Map a tilemap coordinate into the layout grid.
    ///
    /// `None` for tiles outside the layout window, including tiles that are
    /// in the tilemap's decorative frame around it.
    pub fn tilemap_to_layout_index(&self, x: i32, y: i32) -> Option<usize> {
        let lx = x - self.offset_left;
        let ly = y - self.offset_top;
        if !self.state.layout.in_bounds(lx, ly) {
            return None;
        }
        Some((ly * self.state.layout.width() + lx) as usize)
    }

    /// Section under a tilemap coordinate, when inside the layout window
    pub fn section_at_tile(&self, x: i32, y: i32) -> Option<&str> {
        self.state
            .layout
            .get(x - self.offset_left, y - self.offset_top)
    }

    // --- gestures -----------------------------------------------------------

    /// Close the current gesture; the next paint starts a new history entry
    pub fn end_stroke(&mut self) {
        self.action_id += 1;
    }

    /// Write one tilemap tile. Repeated writes in a gesture merge.
    pub fn paint_tile_at(&mut self, x: i32, y: i32, tile: TilemapTile) {
        let old = self.state.tilemap.clone();
        let mut new = old.clone();
        new.set(x, y, tile);
        self.commit(RegionCommand::EditTilemap {
            old,
            new,
            action_id: self.action_id,
        });
    }

    /// Flood fill the tilemap from `(x, y)`.
    ///
    /// Region membership compares the full raw tile word, so two cells with
    /// the same tile id but different flips or palette are distinct regions.
    /// Each fill is its own history entry.
    pub fn fill_tiles_at(&mut self, x: i32, y: i32, tile: TilemapTile) {
        let Some(start) = self.state.tilemap.get(x, y) else {
            return;
        };
        let target = start.raw();
        if target == tile.raw() {
            return;
        }

        let old = self.state.tilemap.clone();
        let mut new = old.clone();
        let mut todo = VecDeque::new();
        todo.push_back((x, y));
        while let Some((cx, cy)) = todo.pop_front() {
            let Some(current) = new.get(cx, cy) else {
                continue;
            };
            if current.raw() != target {
                continue;
            }
            new.set(cx, cy, tile);
            todo.push_back((cx + 1, cy));
            todo.push_back((cx - 1, cy));
            todo.push_back((cx, cy + 1));
            todo.push_back((cx, cy - 1));
        }

        // A fill never extends the surrounding paint gesture.
        self.end_stroke();
        self.commit(RegionCommand::EditTilemap {
            old,
            new,
            action_id: self.action_id,
        });
        self.end_stroke();
    }

    /// Assign a section to a layout cell. Repeated writes in a gesture merge.
    pub fn set_section_at(&mut self, x: i32, y: i32, section: &str) {
        let old = self.state.layout.clone();
        let mut new = old.clone();
        new.set(x, y, section);
        self.commit(RegionCommand::EditLayout {
            old,
            new,
            action_id: self.action_id,
        });
    }

    // --- structure ----------------------------------------------------------

    /// Resize the tilemap. Always a standalone history entry.
    pub fn resize_tilemap(&mut self, width: i32, height: i32) -> Result<(), GridError> {
        let new = self.state.tilemap.resized(width, height)?;
        self.commit(RegionCommand::ResizeTilemap {
            old: self.state.tilemap.clone(),
            new,
        });
        Ok(())
    }

    /// Resize the layout window. Successive resizes merge into one entry.
    pub fn resize_layout(&mut self, width: i32, height: i32) -> Result<(), GridError> {
        let new = self.state.layout.resized(width, height)?;
        self.commit(RegionCommand::ResizeLayout {
            old: self.state.layout.clone(),
            new,
        });
        Ok(())
    }

    // --- entries ------------------------------------------------------------

    /// Insert or replace the entry for `section`
    pub fn set_entry(&mut self, section: &str, entry: MapSectionEntry) {
        self.commit(RegionCommand::EditEntry {
            section: section.to_string(),
            old: self.state.entries.get(section).copied(),
            new: Some(entry),
        });
    }

    /// Remove the entry for `section`, if present
    pub fn remove_entry(&mut self, section: &str) {
        self.commit(RegionCommand::EditEntry {
            section: section.to_string(),
            old: self.state.entries.get(section).copied(),
            new: None,
        });
    }

    /// Drop all entries as one history entry
    pub fn clear_entries(&mut self) {
        self.commit(RegionCommand::ClearEntries {
            old: self.state.entries.clone(),
        });
    }

    // --- history ------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn undo(&mut self) -> bool {
        let change = self.history.undo_command().map(RegionCommand::change);
        if !self.history.undo(&mut self.state) {
            return false;
        }
        if let Some(change) = change {
            self.notify(change);
        }
        true
    }

    pub fn redo(&mut self) -> bool {
        let change = self.history.redo_command().map(RegionCommand::change);
        if !self.history.redo(&mut self.state) {
            return false;
        }
        if let Some(change) = change {
            self.notify(change);
        }
        true
    }

    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_clean();
    }

    fn commit(&mut self, command: RegionCommand) {
        if command.is_noop() {
            return;
        }
        let change = command.change();
        debug!(region_map = %self.name, command = command.label(), "commit");
        self.history.push(command, &mut self.state);
        self.notify(change);
    }

    fn notify(&mut self, change: RegionChange) {
        if let Some(callback) = self.on_changed.as_mut() {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> RegionTilemapDocument {
        // 8x8 tilemap with a 4x4 layout window offset by (2, 1).
        RegionTilemapDocument::new("test", 8, 8, TilemapFormat::Bpp4, 4, 4, 2, 1).unwrap()
    }

    fn bpp4(id: u16) -> TilemapTile {
        TilemapTile::Bpp4 {
            id,
            h_flip: false,
            v_flip: false,
            palette: 0,
        }
    }

    #[test]
    fn test_tilemap_to_layout_index_window() {
        let doc = doc();
        // Top-left of the window maps to index 0.
        assert_eq!(doc.tilemap_to_layout_index(2, 1), Some(0));
        assert_eq!(doc.tilemap_to_layout_index(3, 1), Some(1));
        assert_eq!(doc.tilemap_to_layout_index(2, 2), Some(4));
        assert_eq!(doc.tilemap_to_layout_index(5, 4), Some(15));
        // The frame around the window maps to nothing.
        assert_eq!(doc.tilemap_to_layout_index(1, 1), None);
        assert_eq!(doc.tilemap_to_layout_index(2, 0), None);
        assert_eq!(doc.tilemap_to_layout_index(6, 1), None);
        assert_eq!(doc.tilemap_to_layout_index(5, 5), None);
    }

    #[test]
    fn test_section_at_tile() {
        let mut doc = doc();
        doc.set_section_at(0, 0, "MAPSEC_TOWN");
        doc.end_stroke();
        assert_eq!(doc.section_at_tile(2, 1), Some("MAPSEC_TOWN"));
        assert_eq!(doc.section_at_tile(3, 1), Some(MAPSEC_NONE));
        assert_eq!(doc.section_at_tile(0, 0), None);
    }

    #[test]
    fn test_tile_stroke_merges() {
        let mut doc = doc();
        doc.paint_tile_at(0, 0, bpp4(1));
        doc.paint_tile_at(1, 0, bpp4(1));
        doc.paint_tile_at(2, 0, bpp4(1));
        doc.end_stroke();
        assert_eq!(doc.undo_depth(), 1);

        assert!(doc.undo());
        assert_eq!(doc.tilemap().get(0, 0).unwrap().id(), 0);
        assert_eq!(doc.tilemap().get(2, 0).unwrap().id(), 0);
    }

    #[test]
    fn test_fill_matches_raw_tile_not_just_id() {
        let mut doc = doc();
        // Same tile id, different palette: a fill boundary.
        doc.paint_tile_at(
            2,
            0,
            TilemapTile::Bpp4 {
                id: 0,
                h_flip: false,
                v_flip: false,
                palette: 1,
            },
        );
        doc.end_stroke();

        doc.fill_tiles_at(0, 0, bpp4(7));
        assert_eq!(doc.tilemap().get(0, 0).unwrap().id(), 7);
        assert_eq!(doc.tilemap().get(1, 0).unwrap().id(), 7);
        // The palette-1 cell kept its tile.
        let boundary = doc.tilemap().get(2, 0).unwrap();
        assert_eq!(boundary.id(), 0);
        assert_eq!(boundary.raw() >> 12, 1);
    }

    #[test]
    fn test_fill_does_not_merge_with_stroke() {
        let mut doc = doc();
        doc.paint_tile_at(0, 0, bpp4(1));
        doc.fill_tiles_at(5, 5, bpp4(2));
        doc.paint_tile_at(0, 1, bpp4(1));
        doc.end_stroke();
        // Paint, fill, paint: three entries even without an end_stroke
        // between them.
        assert_eq!(doc.undo_depth(), 3);
    }

    #[test]
    fn test_fill_into_same_tile_is_noop() {
        let mut doc = doc();
        doc.fill_tiles_at(0, 0, bpp4(0));
        assert_eq!(doc.undo_depth(), 0);
    }

    #[test]
    fn test_tilemap_resizes_stack_separately() {
        let mut doc = doc();
        doc.resize_tilemap(10, 10).unwrap();
        doc.resize_tilemap(12, 12).unwrap();
        assert_eq!(doc.undo_depth(), 2);

        assert!(doc.undo());
        assert_eq!(doc.tilemap().width(), 10);
        assert!(doc.undo());
        assert_eq!(doc.tilemap().width(), 8);
    }

    #[test]
    fn test_layout_resizes_collapse() {
        let mut doc = doc();
        doc.resize_layout(5, 5).unwrap();
        doc.resize_layout(6, 6).unwrap();
        doc.resize_layout(3, 3).unwrap();
        assert_eq!(doc.undo_depth(), 1);

        assert!(doc.undo());
        assert_eq!(doc.layout().width(), 4);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_tilemap_resize_preserves_contents() {
        let mut doc = doc();
        doc.paint_tile_at(1, 1, bpp4(9));
        doc.end_stroke();
        doc.resize_tilemap(4, 4).unwrap();
        assert_eq!(doc.tilemap().get(1, 1).unwrap().id(), 9);
        doc.resize_tilemap(8, 8).unwrap();
        assert_eq!(doc.tilemap().get(7, 7).unwrap().id(), 0);
    }

    #[test]
    fn test_entry_lifecycle() {
        let mut doc = doc();
        doc.set_entry("MAPSEC_TOWN", MapSectionEntry::new(0, 0, 1, 1));
        doc.set_entry("MAPSEC_ROUTE", MapSectionEntry::new(1, 0, 2, 1));
        doc.set_entry("MAPSEC_TOWN", MapSectionEntry::new(0, 1, 1, 1));
        assert_eq!(doc.undo_depth(), 3);
        assert_eq!(
            doc.entries().get("MAPSEC_TOWN"),
            Some(&MapSectionEntry::new(0, 1, 1, 1))
        );

        assert!(doc.undo());
        assert_eq!(
            doc.entries().get("MAPSEC_TOWN"),
            Some(&MapSectionEntry::new(0, 0, 1, 1))
        );

        doc.redo();
        doc.remove_entry("MAPSEC_TOWN");
        assert!(!doc.entries().contains_key("MAPSEC_TOWN"));
        assert!(doc.undo());
        assert!(doc.entries().contains_key("MAPSEC_TOWN"));
    }

    #[test]
    fn test_clear_entries_is_one_entry() {
        let mut doc = doc();
        doc.set_entry("MAPSEC_A", MapSectionEntry::new(0, 0, 1, 1));
        doc.set_entry("MAPSEC_B", MapSectionEntry::new(1, 1, 1, 1));
        doc.clear_entries();
        assert!(doc.entries().is_empty());

        assert!(doc.undo());
        assert_eq!(doc.entries().len(), 2);
    }

    #[test]
    fn test_remove_missing_entry_is_noop() {
        let mut doc = doc();
        doc.remove_entry("MAPSEC_NOWHERE");
        doc.clear_entries();
        assert_eq!(doc.undo_depth(), 0);
    }

    #[test]
    fn test_tilemap_bytes_round_trip() {
        let mut doc = doc();
        doc.paint_tile_at(0, 0, bpp4(5));
        doc.paint_tile_at(
            3,
            3,
            TilemapTile::Bpp4 {
                id: 0x155,
                h_flip: true,
                v_flip: false,
                palette: 7,
            },
        );
        doc.end_stroke();

        let bytes = doc.tilemap().to_bytes();
        assert_eq!(bytes.len(), 8 * 8 * 2);
        let decoded = TileGrid::from_bytes(&bytes, 8, 8, TilemapFormat::Bpp4).unwrap();
        assert_eq!(decoded, *doc.tilemap());
    }

    #[test]
    fn test_plain_tilemap_uses_one_byte_per_tile() {
        let mut grid = TileGrid::new(2, 2, TilemapFormat::Plain).unwrap();
        grid.set(1, 1, TilemapTile::Plain { id: 0x7F });
        let bytes = grid.to_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 0x7F]);
        assert_eq!(
            TileGrid::from_bytes(&bytes, 2, 2, TilemapFormat::Plain).unwrap(),
            grid
        );
    }

    #[test]
    fn test_tilemap_bytes_size_mismatch() {
        let err = TileGrid::from_bytes(&[0u8; 7], 2, 2, TilemapFormat::Bpp8);
        assert_eq!(
            err,
            Err(GridError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_has_map_derived_from_section() {
        let mut doc = doc();
        doc.set_section_at(0, 0, "MAPSEC_TOWN");
        doc.set_section_at(1, 0, "");
        doc.end_stroke();
        assert!(doc.layout().has_map(0, 0));
        assert!(!doc.layout().has_map(1, 0));
        assert!(!doc.layout().has_map(2, 0)); // still MAPSEC_NONE
        assert!(!doc.layout().has_map(-1, 0));
    }

    #[test]
    fn test_change_notifications() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut doc = doc();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        doc.set_on_changed(move |change| sink.borrow_mut().push(change));

        doc.paint_tile_at(0, 0, bpp4(1));
        doc.end_stroke();
        doc.set_section_at(0, 0, "MAPSEC_TOWN");
        doc.end_stroke();
        doc.set_entry("MAPSEC_TOWN", MapSectionEntry::new(0, 0, 1, 1));
        doc.undo();

        assert_eq!(
            *seen.borrow(),
            vec![
                RegionChange::Tilemap,
                RegionChange::Layout,
                RegionChange::Entries,
                RegionChange::Entries,
            ]
        );
    }

    #[test]
    fn test_modified_tracking() {
        let mut doc = doc();
        assert!(!doc.is_modified());
        doc.paint_tile_at(0, 0, bpp4(1));
        doc.end_stroke();
        assert!(doc.is_modified());
        doc.mark_saved();
        assert!(!doc.is_modified());
    }
}
