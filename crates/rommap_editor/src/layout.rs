//! The map layout document: block grid, border grid and undo history.
//!
//! A [`LayoutDocument`] owns the editable state, the active brush and the
//! current tool, and translates user gestures into [`LayoutCommand`]s. Every
//! edit runs on a scratch copy of the affected grid and is committed as a
//! before/after snapshot; edits that change nothing never reach the history.

use rommap_core::{fill, Block, Blockdata, GridError, MetatileSelection};
use tracing::debug;
use uuid::Uuid;

use crate::commands::LayoutCommand;
use crate::history::History;

/// Default cap on `width * height` for a map grid
pub const DEFAULT_MAX_MAP_CELLS: usize = 0x2800;

/// Which part of a layout an edit touched, for dependent views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    Blocks,
    Border,
    /// Dimensions possibly changed along with cell contents
    Dimensions,
    Tilesets,
}

/// The tool currently driving mouse input on this document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditAction {
    #[default]
    Paint,
    Select,
    Fill,
    MagicFill,
    Shift,
    Pick,
}

/// The undoable state of a layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub blockdata: Blockdata,
    pub border: Blockdata,
    pub tileset_primary: Uuid,
    pub tileset_secondary: Uuid,
}

/// An open map layout with its own undo stack.
///
/// Paint operations stamp the document's active brush, which is replaced by
/// [`Self::set_selection`], [`Self::pick_at`] and [`Self::select_region`].
/// Repeated paints between `end_stroke` boundaries coalesce into a single
/// history entry; fills, border stamps and resizes each commit one entry per
/// call.
pub struct LayoutDocument {
    pub id: Uuid,
    pub name: String,
    state: LayoutState,
    history: History<LayoutCommand>,
    /// Active brush; every paint and fill stamps this
    selection: MetatileSelection,
    edit_action: EditAction,
    /// Paint 3x3 brushes as self-connecting paths
    smart_paths: bool,
    /// Bumped at every gesture boundary; commands sharing a value merge
    action_id: u64,
    /// Cell where the current paint gesture started, for brush snapping
    stroke_anchor: Option<(i32, i32)>,
    /// Grid contents as of the last committed command, for scripted edits
    last_commit: (Blockdata, Blockdata),
    max_cells: usize,
    on_changed: Option<Box<dyn FnMut(LayoutChange)>>,
}

impl LayoutDocument {
    pub fn new(
        name: impl Into<String>,
        width: i32,
        height: i32,
        border_width: i32,
        border_height: i32,
    ) -> Result<Self, GridError> {
        Self::with_max_cells(
            name,
            width,
            height,
            border_width,
            border_height,
            DEFAULT_MAX_MAP_CELLS,
        )
    }

    pub fn with_max_cells(
        name: impl Into<String>,
        width: i32,
        height: i32,
        border_width: i32,
        border_height: i32,
        max_cells: usize,
    ) -> Result<Self, GridError> {
        let blockdata = Blockdata::new(width, height)?;
        if blockdata.size() > max_cells {
            return Err(GridError::TooManyCells {
                cells: blockdata.size(),
                max: max_cells,
            });
        }
        let border = Blockdata::new(border_width, border_height)?;
        let last_commit = (blockdata.clone(), border.clone());
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            state: LayoutState {
                blockdata,
                border,
                tileset_primary: Uuid::nil(),
                tileset_secondary: Uuid::nil(),
            },
            history: History::new(),
            selection: MetatileSelection::single(0),
            edit_action: EditAction::default(),
            smart_paths: false,
            action_id: 0,
            stroke_anchor: None,
            last_commit,
            max_cells,
            on_changed: None,
        })
    }

    pub fn blockdata(&self) -> &Blockdata {
        &self.state.blockdata
    }

    pub fn border(&self) -> &Blockdata {
        &self.state.border
    }

    pub fn width(&self) -> i32 {
        self.state.blockdata.width()
    }

    pub fn height(&self) -> i32 {
        self.state.blockdata.height()
    }

    pub fn tilesets(&self) -> (Uuid, Uuid) {
        (self.state.tileset_primary, self.state.tileset_secondary)
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    pub fn selection(&self) -> &MetatileSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: MetatileSelection) {
        self.selection = selection;
    }

    pub fn edit_action(&self) -> EditAction {
        self.edit_action
    }

    pub fn set_edit_action(&mut self, action: EditAction) {
        self.edit_action = action;
    }

    pub fn smart_paths(&self) -> bool {
        self.smart_paths
    }

    /// Enable smart-path stamping for 3x3 brushes
    pub fn set_smart_paths(&mut self, enabled: bool) {
        self.smart_paths = enabled;
    }

    /// Register a callback fired after every committed, undone or redone edit
    pub fn set_on_changed(&mut self, callback: impl FnMut(LayoutChange) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    // --- gestures -----------------------------------------------------------

    /// Close the current gesture. The next paint or shift starts a new
    /// history entry and re-anchors brush snapping.
    pub fn end_stroke(&mut self) {
        self.stroke_anchor = None;
        self.action_id += 1;
    }

    /// Stamp the active brush at `(x, y)`, snapped against the gesture
    /// anchor. With smart paths enabled and a 3x3 brush, paints a
    /// self-connecting path instead of a plain stamp.
    pub fn paint_at(&mut self, x: i32, y: i32) {
        let anchor = *self.stroke_anchor.get_or_insert((x, y));
        let selection = self.selection.clone();
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        if self.smart_paths && selection.is_smart_path() {
            fill::paint_smart_path(&mut new, x, y, &selection);
        } else {
            fill::paint_normal(&mut new, x, y, anchor, &selection);
        }
        self.commit(LayoutCommand::Paint {
            old,
            new,
            action_id: self.action_id,
        });
    }

    /// Set collision and elevation at a single cell
    pub fn paint_collision_at(&mut self, x: i32, y: i32, collision: u16, elevation: u16) {
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        if let Some(mut block) = new.get(x, y) {
            block.collision = collision;
            block.elevation = elevation;
            new.set(x, y, block);
        }
        self.commit(LayoutCommand::PaintCollision {
            old,
            new,
            action_id: self.action_id,
        });
    }

    /// Flood fill the contiguous region under `(x, y)` with the active
    /// brush. Each fill is one history entry regardless of gesture.
    pub fn fill_at(&mut self, x: i32, y: i32) {
        let selection = self.selection.clone();
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        if self.smart_paths && selection.is_smart_path() {
            fill::flood_fill_smart_path(&mut new, x, y, &selection);
        } else {
            fill::flood_fill(&mut new, x, y, &selection);
        }
        self.commit(LayoutCommand::BucketFill { old, new });
    }

    /// Flood fill the joint collision/elevation region under `(x, y)`
    pub fn fill_collision_at(&mut self, x: i32, y: i32, collision: u16, elevation: u16) {
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        fill::flood_fill_collision(&mut new, x, y, collision, elevation);
        self.commit(LayoutCommand::BucketFillCollision { old, new });
    }

    /// Replace every cell matching the metatile under `(x, y)`
    pub fn magic_fill_at(&mut self, x: i32, y: i32) {
        let selection = self.selection.clone();
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        fill::magic_fill(&mut new, x, y, &selection);
        self.commit(LayoutCommand::MagicFill { old, new });
    }

    /// Replace every cell matching the collision/elevation under `(x, y)`
    pub fn magic_fill_collision_at(&mut self, x: i32, y: i32, collision: u16, elevation: u16) {
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        fill::magic_fill_collision(&mut new, x, y, collision, elevation);
        self.commit(LayoutCommand::MagicFillCollision { old, new });
    }

    /// Translate all metatile ids by `(dx, dy)` with wraparound.
    ///
    /// Successive shifts within one gesture merge into a single entry.
    pub fn shift_by(&mut self, dx: i32, dy: i32) {
        let old = self.state.blockdata.clone();
        let mut new = old.clone();
        fill::shift(&mut new, dx, dy);
        self.commit(LayoutCommand::Shift {
            old,
            new,
            action_id: self.action_id,
        });
    }

    /// Stamp the active brush onto the border grid at `(x, y)`.
    ///
    /// Border paints write metatile ids only and never merge.
    pub fn paint_border_at(&mut self, x: i32, y: i32) {
        let selection = self.selection.clone();
        let old = self.state.border.clone();
        let mut new = old.clone();
        for i in 0..selection.width() {
            for j in 0..selection.height() {
                let index = (j * selection.width() + i) as usize;
                let Some(cell) = selection.cell(index) else {
                    continue;
                };
                if !cell.enabled {
                    continue;
                }
                if let Some(block) = new.get(x + i, y + j) {
                    new.set(x + i, y + j, block.with_metatile_id(cell.metatile_id));
                }
            }
        }
        self.commit(LayoutCommand::PaintBorder { old, new });
    }

    // --- picking ------------------------------------------------------------

    /// Read the block under the cursor and make it the active brush.
    ///
    /// Read-only with respect to the grid: no command, no history entry.
    pub fn pick_at(&mut self, x: i32, y: i32) -> Option<Block> {
        let block = self.state.blockdata.get(x, y)?;
        self.selection = MetatileSelection::single(block.metatile_id)
            .with_collisions(vec![(block.collision, block.elevation)]);
        Some(block)
    }

    pub fn pick_collision_at(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        self.state
            .blockdata
            .get(x, y)
            .map(|b| (b.collision, b.elevation))
    }

    /// Make a rectangular region of the map the active brush, carrying both
    /// metatile ids and collision/elevation pairs. `None` (brush unchanged)
    /// when the rectangle leaves the grid.
    pub fn select_region(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Option<&MetatileSelection> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let mut ids = Vec::with_capacity((width as usize) * (height as usize));
        let mut collisions = Vec::with_capacity(ids.capacity());
        for j in 0..height {
            for i in 0..width {
                let block = self.state.blockdata.get(x + i, y + j)?;
                ids.push(block.metatile_id);
                collisions.push((block.collision, block.elevation));
            }
        }
        let selection = MetatileSelection::from_metatiles(width, height, ids)
            .ok()?
            .with_collisions(collisions);
        self.selection = selection;
        Some(&self.selection)
    }

    // --- structure ----------------------------------------------------------

    /// Resize the map and border grids, keeping overlapping cells and
    /// filling exposed ones with `fill`. One history entry.
    pub fn resize_to(
        &mut self,
        width: i32,
        height: i32,
        border_width: i32,
        border_height: i32,
        fill: Block,
    ) -> Result<(), GridError> {
        if width > 0 && height > 0 {
            let cells = (width as usize) * (height as usize);
            if cells > self.max_cells {
                return Err(GridError::TooManyCells {
                    cells,
                    max: self.max_cells,
                });
            }
        }
        let new_blocks = self.state.blockdata.resized(width, height, fill)?;
        let new_border = self.state.border.resized(border_width, border_height, fill)?;
        self.commit(LayoutCommand::Resize {
            old_blocks: self.state.blockdata.clone(),
            new_blocks,
            old_border: self.state.border.clone(),
            new_border,
        });
        Ok(())
    }

    /// Swap the layout's tileset references. One history entry.
    pub fn change_tilesets(&mut self, primary: Uuid, secondary: Uuid) {
        self.commit(LayoutCommand::ChangeTilesets {
            old_primary: self.state.tileset_primary,
            new_primary: primary,
            old_secondary: self.state.tileset_secondary,
            new_secondary: secondary,
        });
    }

    // --- scripted edits -----------------------------------------------------

    /// Write one block directly, outside the history.
    ///
    /// Pending scripted writes become undoable only once
    /// [`Self::commit_script_edit`] runs.
    pub fn set_block(&mut self, x: i32, y: i32, block: Block) {
        self.state.blockdata.set(x, y, block);
    }

    /// Commit all scripted writes since the last commit as one history entry
    pub fn commit_script_edit(&mut self) {
        self.commit(LayoutCommand::ScriptEdit {
            old_blocks: self.last_commit.0.clone(),
            new_blocks: self.state.blockdata.clone(),
            old_border: self.last_commit.1.clone(),
            new_border: self.state.border.clone(),
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
        let change = self.history.undo_command().map(LayoutCommand::change);
        if !self.history.undo(&mut self.state) {
            return false;
        }
        self.sync_last_commit();
        if let Some(change) = change {
            self.notify(change);
        }
        true
    }

    pub fn redo(&mut self) -> bool {
        let change = self.history.redo_command().map(LayoutCommand::change);
        if !self.history.redo(&mut self.state) {
            return false;
        }
        self.sync_last_commit();
        if let Some(change) = change {
            self.notify(change);
        }
        true
    }

    /// Whether the document has unsaved edits
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    /// Mark the current state as saved
    pub fn mark_saved(&mut self) {
        self.history.mark_clean();
    }

    fn commit(&mut self, command: LayoutCommand) {
        if command.is_noop() {
            return;
        }
        let change = command.change();
        debug!(layout = %self.name, command = command.label(), "commit");
        self.history.push(command, &mut self.state);
        self.sync_last_commit();
        self.notify(change);
    }

    fn sync_last_commit(&mut self) {
        self.last_commit = (self.state.blockdata.clone(), self.state.border.clone());
    }

    fn notify(&mut self, change: LayoutChange) {
        if let Some(callback) = self.on_changed.as_mut() {
            callback(change);
        }
    }
}
