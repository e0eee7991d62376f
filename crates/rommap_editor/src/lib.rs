//! rommap_editor - Editing documents for tile-based ROM hacking maps
//!
//! This crate turns the grids and fill algorithms from `rommap_core` into
//! editable documents with:
//! - Transactional undo/redo with per-gesture command merging
//! - Map layout editing (paint, bucket/magic fill, shift, border, resize)
//! - Region-map tilemap and section-layout editing
//! - Scripted batch edits committed as single history entries
//! - JSON editor configuration
//!
//! # Usage
//!
//! ```rust,ignore
//! use rommap_core::MetatileSelection;
//! use rommap_editor::LayoutDocument;
//!
//! let mut layout = LayoutDocument::new("route1", 20, 20, 2, 2)?;
//! layout.paint_at(4, 4, &MetatileSelection::single(7), false);
//! layout.end_stroke();
//! layout.undo();
//! ```

pub mod commands;
pub mod config;
pub mod history;
pub mod layout;
pub mod region_commands;
pub mod region_map;

pub use commands::LayoutCommand;
pub use config::{ConfigError, EditorConfig};
pub use history::{Command, History};
pub use layout::{EditAction, LayoutChange, LayoutDocument, LayoutState, DEFAULT_MAX_MAP_CELLS};
pub use region_commands::RegionCommand;
pub use region_map::{
    MapSectionEntry, RegionChange, RegionMapState, RegionTilemapDocument, SectionGrid, TileGrid,
    MAPSEC_NONE,
};
