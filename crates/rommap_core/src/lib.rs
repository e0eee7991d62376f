//! Core data structures for rommap
//!
//! This crate provides the fundamental types for editing tile-based maps in
//! ROM hacking projects:
//! - `Block` - One map cell (metatile id, collision, elevation)
//! - `Blockdata` - A resizable row-major grid of blocks
//! - `MetatileSelection` - The multi-cell brush a paint operation stamps
//! - `fill` - Flood fill, magic fill, paint stamping and smart-path autotiling
//! - `TilemapTile` - Region-map tile encodings (plain/4bpp/8bpp)

mod block;
mod blockdata;
mod error;
pub mod fill;
mod selection;
mod tilemap;

pub use block::{Block, BlockBits};
pub use blockdata::Blockdata;
pub use error::GridError;
pub use fill::SMART_PATH_TABLE;
pub use selection::{MetatileSelection, SelectionCell};
pub use tilemap::{TilemapFormat, TilemapTile};
