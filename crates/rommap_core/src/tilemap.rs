//! Region-map tilemap tile encodings.
//!
//! A region-map tilemap stores one tile per cell in one of three hardware
//! formats. The format decides how a cell's raw integer decomposes into tile
//! id, flips and palette; `decode` and [`TilemapTile::raw`] round-trip
//! losslessly for every representable combination.

use serde::{Deserialize, Serialize};

const TILE_ID_MASK: u16 = 0x03FF;
const TILE_HFLIP: u16 = 0x0400;
const TILE_VFLIP: u16 = 0x0800;
const TILE_PALETTE_SHIFT: u16 = 12;

/// Tile encoding scheme of a region-map tilemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilemapFormat {
    /// One byte per tile, the raw id with no flips or palette
    Plain,
    /// 10-bit id, flips, and a 4-bit palette index
    Bpp4,
    /// 10-bit id and flips, no palette
    Bpp8,
}

impl TilemapFormat {
    /// Storage size of one tile in the serialized tilemap
    pub fn bytes_per_tile(self) -> usize {
        match self {
            TilemapFormat::Plain => 1,
            TilemapFormat::Bpp4 | TilemapFormat::Bpp8 => 2,
        }
    }
}

/// One region-map tilemap cell, decoded per its format.
///
/// Kept as a plain value type; grids of these are flat `Vec`s indexed by
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilemapTile {
    Plain {
        id: u16,
    },
    Bpp4 {
        id: u16,
        h_flip: bool,
        v_flip: bool,
        palette: u8,
    },
    Bpp8 {
        id: u16,
        h_flip: bool,
        v_flip: bool,
    },
}

impl TilemapTile {
    /// The zero tile in the given format
    pub fn default_for(format: TilemapFormat) -> Self {
        Self::decode(format, 0)
    }

    /// Decode a raw tilemap word for the given format
    pub fn decode(format: TilemapFormat, raw: u16) -> Self {
        match format {
            TilemapFormat::Plain => TilemapTile::Plain { id: raw & 0x00FF },
            TilemapFormat::Bpp4 => TilemapTile::Bpp4 {
                id: raw & TILE_ID_MASK,
                h_flip: raw & TILE_HFLIP != 0,
                v_flip: raw & TILE_VFLIP != 0,
                palette: (raw >> TILE_PALETTE_SHIFT) as u8,
            },
            TilemapFormat::Bpp8 => TilemapTile::Bpp8 {
                id: raw & TILE_ID_MASK,
                h_flip: raw & TILE_HFLIP != 0,
                v_flip: raw & TILE_VFLIP != 0,
            },
        }
    }

    /// Re-encode this tile as its raw tilemap word
    pub fn raw(&self) -> u16 {
        match *self {
            TilemapTile::Plain { id } => id & 0x00FF,
            TilemapTile::Bpp4 {
                id,
                h_flip,
                v_flip,
                palette,
            } => {
                (id & TILE_ID_MASK)
                    | if h_flip { TILE_HFLIP } else { 0 }
                    | if v_flip { TILE_VFLIP } else { 0 }
                    | (u16::from(palette & 0x0F) << TILE_PALETTE_SHIFT)
            }
            TilemapTile::Bpp8 { id, h_flip, v_flip } => {
                (id & TILE_ID_MASK)
                    | if h_flip { TILE_HFLIP } else { 0 }
                    | if v_flip { TILE_VFLIP } else { 0 }
            }
        }
    }

    pub fn format(&self) -> TilemapFormat {
        match self {
            TilemapTile::Plain { .. } => TilemapFormat::Plain,
            TilemapTile::Bpp4 { .. } => TilemapFormat::Bpp4,
            TilemapTile::Bpp8 { .. } => TilemapFormat::Bpp8,
        }
    }

    pub fn id(&self) -> u16 {
        match *self {
            TilemapTile::Plain { id } => id,
            TilemapTile::Bpp4 { id, .. } => id,
            TilemapTile::Bpp8 { id, .. } => id,
        }
    }

    /// Same tile with a different id, preserving flips and palette
    pub fn with_id(self, new_id: u16) -> Self {
        match self {
            TilemapTile::Plain { .. } => TilemapTile::Plain { id: new_id & 0x00FF },
            TilemapTile::Bpp4 {
                h_flip,
                v_flip,
                palette,
                ..
            } => TilemapTile::Bpp4 {
                id: new_id & TILE_ID_MASK,
                h_flip,
                v_flip,
                palette,
            },
            TilemapTile::Bpp8 { h_flip, v_flip, .. } => TilemapTile::Bpp8 {
                id: new_id & TILE_ID_MASK,
                h_flip,
                v_flip,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_identity_over_byte_range() {
        for raw in 0..=0xFFu16 {
            let tile = TilemapTile::decode(TilemapFormat::Plain, raw);
            assert_eq!(tile.raw(), raw);
            assert_eq!(tile.id(), raw);
        }
    }

    #[test]
    fn test_bpp4_raw_round_trip_exhaustive() {
        for id in [0u16, 1, 0x155, 0x3FF] {
            for h_flip in [false, true] {
                for v_flip in [false, true] {
                    for palette in 0..16u8 {
                        let tile = TilemapTile::Bpp4 {
                            id,
                            h_flip,
                            v_flip,
                            palette,
                        };
                        let raw = tile.raw();
                        assert_eq!(TilemapTile::decode(TilemapFormat::Bpp4, raw), tile);
                        assert_eq!(TilemapTile::decode(TilemapFormat::Bpp4, raw).raw(), raw);
                    }
                }
            }
        }
    }

    #[test]
    fn test_bpp8_raw_round_trip_exhaustive() {
        for id in 0..=0x3FFu16 {
            for flags in 0..4u16 {
                let tile = TilemapTile::Bpp8 {
                    id,
                    h_flip: flags & 1 != 0,
                    v_flip: flags & 2 != 0,
                };
                let raw = tile.raw();
                assert_eq!(TilemapTile::decode(TilemapFormat::Bpp8, raw), tile);
            }
        }
    }

    #[test]
    fn test_bpp4_bit_positions() {
        let tile = TilemapTile::Bpp4 {
            id: 0x234,
            h_flip: true,
            v_flip: false,
            palette: 0xA,
        };
        assert_eq!(tile.raw(), 0x234 | 0x400 | 0xA000);
    }

    #[test]
    fn test_with_id_preserves_attributes() {
        let tile = TilemapTile::Bpp4 {
            id: 3,
            h_flip: true,
            v_flip: true,
            palette: 5,
        };
        let changed = tile.with_id(0x3FF);
        assert_eq!(changed.id(), 0x3FF);
        assert_eq!(changed.raw() & 0x0C00, 0x0C00);
        assert_eq!(changed.raw() >> 12, 5);
    }
}
