//! A single map cell and its packed-word encoding

use serde::{Deserialize, Serialize};

/// Bit layout used to pack a [`Block`] into one 16-bit word.
///
/// The exact split is a property of the loaded project, not of this crate;
/// the default mirrors the common 10/2/4-bit arrangement (metatile id in the
/// low bits, then collision, then elevation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBits {
    pub metatile_id_mask: u16,
    pub collision_mask: u16,
    pub elevation_mask: u16,
}

impl Default for BlockBits {
    fn default() -> Self {
        Self {
            metatile_id_mask: 0x03FF,
            collision_mask: 0x0C00,
            elevation_mask: 0xF000,
        }
    }
}

impl BlockBits {
    /// Number of trailing zero bits below the mask
    fn shift(mask: u16) -> u16 {
        mask.trailing_zeros() as u16
    }

    fn pack_field(mask: u16, value: u16) -> u16 {
        (value << Self::shift(mask)) & mask
    }

    fn unpack_field(mask: u16, word: u16) -> u16 {
        (word & mask) >> Self::shift(mask)
    }

    /// Largest metatile id representable under this layout
    pub fn max_metatile_id(&self) -> u16 {
        self.metatile_id_mask >> Self::shift(self.metatile_id_mask)
    }
}

/// One grid cell: a metatile id plus its movement data.
///
/// Field values wider than the configured bit layout are truncated when the
/// block is packed; the struct itself stores them unmasked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub metatile_id: u16,
    pub collision: u16,
    pub elevation: u16,
}

impl Block {
    pub fn new(metatile_id: u16, collision: u16, elevation: u16) -> Self {
        Self {
            metatile_id,
            collision,
            elevation,
        }
    }

    /// Decode a block from its packed word form
    pub fn unpack(word: u16, bits: &BlockBits) -> Self {
        Self {
            metatile_id: BlockBits::unpack_field(bits.metatile_id_mask, word),
            collision: BlockBits::unpack_field(bits.collision_mask, word),
            elevation: BlockBits::unpack_field(bits.elevation_mask, word),
        }
    }

    /// Encode this block as a single packed word
    pub fn pack(&self, bits: &BlockBits) -> u16 {
        BlockBits::pack_field(bits.metatile_id_mask, self.metatile_id)
            | BlockBits::pack_field(bits.collision_mask, self.collision)
            | BlockBits::pack_field(bits.elevation_mask, self.elevation)
    }

    /// Replace the metatile id, keeping movement data
    pub fn with_metatile_id(self, metatile_id: u16) -> Self {
        Self {
            metatile_id,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_default_layout() {
        let bits = BlockBits::default();
        let block = Block::new(0x155, 2, 9);
        assert_eq!(block.pack(&bits), 0x155 | (2 << 10) | (9 << 12));
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let bits = BlockBits::default();
        for word in [0x0000u16, 0x0001, 0x03FF, 0x2471, 0x9ABC, 0xFFFF] {
            assert_eq!(Block::unpack(word, &bits).pack(&bits), word);
        }
    }

    #[test]
    fn test_pack_masks_out_of_range_fields() {
        let bits = BlockBits::default();
        // Metatile ids only keep 10 bits under the default layout.
        let block = Block::new(0x7FF, 5, 17);
        let unpacked = Block::unpack(block.pack(&bits), &bits);
        assert_eq!(unpacked.metatile_id, 0x3FF);
        assert_eq!(unpacked.collision, 1);
        assert_eq!(unpacked.elevation, 1);
    }

    #[test]
    fn test_max_metatile_id() {
        assert_eq!(BlockBits::default().max_metatile_id(), 0x3FF);
    }
}
