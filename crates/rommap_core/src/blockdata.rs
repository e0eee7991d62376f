//! Row-major block grid with bounds-checked access

use serde::{Deserialize, Serialize};

use crate::{Block, BlockBits, GridError};

/// A `width x height` grid of [`Block`]s, stored row-major.
///
/// `blocks.len() == width * height` holds after every operation. Reads
/// outside the grid return `None` and writes outside it are ignored, so
/// callers clipping a drag gesture never need their own bounds checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockdata {
    width: i32,
    height: i32,
    blocks: Vec<Block>,
}

impl Blockdata {
    /// Create a grid filled with the default block
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::filled(width, height, Block::default())
    }

    /// Create a grid filled with `fill`
    pub fn filled(width: i32, height: i32, fill: Block) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            blocks: vec![fill; (width as usize) * (height as usize)],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.blocks.len()
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

    /// Get the block at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        self.index(x, y).map(|i| self.blocks[i])
    }

    /// Replace the block at `(x, y)`; ignored outside the grid
    pub fn set(&mut self, x: i32, y: i32, block: Block) {
        if let Some(i) = self.index(x, y) {
            self.blocks[i] = block;
        }
    }

    /// All cells in row-major order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// A copy of this grid at new dimensions.
    ///
    /// Cells inside both the old and new bounding rectangle keep their value;
    /// newly exposed cells are set to `fill`. Pure with respect to `self`.
    pub fn resized(&self, width: i32, height: i32, fill: Block) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut blocks = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                blocks.push(self.get(x, y).unwrap_or(fill));
            }
        }
        Ok(Self {
            width,
            height,
            blocks,
        })
    }

    /// Copy cell values from `other`, leaving dimensions untouched.
    ///
    /// Only the overlapping prefix is copied, matching snapshot replay where
    /// `other` was captured at the same dimensions.
    pub fn copy_cells_from(&mut self, other: &Blockdata) {
        let len = self.blocks.len().min(other.blocks.len());
        self.blocks[..len].copy_from_slice(&other.blocks[..len]);
    }

    /// Serialize to little-endian 16-bit words, one per cell, row-major
    pub fn to_bytes(&self, bits: &BlockBits) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.blocks.len() * 2);
        for block in &self.blocks {
            data.extend_from_slice(&block.pack(bits).to_le_bytes());
        }
        data
    }

    /// Deserialize from the encoding produced by [`Self::to_bytes`].
    ///
    /// The buffer must be exactly `width * height` words; anything shorter or
    /// longer is a data-integrity error from the project file layer and fails
    /// the load rather than truncating or padding.
    pub fn from_bytes(
        data: &[u8],
        width: i32,
        height: i32,
        bits: &BlockBits,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * 2;
        if data.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let blocks = data
            .chunks_exact(2)
            .map(|pair| Block::unpack(u16::from_le_bytes([pair[0], pair[1]]), bits))
            .collect();
        Ok(Self {
            width,
            height,
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u16) -> Block {
        Block::new(id, 0, 0)
    }

    #[test]
    fn test_new_grid() {
        let grid = Blockdata::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.size(), 12);
        assert!(grid.blocks().iter().all(|b| *b == Block::default()));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert_eq!(
            Blockdata::new(0, 5),
            Err(GridError::InvalidDimensions { width: 0, height: 5 })
        );
        assert_eq!(
            Blockdata::new(5, -1),
            Err(GridError::InvalidDimensions { width: 5, height: -1 })
        );
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Blockdata::new(2, 2).unwrap();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 2), None);

        // Writes outside the grid are silently dropped.
        grid.set(5, 5, block(7));
        assert!(grid.blocks().iter().all(|b| *b == Block::default()));
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut grid = Blockdata::new(3, 3).unwrap();
        grid.set(1, 1, block(42));
        grid.set(2, 2, block(7));

        let grown = grid.resized(5, 4, block(1)).unwrap();
        assert_eq!(grown.get(1, 1), Some(block(42)));
        assert_eq!(grown.get(2, 2), Some(block(7)));
        assert_eq!(grown.get(4, 3), Some(block(1)));

        let shrunk = grown.resized(2, 2, Block::default()).unwrap();
        assert_eq!(shrunk.get(1, 1), Some(block(42)));
        assert_eq!(shrunk.get(2, 2), None);
    }

    #[test]
    fn test_resize_round_trip_restores_overlap() {
        let mut grid = Blockdata::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                grid.set(x, y, block((y * 4 + x) as u16));
            }
        }
        let round_tripped = grid
            .resized(7, 2, Block::default())
            .unwrap()
            .resized(4, 4, Block::default())
            .unwrap();
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(round_tripped.get(x, y), grid.get(x, y));
            }
        }
    }

    #[test]
    fn test_bytes_round_trip() {
        let bits = BlockBits::default();
        let mut grid = Blockdata::new(3, 2).unwrap();
        grid.set(0, 0, Block::new(5, 1, 3));
        grid.set(2, 1, Block::new(0x3FF, 3, 15));

        let bytes = grid.to_bytes(&bits);
        assert_eq!(bytes.len(), 12);
        let decoded = Blockdata::from_bytes(&bytes, 3, 2, &bits).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_bytes_size_mismatch() {
        let bits = BlockBits::default();
        let err = Blockdata::from_bytes(&[0u8; 10], 3, 2, &bits);
        assert_eq!(
            err,
            Err(GridError::SizeMismatch {
                expected: 12,
                actual: 10
            })
        );
    }
}
