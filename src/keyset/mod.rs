pub mod block;
pub mod builder;
pub mod cell;
pub mod serializer;
pub mod summary;
pub mod translator;

pub use block::{Block, BLOCK_BYTES, BLOCK_CELLS, CELL_BYTES};
pub use builder::build_keyset;
pub use cell::Cell;
pub use summary::{BlockSummary, KeysetSummary};
pub use translator::{verify_records, Feed, KeyEvent, Lookup, Translator};

use crate::error::{ScanForgeError, SfResult};

/// The ordered block list. Block 0 is the root every decode starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyset {
    blocks: Vec<Block>,
}

impl Keyset {
    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        debug_assert!(!blocks.is_empty());
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn try_block(&self, index: usize) -> SfResult<&Block> {
        self.block(index).ok_or(ScanForgeError::BlockOutOfRange {
            block: index,
            blocks: self.block_count(),
        })
    }

    pub fn root(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Size of the serialized artifact.
    pub fn byte_len(&self) -> usize {
        self.blocks.len() * BLOCK_BYTES
    }
}
