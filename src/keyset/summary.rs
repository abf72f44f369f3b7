use super::cell::Cell;
use super::{Keyset, BLOCK_BYTES};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub index: usize,
    pub makes: usize,
    pub breaks: usize,
    pub redirects: usize,
    /// `(scancode byte, target block)` for every redirect cell.
    pub links: Vec<(u8, u8)>,
}

impl BlockSummary {
    pub fn literals(&self) -> usize {
        self.makes + self.breaks
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysetSummary {
    pub block_count: usize,
    pub byte_len: usize,
    pub blocks: Vec<BlockSummary>,
}

impl Keyset {
    pub fn summary(&self) -> KeysetSummary {
        let blocks = self
            .blocks()
            .iter()
            .map(|block| {
                let mut s = BlockSummary {
                    index: block.index(),
                    ..Default::default()
                };
                for (byte, cell) in block.populated() {
                    match cell {
                        Cell::Literal {
                            is_break: false, ..
                        } => s.makes += 1,
                        Cell::Literal { is_break: true, .. } => s.breaks += 1,
                        Cell::Redirect { block } => {
                            s.redirects += 1;
                            s.links.push((byte, block));
                        }
                        Cell::Empty => {}
                    }
                }
                s
            })
            .collect();

        KeysetSummary {
            block_count: self.block_count(),
            byte_len: self.block_count() * BLOCK_BYTES,
            blocks,
        }
    }
}
