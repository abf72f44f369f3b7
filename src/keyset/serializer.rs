use super::block::{Block, BLOCK_BYTES, BLOCK_CELLS, CELL_BYTES};
use super::cell::Cell;
use super::Keyset;
use crate::error::{ScanForgeError, SfResult};
use std::io::Write;

impl Keyset {
    /// Concatenates every block's cells, `[value, flags]` per cell, in block order.
    /// No header, no padding: the consumer knows block 0 is the root.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for block in self.blocks() {
            for cell in block.cells() {
                out.extend_from_slice(&cell.to_wire());
            }
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> SfResult<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Parses an artifact produced by [`Keyset::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SfResult<Self> {
        if bytes.is_empty() || bytes.len() % BLOCK_BYTES != 0 {
            return Err(ScanForgeError::InvalidImage(format!(
                "{} bytes is not a whole number of {}-byte blocks",
                bytes.len(),
                BLOCK_BYTES
            )));
        }

        let count = bytes.len() / BLOCK_BYTES;
        if count > BLOCK_CELLS {
            return Err(ScanForgeError::InvalidImage(format!(
                "{} blocks exceed the 8-bit redirect range",
                count
            )));
        }

        let mut blocks = Vec::with_capacity(count);
        for (index, chunk) in bytes.chunks_exact(BLOCK_BYTES).enumerate() {
            let mut cells = [Cell::Empty; BLOCK_CELLS];
            for (byte, pair) in chunk.chunks_exact(CELL_BYTES).enumerate() {
                let cell = Cell::from_wire([pair[0], pair[1]]).ok_or_else(|| {
                    ScanForgeError::InvalidImage(format!(
                        "block {} cell 0x{:02X}: undefined flags 0x{:02X}",
                        index, byte, pair[1]
                    ))
                })?;
                if let Cell::Redirect { block } = cell {
                    if block as usize >= count {
                        return Err(ScanForgeError::InvalidImage(format!(
                            "block {} cell 0x{:02X} redirects to missing block {}",
                            index, byte, block
                        )));
                    }
                }
                cells[byte] = cell;
            }
            blocks.push(Block::from_cells(index, cells));
        }

        Ok(Keyset::from_blocks(blocks))
    }
}
