use super::cell::Cell;

pub const BLOCK_CELLS: usize = 256;
pub const CELL_BYTES: usize = 2;
pub const BLOCK_BYTES: usize = BLOCK_CELLS * CELL_BYTES;

/// A 256-cell indirection table indexed by the raw scancode byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    index: usize,
    cells: [Cell; BLOCK_CELLS],
}

impl Block {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: [Cell::Empty; BLOCK_CELLS],
        }
    }

    pub(crate) fn from_cells(index: usize, cells: [Cell; BLOCK_CELLS]) -> Self {
        Self { index, cells }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, byte: u8) -> Cell {
        self.cells[byte as usize]
    }

    pub fn cells(&self) -> &[Cell; BLOCK_CELLS] {
        &self.cells
    }

    /// Writes `cell` at `byte`. An occupied cell may only be rewritten with the same value;
    /// on conflict the block is left untouched and the occupant is returned.
    pub fn place(&mut self, byte: u8, cell: Cell) -> Result<(), Cell> {
        let slot = &mut self.cells[byte as usize];
        if !slot.is_empty() && *slot != cell {
            return Err(*slot);
        }
        *slot = cell;
        Ok(())
    }

    /// Populated cells as `(byte, cell)` pairs, in byte order.
    pub fn populated(&self) -> impl Iterator<Item = (u8, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(b, c)| (b as u8, *c))
    }
}
