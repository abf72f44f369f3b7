use super::block::{Block, BLOCK_CELLS};
use super::cell::Cell;
use super::Keyset;
use crate::error::{ScanForgeError, SfResult};
use crate::table::{PrefixGroup, ScancodeRecord};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// Builds the block list for `records`.
///
/// Block 0 is the root. Prefix group `i` (declaration order) owns block `i + 1`.
/// Legacy `sc2.bin` images stack prefix blocks in reverse declaration order, so
/// they are not byte-identical to ours even though both decode the same way.
/// Every single-byte record lands in the root; every longer record must be one
/// byte longer than exactly one declared group and lands in that group's block.
/// Groups are then chained together with redirect cells.
pub fn build_keyset(records: &[ScancodeRecord], prefixes: &[PrefixGroup]) -> SfResult<Keyset> {
    validate_prefixes(prefixes)?;

    for rec in records {
        if rec.sequence.is_empty() {
            return Err(ScanForgeError::EmptySequence {
                context: format!(
                    "{} sequence of '{}'",
                    if rec.is_break { "break" } else { "make" },
                    rec.label
                ),
            });
        }
    }

    let mut consumed = vec![false; records.len()];

    // 1. Singles go straight into the root
    let mut root = Block::new(0);
    for (idx, rec) in records.iter().enumerate() {
        if rec.sequence.len() == 1 {
            let cell = Cell::literal(rec.key_code, rec.is_break);
            place(&mut root, rec.sequence[0], cell, &rec.label, &rec.sequence)?;
            consumed[idx] = true;
        }
    }
    debug!(
        "Root block: {} single-byte records",
        consumed.iter().filter(|&&c| c).count()
    );

    // 2. One block per group; groups only touch their own block here
    let populated = prefixes
        .par_iter()
        .enumerate()
        .map(|(i, group)| populate_group(i + 1, group, records))
        .collect::<SfResult<Vec<_>>>()?;

    let mut blocks = Vec::with_capacity(prefixes.len() + 1);
    blocks.push(root);
    for (block, taken) in populated {
        for idx in taken {
            consumed[idx] = true;
        }
        blocks.push(block);
    }

    // 3. Redirects, parents before children
    for (i, parent) in link_order(prefixes)? {
        let group = &prefixes[i];
        let Some(byte) = group.last() else {
            continue;
        };
        let cell = Cell::redirect((i + 1) as u8);
        place(&mut blocks[parent], byte, cell, "prefix group", group.bytes())?;
        debug!("Linked {}: block {} -> block {}", group, parent, i + 1);
    }

    // 4. Nothing may be left over
    if let Some(idx) = consumed.iter().position(|&c| !c) {
        let rec = &records[idx];
        return Err(ScanForgeError::UnmatchedSequence {
            label: rec.label.clone(),
            sequence: rec.sequence.clone(),
        });
    }

    info!(
        "Built keyset: {} records in {} blocks",
        records.len(),
        blocks.len()
    );

    Ok(Keyset::from_blocks(blocks))
}

/// `Block::place`, naming the record (or group) that lost on conflict.
fn place(block: &mut Block, byte: u8, cell: Cell, label: &str, sequence: &[u8]) -> SfResult<()> {
    let index = block.index();
    block
        .place(byte, cell)
        .map_err(|existing| ScanForgeError::CellCollision {
            block: index,
            byte,
            existing: existing.to_string(),
            incoming: cell.to_string(),
            label: label.to_string(),
            sequence: sequence.to_vec(),
        })
}

fn validate_prefixes(prefixes: &[PrefixGroup]) -> SfResult<()> {
    if prefixes.len() + 1 > BLOCK_CELLS {
        return Err(ScanForgeError::BlockLimit {
            blocks: prefixes.len() + 1,
        });
    }

    let mut seen = HashSet::new();
    for (i, group) in prefixes.iter().enumerate() {
        if group.is_empty() {
            return Err(ScanForgeError::EmptySequence {
                context: format!("prefix group #{}", i + 1),
            });
        }
        if !seen.insert(group.bytes()) {
            return Err(ScanForgeError::DuplicatePrefix {
                prefix: group.bytes().to_vec(),
            });
        }
    }
    Ok(())
}

fn populate_group(
    index: usize,
    group: &PrefixGroup,
    records: &[ScancodeRecord],
) -> SfResult<(Block, Vec<usize>)> {
    let mut block = Block::new(index);
    let mut taken = Vec::new();

    for (idx, rec) in records.iter().enumerate() {
        if rec.sequence.len() != group.len() + 1 || !rec.sequence.starts_with(group.bytes()) {
            continue;
        }
        let suffix = rec.sequence[group.len()];
        let cell = Cell::literal(rec.key_code, rec.is_break);
        place(&mut block, suffix, cell, &rec.label, &rec.sequence)?;
        taken.push(idx);
    }

    debug!("Block {} {}: {} records", index, group, taken.len());
    Ok((block, taken))
}

/// Topological order over "is strict prefix of": a group is only linked once
/// the block owning its strict prefix is. Single-byte groups come first in
/// declaration order; every other group follows its parent, siblings in
/// declaration order.
///
/// Yields `(group, parent block)` pairs.
fn link_order(prefixes: &[PrefixGroup]) -> SfResult<Vec<(usize, usize)>> {
    let by_bytes: HashMap<&[u8], usize> = prefixes
        .iter()
        .enumerate()
        .map(|(i, g)| (g.bytes(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); prefixes.len()];
    let mut queue = VecDeque::new();

    for (i, group) in prefixes.iter().enumerate() {
        if group.len() == 1 {
            queue.push_back((i, 0));
            continue;
        }
        match by_bytes.get(group.strict_prefix()) {
            Some(&parent) => children[parent].push(i),
            None => {
                return Err(ScanForgeError::UnknownPrefix {
                    prefix: group.bytes().to_vec(),
                })
            }
        }
    }

    let mut order = Vec::with_capacity(prefixes.len());
    while let Some((i, parent)) = queue.pop_front() {
        order.push((i, parent));
        queue.extend(children[i].iter().map(|&c| (c, i + 1)));
    }

    Ok(order)
}
