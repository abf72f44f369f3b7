use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scanforge::error::hex_seq;
use scanforge::keyset::{Block, Cell as KeyCell, KeysetSummary};
use std::collections::VecDeque;

/// Lead-in bytes that reach each block from the root, found by walking redirect links.
pub fn lead_ins(summary: &KeysetSummary) -> Vec<Option<Vec<u8>>> {
    let mut paths: Vec<Option<Vec<u8>>> = vec![None; summary.block_count];
    if paths.is_empty() {
        return paths;
    }
    paths[0] = Some(Vec::new());

    let mut queue = VecDeque::from([0usize]);
    while let Some(i) = queue.pop_front() {
        let Some(base) = paths[i].clone() else {
            continue;
        };
        for &(byte, target) in &summary.blocks[i].links {
            let t = target as usize;
            if t < paths.len() && paths[t].is_none() {
                let mut p = base.clone();
                p.push(byte);
                paths[t] = Some(p);
                queue.push_back(t);
            }
        }
    }
    paths
}

pub fn summary_table(summary: &KeysetSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Block").add_attribute(Attribute::Bold),
        Cell::new("Lead-in").fg(Color::Cyan),
        Cell::new("Make").fg(Color::Green),
        Cell::new("Break").fg(Color::Red),
        Cell::new("Redir"),
        Cell::new("Links"),
    ]);

    for i in [0, 2, 3, 4] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let paths = lead_ins(summary);
    for (b, path) in summary.blocks.iter().zip(paths) {
        let lead_in = match path {
            Some(p) if p.is_empty() => "(root)".to_string(),
            Some(p) => hex_seq(&p),
            None => "unreachable".to_string(),
        };
        let links = b
            .links
            .iter()
            .map(|(byte, target)| format!("{:02X}->{}", byte, target))
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(vec![
            Cell::new(b.index).add_attribute(Attribute::Bold),
            Cell::new(lead_in).fg(Color::Cyan),
            Cell::new(b.makes).fg(Color::Green),
            Cell::new(b.breaks).fg(Color::Red),
            Cell::new(b.redirects),
            Cell::new(links),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("{} bytes", summary.byte_len)),
        Cell::new(summary.blocks.iter().map(|b| b.makes).sum::<usize>()),
        Cell::new(summary.blocks.iter().map(|b| b.breaks).sum::<usize>()),
        Cell::new(summary.blocks.iter().map(|b| b.redirects).sum::<usize>()),
        Cell::new(""),
    ]);

    table
}

/// Populated cells of one block, eight per row.
pub fn block_table(block: &Block) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let cells: Vec<Cell> = block
        .populated()
        .map(|(byte, cell)| {
            let text = format!("{:02X}  {}", byte, cell);
            let c = Cell::new(text);
            match cell {
                KeyCell::Redirect { .. } => c.fg(Color::Cyan),
                KeyCell::Literal { is_break: true, .. } => c.fg(Color::Red),
                _ => c,
            }
        })
        .collect();

    if cells.is_empty() {
        table.add_row(vec![Cell::new(format!("block {}: empty", block.index()))]);
        return table;
    }

    let mut row = Vec::with_capacity(8);
    for c in cells {
        row.push(c);
        if row.len() == 8 {
            table.add_row(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        table.add_row(row);
    }
    table
}
