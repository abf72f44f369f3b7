#![allow(dead_code)]

use scanforge::constants::ConstantTable;
use scanforge::table::{PrefixGroup, ScancodeRecord};

pub const A: u8 = 0x62;
pub const RGUI: u8 = 0xa6;
pub const LGUI: u8 = 0xa2;

pub fn make(label: &str, seq: &[u8], key_code: u8) -> ScancodeRecord {
    ScancodeRecord::new(label, seq.to_vec(), key_code, false)
}

pub fn brk(label: &str, seq: &[u8], key_code: u8) -> ScancodeRecord {
    ScancodeRecord::new(label, seq.to_vec(), key_code, true)
}

pub fn groups(raw: &[&[u8]]) -> Vec<PrefixGroup> {
    raw.iter().map(|g| PrefixGroup::new(g.to_vec())).collect()
}

/// The three lead-ins of scancode set 2.
pub fn set2_groups() -> Vec<PrefixGroup> {
    groups(&[&[0xf0], &[0xe0], &[0xe0, 0xf0]])
}

pub fn constants(pairs: &[(&str, u8)]) -> ConstantTable {
    pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
}

/// A handful of real set 2 keys: plain, extended, and their releases.
pub fn set2_records() -> Vec<ScancodeRecord> {
    vec![
        make("A", &[0x1c], A),
        brk("A", &[0xf0, 0x1c], A),
        make("ESC", &[0x76], 0x01),
        brk("ESC", &[0xf0, 0x76], 0x01),
        make("LGUI", &[0xe0, 0x1f], LGUI),
        brk("LGUI", &[0xe0, 0xf0, 0x1f], LGUI),
        make("RGUI", &[0xe0, 0x27], RGUI),
        brk("RGUI", &[0xe0, 0xf0, 0x27], RGUI),
    ]
}
