use crate::constants::ConstantTable;
use crate::error::{hex_seq, ScanForgeError, SfResult};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A declared multi-byte lead-in (e.g. `E0`, or `E0 F0`) that gets its own block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrefixGroup(Vec<u8>);

impl PrefixGroup {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All but the last byte. Empty for single-byte groups.
    pub fn strict_prefix(&self) -> &[u8] {
        &self.0[..self.0.len().saturating_sub(1)]
    }

    pub fn last(&self) -> Option<u8> {
        self.0.last().copied()
    }
}

impl From<Vec<u8>> for PrefixGroup {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PrefixGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", hex_seq(&self.0))
    }
}

/// One directional (make or break) interpretation of a physical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScancodeRecord {
    pub label: String,
    pub sequence: Vec<u8>,
    pub key_code: u8,
    pub is_break: bool,
}

impl ScancodeRecord {
    pub fn new(label: impl Into<String>, sequence: Vec<u8>, key_code: u8, is_break: bool) -> Self {
        Self {
            label: label.into(),
            sequence,
            key_code,
            is_break,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub row: usize,
    pub name: String,
    pub make: Vec<u8>,
    pub brk: Vec<u8>,
}

/// The parsed scancode CSV: a header of prefix groups, then one row per key.
#[derive(Debug, Clone, Default)]
pub struct ScancodeTable {
    pub prefixes: Vec<PrefixGroup>,
    pub rows: Vec<TableRow>,
}

impl ScancodeTable {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let file = File::open(&path)?;
        let table = Self::from_reader(file)?;
        debug!(
            "Loaded scancode table {:?}: {} prefix groups, {} rows",
            path.as_ref(),
            table.prefixes.len(),
            table.rows.len()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> SfResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        let mut records = rdr.records();

        // Row 0: prefix groups
        if let Some(header) = records.next() {
            let header = header?;
            for (col, cell) in header.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let bytes = parse_hex_bytes(cell, &format!("header column {}", col + 1))?;
                table.prefixes.push(PrefixGroup::new(bytes));
            }
        }

        for (idx, result) in records.enumerate() {
            let row = idx + 1;
            let rec = result?;
            if rec.len() < 3 {
                return Err(ScanForgeError::MalformedRow {
                    row,
                    reason: format!("expected 3 fields, found {}", rec.len()),
                });
            }

            let name = rec[0].to_string();
            if name.is_empty() {
                return Err(ScanForgeError::MalformedRow {
                    row,
                    reason: "missing key name".to_string(),
                });
            }

            let make = parse_hex_bytes(&rec[1], &format!("row {} make", row))?;
            let brk = parse_hex_bytes(&rec[2], &format!("row {} break", row))?;
            table.rows.push(TableRow {
                row,
                name,
                make,
                brk,
            });
        }

        Ok(table)
    }

    /// Resolves key names and splits every row into its make and break records.
    pub fn resolve(&self, constants: &ConstantTable) -> SfResult<Vec<ScancodeRecord>> {
        let mut out = Vec::with_capacity(self.rows.len() * 2);

        for row in &self.rows {
            let key_code =
                constants
                    .get(&row.name)
                    .ok_or_else(|| ScanForgeError::UnresolvedKeycode {
                        name: row.name.clone(),
                        row: row.row,
                    })?;

            out.push(ScancodeRecord::new(
                row.name.clone(),
                row.make.clone(),
                key_code,
                false,
            ));
            out.push(ScancodeRecord::new(
                row.name.clone(),
                row.brk.clone(),
                key_code,
                true,
            ));
        }

        Ok(out)
    }
}

/// Splits `"E0 F0 1F"` into bytes. `0x` prefixes are tolerated.
pub fn parse_hex_bytes(s: &str, context: &str) -> SfResult<Vec<u8>> {
    s.split_whitespace()
        .map(|tok| {
            let digits = tok
                .strip_prefix("0x")
                .or_else(|| tok.strip_prefix("0X"))
                .unwrap_or(tok);
            u8::from_str_radix(digits, 16).map_err(|_| ScanForgeError::InvalidHex {
                token: tok.to_string(),
                context: context.to_string(),
            })
        })
        .collect()
}
