use super::cell::Cell;
use super::Keyset;
use crate::error::{ScanForgeError, SfResult};
use crate::table::ScancodeRecord;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyEvent {
    pub key_code: u8,
    pub is_break: bool,
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.is_break { "break" } else { "make" };
        write!(f, "{} 0x{:02X}", dir, self.key_code)
    }
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Byte was a lead-in; more input is needed.
    Pending,
    Key(KeyEvent),
    /// Terminal cell with no mapping.
    Unmapped,
}

/// Outcome of walking a whole sequence from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Key { event: KeyEvent, consumed: usize },
    Unmapped { consumed: usize },
    Incomplete,
}

/// Byte-at-a-time walk, the way an interrupt handler consumes the table:
/// follow redirects, and fall back to the root after every terminal cell.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    keyset: &'a Keyset,
    current: usize,
    pending: Vec<u8>,
}

impl<'a> Translator<'a> {
    pub fn new(keyset: &'a Keyset) -> Self {
        Self {
            keyset,
            current: 0,
            pending: Vec::new(),
        }
    }

    pub fn feed(&mut self, byte: u8) -> Feed {
        let cell = self.keyset.blocks()[self.current].get(byte);
        match cell {
            Cell::Redirect { block } => {
                self.current = block as usize;
                self.pending.push(byte);
                Feed::Pending
            }
            Cell::Literal { key_code, is_break } => {
                self.reset();
                Feed::Key(KeyEvent { key_code, is_break })
            }
            Cell::Empty => {
                self.reset();
                Feed::Unmapped
            }
        }
    }

    /// Lead-in bytes consumed since the last terminal cell.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.pending.clear();
    }
}

impl Keyset {
    pub fn lookup(&self, sequence: &[u8]) -> Lookup {
        let mut tr = Translator::new(self);
        for (i, &byte) in sequence.iter().enumerate() {
            match tr.feed(byte) {
                Feed::Pending => continue,
                Feed::Key(event) => {
                    return Lookup::Key {
                        event,
                        consumed: i + 1,
                    }
                }
                Feed::Unmapped => return Lookup::Unmapped { consumed: i + 1 },
            }
        }
        Lookup::Incomplete
    }
}

/// Every record must decode to its own event using exactly its own bytes.
pub fn verify_records(keyset: &Keyset, records: &[ScancodeRecord]) -> SfResult<()> {
    for rec in records {
        let expected = KeyEvent {
            key_code: rec.key_code,
            is_break: rec.is_break,
        };
        let reason = match keyset.lookup(&rec.sequence) {
            Lookup::Key { event, consumed }
                if event == expected && consumed == rec.sequence.len() =>
            {
                continue
            }
            Lookup::Key { event, consumed } => {
                format!("expected {}, decoded {} after {} bytes", expected, event, consumed)
            }
            Lookup::Unmapped { consumed } => format!("unmapped after {} bytes", consumed),
            Lookup::Incomplete => "sequence ends on a redirect".to_string(),
        };
        return Err(ScanForgeError::Verification {
            label: rec.label.clone(),
            sequence: rec.sequence.clone(),
            reason,
        });
    }

    debug!("Verified {} records against the keyset", records.len());
    Ok(())
}
