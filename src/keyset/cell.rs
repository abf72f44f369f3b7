use std::fmt;

/// Flag byte bit 0: the literal is a release event.
pub const FLAG_BREAK: u8 = 0x01;
/// Flag byte bit 7: the cell redirects to another block.
pub const FLAG_REDIRECT: u8 = 0x80;

const FLAG_RESERVED: u8 = !(FLAG_BREAK | FLAG_REDIRECT);

/// One entry of a 256-cell block.
///
/// On the wire every cell is `[value, flags]`. `Empty` and a literal with key
/// code 0 share the encoding `[0x00, 0x00]`, which the driver reads as "no key".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Literal {
        key_code: u8,
        is_break: bool,
    },
    Redirect {
        block: u8,
    },
}

impl Cell {
    pub fn literal(key_code: u8, is_break: bool) -> Self {
        Self::Literal { key_code, is_break }
    }

    pub fn redirect(block: u8) -> Self {
        Self::Redirect { block }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn to_wire(self) -> [u8; 2] {
        match self {
            Self::Empty => [0x00, 0x00],
            Self::Literal { key_code, is_break } => {
                [key_code, if is_break { FLAG_BREAK } else { 0x00 }]
            }
            Self::Redirect { block } => [block, FLAG_REDIRECT],
        }
    }

    /// Returns `None` when the flag byte carries bits the format does not define.
    pub fn from_wire(bytes: [u8; 2]) -> Option<Self> {
        let [value, flags] = bytes;
        if flags & FLAG_RESERVED != 0 {
            return None;
        }
        match (flags & FLAG_REDIRECT != 0, flags & FLAG_BREAK != 0) {
            (true, true) => None,
            (true, false) => Some(Self::Redirect { block: value }),
            (false, is_break) if value == 0 && !is_break => Some(Self::Empty),
            (false, is_break) => Some(Self::Literal {
                key_code: value,
                is_break,
            }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Literal {
                key_code,
                is_break: false,
            } => write!(f, "make 0x{:02X}", key_code),
            Self::Literal {
                key_code,
                is_break: true,
            } => write!(f, "break 0x{:02X}", key_code),
            Self::Redirect { block } => write!(f, "-> block {}", block),
        }
    }
}
