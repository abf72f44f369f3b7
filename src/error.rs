use thiserror::Error;

/// Renders a byte sequence the way scancode tables write it: `E0 F0 1F`.
pub fn hex_seq(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Error, Debug)]
pub enum ScanForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unresolved key code '{name}' (table row {row})")]
    UnresolvedKeycode { name: String, row: usize },

    #[error("Empty scancode sequence: {context}")]
    EmptySequence { context: String },

    #[error("Prefix group [{}] has no block for its strict prefix", hex_seq(.prefix))]
    UnknownPrefix { prefix: Vec<u8> },

    #[error("Sequence [{}] of '{label}' matches no declared prefix group", hex_seq(.sequence))]
    UnmatchedSequence { label: String, sequence: Vec<u8> },

    #[error(
        "Cell collision in block {block} at 0x{byte:02X}: {existing} vs {incoming} from '{label}' [{}]",
        hex_seq(.sequence)
    )]
    CellCollision {
        block: usize,
        byte: u8,
        existing: String,
        incoming: String,
        /// Key name of the incoming record, or the prefix group being linked.
        label: String,
        sequence: Vec<u8>,
    },

    #[error("Invalid hex byte '{token}' ({context})")]
    InvalidHex { token: String, context: String },

    #[error("Malformed table row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Constant '{name}' = {value} does not fit in a key code byte")]
    InvalidConstant { name: String, value: String },

    #[error("Prefix group [{}] is declared more than once", hex_seq(.prefix))]
    DuplicatePrefix { prefix: Vec<u8> },

    #[error("{blocks} blocks cannot be addressed by an 8-bit redirect index")]
    BlockLimit { blocks: usize },

    #[error("Invalid keyset image: {0}")]
    InvalidImage(String),

    #[error("Block {block} out of range (image has {blocks} blocks)")]
    BlockOutOfRange { block: usize, blocks: usize },

    #[error("Verification failed for '{label}' [{}]: {reason}", hex_seq(.sequence))]
    Verification {
        label: String,
        sequence: Vec<u8>,
        reason: String,
    },
}

pub type SfResult<T> = Result<T, ScanForgeError>;
