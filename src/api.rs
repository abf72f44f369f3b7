use crate::config::{BuildConfig, OutputFormat};
use crate::constants::ConstantTable;
use crate::error::SfResult;
use crate::keyset::{build_keyset, verify_records, Keyset, KeysetSummary};
use crate::table::{ScancodeRecord, ScancodeTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};

/// Everything a successful run produced, before it is written anywhere.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub keyset: Keyset,
    pub records: Vec<ScancodeRecord>,
    pub summary: KeysetSummary,
}

/// Service: constants + table -> verified keyset.
pub fn compile(config: &BuildConfig) -> SfResult<Compiled> {
    info!("📂 Loading Constants: {}", config.constants);
    let constants = ConstantTable::load_from_file(&config.constants, &config.define_prefix)?;
    if constants.is_empty() {
        warn!(
            "⚠️  No '#define {}*' constants found in {}",
            config.define_prefix, config.constants
        );
    }

    info!("📂 Loading Scancode Table: {}", config.table);
    let table = ScancodeTable::load_from_file(&config.table)?;

    compile_table(&table, &constants, config.skip_verify)
}

pub fn compile_table(
    table: &ScancodeTable,
    constants: &ConstantTable,
    skip_verify: bool,
) -> SfResult<Compiled> {
    let records = table.resolve(constants)?;
    let keyset = build_keyset(&records, &table.prefixes)?;

    if skip_verify {
        warn!("⚠️  Skipping record verification.");
    } else {
        verify_records(&keyset, &records)?;
    }

    let summary = keyset.summary();
    Ok(Compiled {
        keyset,
        records,
        summary,
    })
}

/// Sink: writes the artifact to the configured path (or stdout).
pub fn emit(keyset: &Keyset, config: &BuildConfig) -> SfResult<()> {
    if config.writes_to_stdout() {
        let stdout = io::stdout();
        write_artifact(keyset, config.format, stdout.lock())?;
    } else {
        let file = File::create(&config.output)?;
        write_artifact(keyset, config.format, BufWriter::new(file))?;
    }

    info!(
        "💾 Wrote {} bytes ({}) to {}",
        keyset.byte_len(),
        config.format,
        config.output
    );
    Ok(())
}

pub fn write_artifact<W: Write>(keyset: &Keyset, format: OutputFormat, mut writer: W) -> SfResult<()> {
    match format {
        OutputFormat::Binary => keyset.write_to(writer),
        OutputFormat::Hex => {
            writer.write_all(hex_dump(&keyset.to_bytes()).as_bytes())?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// `00000000: 00 00 01 80 ...`, 16 bytes per line.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3 + bytes.len() / 16 * 11);
    for (line, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        out.push_str(&format!("{:08x}: {}\n", line * 16, hex.join(" ")));
    }
    out
}
