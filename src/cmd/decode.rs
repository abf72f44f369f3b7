use clap::Args;
use scanforge::error::{hex_seq, SfResult};
use scanforge::keyset::{Feed, Keyset, Translator};
use scanforge::table::parse_hex_bytes;
use std::fs;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Keyset image produced by `build`
    pub image: String,

    /// Raw scancode bytes in hex, e.g. `E0 F0 1F`
    #[arg(required = true, num_args = 1..)]
    pub bytes: Vec<String>,
}

pub fn run(args: &DecodeArgs) -> SfResult<()> {
    let input = parse_hex_bytes(&args.bytes.join(" "), "command line")?;
    let keyset = Keyset::from_bytes(&fs::read(&args.image)?)?;
    let mut tr = Translator::new(&keyset);

    for byte in input {
        let mut seq = tr.pending().to_vec();
        seq.push(byte);
        match tr.feed(byte) {
            Feed::Pending => {}
            Feed::Key(event) => println!("{:<12} {}", hex_seq(&seq), event),
            Feed::Unmapped => println!("{:<12} unmapped", hex_seq(&seq)),
        }
    }

    if !tr.pending().is_empty() {
        warn!("⚠️  Incomplete sequence at end of input: {}", hex_seq(tr.pending()));
    }
    Ok(())
}
