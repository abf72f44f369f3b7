use crate::reports;
use clap::Args;
use scanforge::error::SfResult;
use scanforge::keyset::Keyset;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Keyset image produced by `build`
    pub image: String,

    /// List the populated cells of one block instead of the summary
    #[arg(short, long)]
    pub block: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &InspectArgs) -> SfResult<()> {
    info!("📂 Loading Image: {}", args.image);
    let keyset = Keyset::from_bytes(&fs::read(&args.image)?)?;
    let summary = keyset.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match args.block {
        Some(i) => {
            println!("{}", reports::block_table(keyset.try_block(i)?));
        }
        None => println!("{}", reports::summary_table(&summary)),
    }
    Ok(())
}
