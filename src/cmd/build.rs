use crate::reports;
use clap::{ArgMatches, Args};
use scanforge::api;
use scanforge::config::BuildConfig;
use scanforge::error::SfResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: BuildConfig,

    /// JSON build settings; flags given on the command line take precedence
    #[arg(long)]
    pub config_file: Option<String>,
}

pub fn run(args: &BuildArgs, matches: Option<&ArgMatches>) -> SfResult<()> {
    let config = match &args.config_file {
        Some(path) => {
            info!("⚙️  Loading Config: {}", path);
            let mut file_config = BuildConfig::load_from_file(path)?;
            if let Some(m) = matches {
                file_config.merge_from_cli(&args.config, m);
            }
            file_config
        }
        None => args.config.clone(),
    };

    let compiled = api::compile(&config)?;
    api::emit(&compiled.keyset, &config)?;

    let table = reports::summary_table(&compiled.summary);
    // Keep stdout clean when the artifact itself goes there.
    if config.writes_to_stdout() {
        eprintln!("{}", table);
    } else {
        println!("{}", table);
    }
    Ok(())
}
