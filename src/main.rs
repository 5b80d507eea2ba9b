use anyhow::{Error, Result};
use clap::Parser;
use inmet_bdmep::{
    cli::{command, years::expand_years, Cli},
    download::{DownloadOutcome, Fetcher},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inmet_bdmep=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let years = expand_years(cli.years.as_slice())?;

    let fetcher = Fetcher::new(cli.base_url)
        .with_blocksize(usize::try_from(cli.blocksize)?)
        .with_progress(!cli.quiet);

    for outcome in command::fetch(&fetcher, &years, &cli.datadir).await? {
        match outcome {
            DownloadOutcome::Downloaded { .. } => {
                println!("File saved to `{}`", outcome.path().display())
            }
            DownloadOutcome::AlreadyPresent(_) => {
                println!("File already present at `{}`", outcome.path().display())
            }
        }
    }

    Ok(())
}
