use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::config::Config;
use crate::services::{ActivityLogger, LocalFsCache};
use crate::tools::feedback::StdoutSink;
use crate::tools::fetch::ReqwestFetcher;
use crate::workflow::{Outcome, Workflow};

#[derive(Parser)]
#[command(name = "wsaw", version, about = "Search the sites of a WebStack navigation page (Alfred Script Filter)")]
pub struct Cli {
    /// Re-scrape the page even if the cached copy is still fresh
    #[arg(long)]
    refresh: bool,
    /// Print the activity log instead of searching
    #[arg(long)]
    logs: bool,
    /// With --logs, only show errors
    #[arg(long, requires = "logs")]
    errors: bool,
    /// `[directory-or-term] [term]`; more than two terms emits nothing
    #[arg(allow_hyphen_values = true)]
    terms: Vec<String>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let activity = ActivityLogger::new(&config.data_dir).context("opening activity log")?;

    if cli.logs {
        for entry in activity.read_logs(config.source_host(), cli.errors)? {
            println!("{entry}");
        }
        return Ok(());
    }

    let cache = LocalFsCache::new(&config.cache_dir).context("opening cache directory")?;
    let fetcher = Arc::new(ReqwestFetcher::new()?);
    let mut workflow = Workflow::new(config, cache, fetcher, StdoutSink::default())
        .with_activity_log(activity)
        .force_refresh(cli.refresh);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    match runtime.block_on(workflow.run(&cli.terms))? {
        Outcome::Skipped => log::debug!("nothing emitted"),
        Outcome::Emitted { items } => log::debug!("emitted {items} items"),
    }
    Ok(())
}
