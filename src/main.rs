use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tfsinfo2html::config::{ConfigOverrides, Settings};
use tfsinfo2html::pipeline;

/// Render the work items linked to a date range of TFS changesets as an HTML list.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let settings =
        Settings::load(&args.overrides).context("there was a problem with your config file")?;
    let summary = pipeline::run(&settings).await?;
    log::info!(
        "Wrote {} work items from {} changesets to {}",
        summary.work_items,
        summary.changesets,
        summary.output.display()
    );
    Ok(())
}
