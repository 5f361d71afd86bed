use crate::config::Settings;
use crate::report::{collect_work_items, save_report};
use crate::tfs::changesets::ChangesetSource;
use crate::tfs::client::TfsServiceClient;
use crate::tfs::models::TfsRequest;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub changesets: usize,
    pub work_items: usize,
    pub output: PathBuf,
}

/// Query the configured reporting service and write the work item report.
pub async fn run(settings: &Settings) -> Result<ReportSummary> {
    log::info!("Using serviceUrl: {}", settings.service_url);
    let client = TfsServiceClient::new(settings.service_url.as_str());
    generate_report(&client, settings).await
}

pub async fn generate_report<S: ChangesetSource>(
    source: &S,
    settings: &Settings,
) -> Result<ReportSummary> {
    let request = TfsRequest::from(settings);

    log::info!("Calling service...");
    let changesets = source
        .query_changesets(&request)
        .await
        .context("failed to query changesets from the reporting service")?;
    log::info!(
        "Got {} items back. Formatting using template...",
        changesets.len()
    );

    let work_items = collect_work_items(&changesets);

    log::info!("Saving to file: {}", settings.save_to_file.display());
    save_report(&settings.save_to_file, &work_items).context("failed to save the report")?;

    Ok(ReportSummary {
        changesets: changesets.len(),
        work_items: work_items.len(),
        output: settings.save_to_file.clone(),
    })
}
