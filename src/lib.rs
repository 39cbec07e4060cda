use tracing::debug;

pub mod config;
pub mod errors;
pub mod logging;
pub mod monit_client;
pub mod report;

use config::Config;
use errors::ProbeError;
use monit_client::StatusProvider;
use report::Report;

/// Run the probe pipeline: fetch the status document, parse it, narrow it
/// to the requested service/group, and evaluate what is left.
pub async fn run_probe(
    config: &Config,
    provider: &dyn StatusProvider,
) -> Result<Report, ProbeError> {
    let body = provider.fetch_status().await?;
    let services = monit_client::parse_services(&body)?;
    debug!(count = services.len(), "parsed monit services");

    let services = report::filter_services(
        services,
        config.group.as_deref(),
        config.service.as_deref(),
    );
    Ok(report::evaluate(&services))
}
