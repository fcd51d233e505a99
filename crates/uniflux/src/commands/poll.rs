use chrono::Utc;
use tracing::{debug, info};

use uniflux_api::LegacyClient;
use uniflux_config::Config;

use crate::cli::GlobalOpts;
use crate::commands::project_devices;
use crate::error::CliError;
use crate::output;

/// One polling cycle: log in, fetch `stat/device`, project, print.
pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = load_config(global)?;
    let url = config.controller_url()?;
    let (username, password) = config.resolve_credentials()?;
    let transport = config.transport();
    let api_err = |e| CliError::from_api(e, url.as_str());

    let client = LegacyClient::connect(
        url.clone(),
        config.site.clone(),
        config.platform.fixed(),
        &transport,
    )
    .await
    .map_err(api_err)?;
    debug!(platform = ?client.platform(), "controller platform");

    client.login(&username, &password).await.map_err(api_err)?;

    let raw = client.list_devices_raw().await;
    if let Err(e) = client.logout().await {
        debug!(error = %e, "logout failed");
    }
    let raw = raw.map_err(api_err)?;
    info!(devices = raw.len(), site = %config.site, "fetched devices");

    let series = project_devices(&raw, &config.site, Utc::now());
    output::write_all(&mut std::io::stdout().lock(), &series, global.output)
}

/// Config file and environment, then command-line overrides.
fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = Config::load(global.config.as_deref())?;

    if let Some(ref controller) = global.controller {
        config.controller.clone_from(controller);
    }
    if let Some(ref site) = global.site {
        config.site.clone_from(site);
    }
    if global.insecure {
        config.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }

    config.validate()?;
    Ok(config)
}
