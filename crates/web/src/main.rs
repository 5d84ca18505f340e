use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use roster_common::{ReqwestTransport, RosterApp, RosterClient, RosterConfig};
use roster_web::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Config file (ROSTER_CONFIG or ~/.roster/config.toml), then ROSTER_* env overrides
    let config_path = std::env::var_os("ROSTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(roster_common::default_config_path);
    let mut config = RosterConfig::load(&config_path)?;
    config.apply_env()?;

    let web_addr: SocketAddr = config.web.listen.parse()?;
    let endpoint = config.endpoint()?;

    info!(
        "Starting Roster console on http://{} (api: {}, reset policy: {})",
        web_addr,
        endpoint.collection_url(),
        config.form.reset_policy
    );

    let transport = Arc::new(ReqwestTransport::new(config.request_timeout())?);
    let app = RosterApp::new(RosterClient::new(transport, endpoint), config.form.reset_policy);

    let server = WebServer::new(app);
    server.bootstrap().await;
    server.serve(web_addr).await
}
