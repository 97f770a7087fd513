//! Folio portfolio client - Main Entry Point
//!
//! Wires the adapters into the navigation shell, loads the page named by
//! the first argument (default `/`) and prints it.

use std::sync::Arc;

use folio_application::ports::{PortfolioApi, PreferenceStorage};
use folio_application::{ApplicationResult, Page, Shell, ThemeStore};
use folio_domain::Route;
use folio_infrastructure::{
    ApiConfig, FilePreferenceStorage, MemoryPreferenceStorage, ReqwestPortfolioApi, SystemClock,
    SystemColorScheme,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Owner shown in the header and footer when `FOLIO_OWNER` is unset.
const DEFAULT_OWNER: &str = "Folio";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let route: Route = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("/")
        .parse()?;

    let page = run(route).await?;
    println!("{page}");

    Ok(())
}

/// Builds the shell from the environment and renders `route` once its
/// content has settled.
async fn run(route: Route) -> ApplicationResult<Page> {
    let config = ApiConfig::from_env()?;
    info!(
        base_url = %config.base_url(),
        "Starting Folio v{}",
        env!("CARGO_PKG_VERSION")
    );

    let api: Arc<dyn PortfolioApi> = Arc::new(ReqwestPortfolioApi::new(config)?);
    let theme = ThemeStore::initialize(preference_storage(), Arc::new(SystemColorScheme::from_env()));
    let owner = std::env::var("FOLIO_OWNER").unwrap_or_else(|_| DEFAULT_OWNER.to_string());
    let shell = Shell::new(owner, api, theme, Arc::new(SystemClock::new()));

    for load in shell.navigate(route) {
        if let Err(e) = load.await {
            warn!(error = %e, %route, "page load task failed");
        }
    }
    Ok(shell.render())
}

/// Opens the preference file, falling back to memory for this session.
fn preference_storage() -> Arc<dyn PreferenceStorage> {
    match FilePreferenceStorage::new() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            warn!(error = %e, "preferences will not persist");
            Arc::new(MemoryPreferenceStorage::new())
        }
    }
}
