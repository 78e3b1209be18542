mod filters;
mod locate;
mod output;

use std::path::Path;

use clap::{Parser, Subcommand};
use storefinder_core::{Catalog, Location, Session, SessionAction};
use tracing_subscriber::EnvFilter;

use crate::filters::FilterArgs;
use crate::locate::DeviceArgs;

#[derive(Debug, Parser)]
#[command(name = "storefinder")]
#[command(about = "Find nearby stores and resolve your current location")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search stores around the configured reference address
    Search {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Acquire the current location, then search around it
    Locate {
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show full details for one store
    Show {
        /// Store id (e.g. store001)
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = open_catalog(&config.catalog_path)?;
    let reference = Location::address(config.default_address.clone());

    match cli.command {
        Some(Commands::Search { filters }) => {
            let mut session = Session::new(catalog, reference);
            filters.apply(&mut session)?;
            println!("{}", output::render_results(&session, &config));
        }
        Some(Commands::Locate { device, filters }) => {
            locate::run_locate(&config, catalog, &device, &filters).await?;
        }
        Some(Commands::Show { id }) => {
            let mut session = Session::new(catalog, reference);
            session.dispatch(SessionAction::SelectStore(id.clone()));
            let store = session
                .selected_store()
                .ok_or_else(|| anyhow::anyhow!("store '{id}' not found"))?;
            println!("{}", output::render_store(store));
        }
        None => {
            let session = Session::new(catalog, reference);
            println!("{}", output::render_results(&session, &config));
        }
    }

    Ok(())
}

/// Load the configured catalog, falling back to the bundled reference
/// catalog when the file does not exist.
fn open_catalog(path: &Path) -> anyhow::Result<Catalog> {
    if path.exists() {
        let catalog = storefinder_core::load_catalog(path)?;
        tracing::info!(path = %path.display(), stores = catalog.len(), "catalog loaded");
        return Ok(catalog);
    }
    tracing::warn!(
        path = %path.display(),
        "catalog file not found; using bundled reference catalog"
    );
    Ok(storefinder_core::reference_catalog()?)
}

#[cfg(test)]
mod tests;
