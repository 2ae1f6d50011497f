//! FloatKit server binary.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::EnvFilter,
};

use {
    floatkit_gateway::AppState,
    floatkit_store::{SledStore, WidgetStore},
};

#[derive(Debug, Parser)]
#[command(name = "floatkit", about = "Floating contact-channel widget server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "FLOATKIT_LISTEN", default_value = "127.0.0.1:8190")]
    listen: SocketAddr,

    /// Directory for the settings database. Defaults to the platform data
    /// dir (e.g. ~/.local/share/floatkit).
    #[arg(long, env = "FLOATKIT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Site name substituted for [SITE_NAME] in message templates.
    #[arg(long, env = "FLOATKIT_SITE_NAME", default_value = "FloatKit")]
    site_name: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (the default when no subcommand is given).
    Serve,
    /// Remove stored widget settings and render caches.
    Uninstall {
        /// Limit removal to one tenant; without this, every tenant's
        /// widget data is swept.
        #[arg(long)]
        tenant: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => directories::ProjectDirs::from("", "", "floatkit")
            .context("could not determine a data directory; pass --data-dir")?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;

    let store = SledStore::open(data_dir.join("settings"))
        .with_context(|| format!("opening settings store in {}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), "settings store opened");

    let store = WidgetStore::new(Arc::new(store));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = Arc::new(AppState {
                store,
                site_name: args.site_name,
            });
            floatkit_gateway::serve(args.listen, state).await
        },
        Command::Uninstall { tenant } => {
            match tenant {
                Some(tenant) => {
                    store.uninstall(&tenant).await?;
                    info!(tenant, "widget data removed");
                },
                None => {
                    store.uninstall_all().await?;
                    info!("widget data removed for all tenants");
                },
            }
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_serve() {
        let args = Args::try_parse_from(["floatkit"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn uninstall_accepts_optional_tenant() {
        let args = Args::try_parse_from(["floatkit", "uninstall", "--tenant", "acme"]).unwrap();
        match args.command {
            Some(Command::Uninstall { tenant }) => assert_eq!(tenant.as_deref(), Some("acme")),
            other => panic!("unexpected command: {other:?}"),
        }

        let args = Args::try_parse_from(["floatkit", "uninstall"]).unwrap();
        assert!(matches!(args.command, Some(Command::Uninstall { tenant: None })));
    }
}
