mod cli;

use crate::cli::{Command, CLI};
use anyhow::{anyhow, Context};
use clap::Parser;
use short_core::{CreateParams, Creator, ExpirationPolicy, ResolveError, Resolver};
use short_storage::{
    Backend, LinkStore, MySqlLinkStore, ReadLinkStore, SqliteLinkStore, StoreConfig, TimeoutStore,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = CLI::parse();
    let config = cli.store_config();
    let backend = config
        .backend()
        .ok_or_else(|| anyhow!("unsupported database url, expected mysql:// or sqlite:"))?;

    info!(
        backend = %backend,
        max_connections = config.max_connections,
        op_timeout = ?config.op_timeout,
        "opening link store"
    );

    match backend {
        Backend::MySql => {
            let store = MySqlLinkStore::connect(&config)
                .await
                .context("connecting to mysql")?;
            let result = match cli.command {
                Command::Init => store.init_schema().await.map_err(anyhow::Error::from),
                command => run(store.clone(), &config, command).await,
            };
            store.close().await;
            result
        }
        Backend::Sqlite => {
            let store = SqliteLinkStore::connect(&config)
                .await
                .context("opening sqlite database")?;
            let result = match cli.command {
                Command::Init => store.init_schema().await.map_err(anyhow::Error::from),
                command => run(store.clone(), &config, command).await,
            };
            store.close().await;
            result
        }
    }
}

async fn run<S: LinkStore>(store: S, config: &StoreConfig, command: Command) -> anyhow::Result<()> {
    let store = Arc::new(TimeoutStore::new(store, config.op_timeout));

    match command {
        Command::Init => Ok(()),
        Command::Create {
            alias,
            url,
            expire_at,
        } => {
            let record = Creator::from_shared(store)
                .create(CreateParams {
                    alias,
                    original_url: url,
                    expiration: ExpirationPolicy::AtTimestamp(expire_at),
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Command::Get { alias } => {
            let record = store.get_by_alias(&alias).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Command::Exists { alias } => {
            println!("{}", store.exists_by_alias(&alias).await?);
            Ok(())
        }
        Command::Resolve { alias } => match Resolver::from_shared(store).resolve(&alias).await {
            Ok(record) => {
                println!("{}", record.original_url);
                Ok(())
            }
            Err(err @ (ResolveError::NotFound(_) | ResolveError::Expired { .. })) => {
                Err(anyhow!("not found: {err}"))
            }
            Err(err) => Err(err.into()),
        },
    }
}
