use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;

use cardex::adapters::outbound::catalog::postgres::Postgres;
use cardex::error::SyncError;
use cardex::ports::outbound::catalog::CatalogStore;
use cardex::scryfall::bulk::BulkSource;
use cardex::scryfall::ScryfallClient;
use cardex::sync::{cards, sets};

const DEFAULT_BULK_SNAPSHOT: &str = "default_cards";

#[derive(Parser)]
#[command(name = "cardex", about = "Mirrors the remote card masterdata into a local catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Update the set catalog only
    Sets,
    /// Update card prints from a bulk snapshot
    Cards {
        /// Named bulk snapshot to download
        #[arg(long, conflicts_with = "file")]
        bulk_data: Option<String>,
        /// Snapshot already on disk
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Import one set and every print in it from the paginated API
    Set { code: String },
}

fn bulk_source(bulk_data: Option<String>, file: Option<PathBuf>) -> BulkSource {
    match file {
        Some(path) => BulkSource::File(path),
        None => BulkSource::Api(bulk_data.unwrap_or_else(|| DEFAULT_BULK_SNAPSHOT.to_string())),
    }
}

async fn run<S: CatalogStore + Sync>(
    cli: Cli,
    client: &ScryfallClient,
    store: &S,
) -> Result<(), SyncError> {
    match cli.command {
        Some(Command::Sets) => {
            sets::sync_sets(client, store).await?;
        }
        Some(Command::Cards { bulk_data, file }) => {
            let source = bulk_source(bulk_data, file);
            cards::sync_cards_from_bulk(client, store, &source).await?;
        }
        Some(Command::Set { code }) => {
            sets::import_set(client, store, &code).await?;
            cards::sync_cards_of_set(client, store, &code).await?;
        }
        None => {
            sets::sync_sets(client, store).await?;
            let source = BulkSource::Api(DEFAULT_BULK_SNAPSHOT.to_string());
            cards::sync_cards_from_bulk(client, store, &source).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = match Postgres::create().await {
        Ok(store) => store,
        Err(why) => {
            log::error!("Failed to open catalog - {why}");
            exit(1);
        }
    };
    let client = ScryfallClient::new();

    if let Err(why) = run(cli, &client, &store).await {
        log::error!("Sync failed - {why}");
        exit(1);
    }
}
