use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use golf_log::args::{self, Cmd};
use golf_log::controller;
use golf_log::handicap::handicap_snapshot;
use golf_log::import::import_csv;
use golf_log::storage::{JsonFileStorage, Storage};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "golf_log=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = args::args_checks();
    let storage = JsonFileStorage::new(&args.data_dir);

    match args.command {
        Cmd::Serve { bind } => {
            let storage: Arc<dyn Storage> = Arc::new(storage);
            let data = Data::from(storage);
            info!(%bind, data_dir = %args.data_dir.display(), "starting server");
            HttpServer::new(move || {
                App::new()
                    .app_data(data.clone())
                    .configure(controller::configure)
            })
            .bind(bind)?
            .run()
            .await?;
        }
        Cmd::ImportCsv { file, skip } => {
            let skip: HashSet<u64> = skip.into_iter().collect();
            let (rounds, stats) = import_csv(&file, &skip)?;
            storage.replace_rounds(&rounds).await?;
            println!(
                "Imported {} rounds ({} duplicates, {} incomplete) into {}",
                stats.imported,
                stats.duplicates,
                stats.incomplete,
                storage.dir().display()
            );
        }
        Cmd::Handicap => {
            let rounds = storage.load_rounds().await?;
            let snapshot = handicap_snapshot(&rounds);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
