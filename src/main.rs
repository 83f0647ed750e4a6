use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use shelfwatch::lookup::OmdbClient;
use shelfwatch::media::MediaRecord;
use shelfwatch::poster_cache::PosterCache;
use shelfwatch::settings::Settings;
use shelfwatch::storage::DiskStore;

/// Shelfwatch developer CLI - exercise the poster cache against a local store
#[derive(Parser, Debug)]
#[command(name = "shelfwatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the key-value store
    #[arg(long, default_value = ".shelfwatch")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a poster URL for a single title
    Resolve { title: String },
    /// Hydrate a batch of titles and print the results
    Hydrate { titles: Vec<String> },
    /// Remove every poster cache entry
    Clear,
}

#[tokio::main]
async fn main() {
    shelfwatch::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    let args = Args::parse();

    let store = match DiskStore::open(&args.data_dir).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Failed to open store at {}: {}", args.data_dir.display(), e);
            std::process::exit(1);
        }
    };

    let settings = Settings::new(store.clone());
    let lookup = Arc::new(OmdbClient::from_env());
    let cache = PosterCache::new(store, settings, lookup);

    match args.command {
        Command::Resolve { title } => match cache.resolve(&title).await {
            Some(url) => println!("{}", url),
            None => println!("(no poster)"),
        },
        Command::Hydrate { titles } => {
            let records: Vec<MediaRecord> = titles
                .iter()
                .enumerate()
                .map(|(i, title)| MediaRecord::new(format!("cli-{}", i), title.clone()))
                .collect();
            for record in cache.hydrate_batch(records).await {
                println!(
                    "{}\t{}",
                    record.title,
                    record.poster.as_deref().unwrap_or("(no poster)")
                );
            }
        }
        Command::Clear => {
            let removed = cache.clear().await;
            println!("Removed {} poster cache entries", removed);
        }
    }
}
