use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use seachest::cli::{handle_download, handle_list, handle_rehost, handle_upload};
use seachest::config::{paths::SeachestPaths, settings::Settings};
use seachest::error::SeachestError;
use seachest::pipeline::Pipeline;
use seachest::{ledger, store};

#[derive(Parser)]
#[command(
    name = "seachest",
    author = "Kaylee Beyene",
    version,
    about = "Encrypted directory backups on content-addressed storage",
    long_about = "seachest packs a directory into a compressed archive, encrypts it \
                  with a freshly generated key, publishes the ciphertext to a \
                  content-addressed store, and records the hash and key in a local \
                  ledger so you can restore or re-seed the backup later."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload and encrypt a directory, returning its hash and decryption key
    Upload {
        /// Directory to back up
        directory: PathBuf,
        /// Optional note to remember what you uploaded
        note: Option<String>,
    },

    /// Download a hash and decrypt it using the supplied key
    Download {
        /// Directory to restore into
        destination: PathBuf,
        /// Content hash to fetch
        hash: String,
        /// Decryption key from the ledger
        key: String,
    },

    /// Re-pin an existing hash, seeding it without re-uploading
    Rehost {
        /// Content hash to pin
        hash: String,
        /// Optional note to remember why you are rehosting this
        note: Option<String>,
    },

    /// List uploads with their keys, and everything you are rehosting
    List,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    run(command).map_err(|err| match err.stage() {
        Some(stage) => anyhow::anyhow!("{} stage failed: {}", stage, err),
        None => anyhow::Error::new(err),
    })
}

fn run(command: Commands) -> Result<(), SeachestError> {
    let paths = SeachestPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let store = store::from_settings(&settings, &paths);
    let pipeline = Pipeline::new(&paths, store.as_ref());

    // A corrupt ledger is fatal here: it is the only copy of the keys
    let mut ledger = ledger::store::load(paths.ledger_file())?;

    match command {
        Commands::Upload { directory, note } => handle_upload(
            &pipeline,
            &mut ledger,
            &directory,
            note.as_deref().unwrap_or(""),
        ),
        Commands::Download {
            destination,
            hash,
            key,
        } => handle_download(&pipeline, &destination, &hash, &key),
        Commands::Rehost { hash, note } => {
            handle_rehost(&pipeline, &mut ledger, &hash, note.as_deref().unwrap_or(""))
        }
        Commands::List => {
            handle_list(&ledger);
            Ok(())
        }
        Commands::Config => {
            println!("seachest configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Store backend: {:?}", settings.store);
            println!("ipfs binary:   {}", settings.ipfs_bin);
            Ok(())
        }
    }
}
