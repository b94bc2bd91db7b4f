//! Pokedex CLI - serve and manage a flat-file Pokémon collection

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use pokedex::config::{self, PokedexConfig};
use pokedex::output::{OutputMode, emit_success, error_envelope};
use pokedex::query::PokedexStats;
use pokedex::ui::{self, Icons, PokemonTable};
use pokedex::{
    JsonFileStore, MutationEngine, NewPokemon, Pokemon, PokemonFilter, PokemonType, PokemonUpdate,
    QueryEngine,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version)]
#[command(about = "GraphQL API over a flat-file Pokémon collection")]
#[command(long_about = r#"
Pokedex keeps a Pokémon collection in a single JSON document and serves it
over GraphQL. The same operations are available from the command line.

Example usage:
  pokedex init
  pokedex serve --port 4000
  pokedex list --name Char --type Fire
  pokedex edit 25 --from update.json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON document (overrides the config file)
    #[arg(short, long, global = true)]
    document: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create an empty document
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Run the GraphQL server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show one pokemon
    Get {
        /// Pokemon id
        id: i64,
    },

    /// List pokemon, optionally filtered
    List {
        /// Case-sensitive substring of the english name
        #[arg(short, long)]
        name: Option<String>,

        /// Keep pokemon having any of these types (repeat or comma-separate)
        #[arg(short = 't', long = "type", value_delimiter = ',')]
        types: Vec<PokemonType>,
    },

    /// Add a pokemon from a JSON file ("-" reads stdin)
    Add {
        #[arg(short, long)]
        from: PathBuf,
    },

    /// Apply a partial update from a JSON file ("-" reads stdin)
    Edit {
        /// Pokemon id
        id: i64,

        #[arg(short, long)]
        from: PathBuf,
    },

    /// Delete a pokemon
    Delete {
        /// Pokemon id
        id: i64,
    },

    /// Show statistics about the collection
    Stats,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Serve { .. } => "serve",
            Commands::Get { .. } => "get",
            Commands::List { .. } => "list",
            Commands::Add { .. } => "add",
            Commands::Edit { .. } => "edit",
            Commands::Delete { .. } => "delete",
            Commands::Stats => "stats",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = OutputMode::from_flag(cli.json);
    let command = cli.command.name();

    match run(cli, mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<pokedex::Error>()
                .map(pokedex::Error::code)
                .unwrap_or("ERROR");
            if mode.is_human() {
                ui::error(&format!("{:#}", err));
            } else {
                match error_envelope(command, code, &format!("{:#}", err)) {
                    Ok(envelope) => println!("{}", envelope),
                    Err(_) => ui::error(&format!("{:#}", err)),
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();

    match cli.command {
        Commands::Init { force } => {
            let config = config.merge(cli.document, None, None);
            let document = config.document_path();
            let written = PokedexConfig {
                document: Some(document.to_string_lossy().to_string()),
                ..config
            };

            config::write_config(&config_path, &written, force)?;
            JsonFileStore::create(&document).await?;
            tracing::info!("Initialized {} with document {}", config_path.display(), document.display());

            if mode.is_human() {
                ui::success(&format!("Wrote {}", config_path.display()));
                ui::info("Document", &document.display().to_string());
            }
            emit_success(mode, "init", serde_json::json!({
                "config": config_path,
                "document": document,
            }))?;
        }

        Commands::Serve { host, port } => {
            let config = config.merge(cli.document, host, port);
            let addr = config.bind_addr()?;
            let store = open_store(&config.document_path()).await?;

            if mode.is_human() {
                ui::header("Pokedex GraphQL server");
                ui::info("Document", &config.document_path().display().to_string());
            }
            pokedex::server::start_server(addr, Arc::new(store)).await?;
        }

        Commands::Get { id } => {
            let store = open_store(&config.merge(cli.document, None, None).document_path()).await?;
            let pokemon = QueryEngine::new(&store).get(id).await?;

            if mode.is_human() {
                ui::pokemon_card(&pokemon);
            }
            emit_success(mode, "get", &pokemon)?;
        }

        Commands::List { name, types } => {
            let store = open_store(&config.merge(cli.document, None, None).document_path()).await?;
            let filter = PokemonFilter {
                name,
                types: (!types.is_empty()).then_some(types),
            };
            let records = QueryEngine::new(&store).get_all(Some(&filter)).await?;

            if mode.is_human() {
                println!("{} {} pokemon", Icons::SEARCH, records.len());
                println!("{}", PokemonTable::new(&records).build());
            }
            emit_success(mode, "list", &records)?;
        }

        Commands::Add { from } => {
            let store = open_store(&config.merge(cli.document, None, None).document_path()).await?;
            let input: NewPokemon = read_json(&from)?;
            let pokemon = MutationEngine::new(&store).add(input).await?;

            if mode.is_human() {
                ui::success(&format!("{} Added #{}", Icons::NEW, pokemon.id));
                ui::pokemon_card(&pokemon);
            }
            emit_success(mode, "add", &pokemon)?;
        }

        Commands::Edit { id, from } => {
            let store = open_store(&config.merge(cli.document, None, None).document_path()).await?;
            let update: PokemonUpdate = read_json(&from)?;
            if update.is_empty() {
                ui::warn("Update has no fields; the record is rewritten unchanged");
            }
            let pokemon = MutationEngine::new(&store).edit(id, &update).await?;

            if mode.is_human() {
                ui::success(&format!("{} Edited #{}", Icons::MOD, pokemon.id));
                ui::pokemon_card(&pokemon);
            }
            emit_success(mode, "edit", &pokemon)?;
        }

        Commands::Delete { id } => {
            let store = open_store(&config.merge(cli.document, None, None).document_path()).await?;
            let pokemon: Pokemon = MutationEngine::new(&store).remove(id).await?;

            if mode.is_human() {
                ui::success(&format!("{} Deleted #{} {}", Icons::DEL, pokemon.id, pokemon.name.english));
            }
            emit_success(mode, "delete", &pokemon)?;
        }

        Commands::Stats => {
            let document = config.merge(cli.document, None, None).document_path();
            let store = open_store(&document).await?;
            let stats = QueryEngine::new(&store).stats().await?;

            if mode.is_human() {
                println!("{} Pokedex Statistics ({})", Icons::STATS, document.display());
                println!("{}", ui::stats_table(&stats_rows(&stats)));
            }
            emit_success(mode, "stats", &stats)?;
        }
    }

    Ok(())
}

async fn open_store(document: &Path) -> anyhow::Result<JsonFileStore> {
    JsonFileStore::open(document)
        .await
        .with_context(|| format!("cannot open {} (run `pokedex init` first?)", document.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn stats_rows(stats: &PokedexStats) -> Vec<(String, String)> {
    let mut rows = vec![(format!("{} Records", Icons::DATABASE), stats.records.to_string())];
    for (kind, count) in &stats.by_type {
        rows.push((kind.to_string(), count.to_string()));
    }
    rows
}
