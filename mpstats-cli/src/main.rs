//! mpstats registry command-line tool
//!
//! Opens the SQLite store, hydrates the game, category and player
//! registries from it, runs one command and prints the result as JSON.
//!
//! Usage:
//!   mpstats --db stats.db game get-or-create W1 GAME1 C1 CATEGORY1
//!   mpstats --db stats.db game list
//!   mpstats --db stats.db java-player get-or-create <UUID> Alex

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mpstats_registry::{GameService, PlayerService};
use mpstats_store::{EntityStore, SqliteStore, StoreConfig};
use mpstats_types::{BedrockPlayer, JavaPlayer, NewBedrockPlayer, NewJavaPlayer};
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "mpstats")]
#[command(about = "Inspect and populate the mpstats entity registries")]
struct Args {
    /// SQLite database file (in-memory when omitted)
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON store config file; `--db` overrides its path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Games
    #[command(subcommand)]
    Game(GameCommand),
    /// Game categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Bedrock players
    #[command(subcommand)]
    Player(PlayerCommand),
    /// Java players, identified by name and account UUID
    #[command(subcommand)]
    JavaPlayer(JavaPlayerCommand),
}

#[derive(Subcommand, Debug)]
enum GameCommand {
    /// Return the game, creating it and its category if needed
    GetOrCreate {
        website_name: String,
        game_name: String,
        clean_name: String,
        category_name: String,
    },
    Get { name: String },
    List,
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    GetOrCreate { name: String },
    Get { name: String },
    List,
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum PlayerCommand {
    GetOrCreate { name: String },
    Get { name: String },
    List,
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum JavaPlayerCommand {
    GetOrCreate { uuid: Uuid, name: String },
    Get { name: String },
    List,
    Delete { name: String },
}

fn store_config(args: &Args) -> Result<StoreConfig> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(db) = &args.db {
        config.path = Some(db.clone());
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = store_config(&args)?;
    debug!("Store config: {:?}", config);
    let store = Arc::new(SqliteStore::open_with_config(&config).context("failed to open store")?);

    match args.command {
        Command::Game(cmd) => run_game(cmd, GameService::with_store(store)?),
        Command::Category(cmd) => run_category(cmd, GameService::with_store(store)?),
        Command::Player(cmd) => {
            let players = PlayerService::<BedrockPlayer>::new(
                store as Arc<dyn EntityStore<BedrockPlayer>>,
            )?;
            run_player(cmd, players)
        }
        Command::JavaPlayer(cmd) => {
            let players =
                PlayerService::<JavaPlayer>::new(store as Arc<dyn EntityStore<JavaPlayer>>)?;
            run_java_player(cmd, players)
        }
    }
}

fn run_game(cmd: GameCommand, games: GameService) -> Result<()> {
    match cmd {
        GameCommand::GetOrCreate {
            website_name,
            game_name,
            clean_name,
            category_name,
        } => {
            let game = games
                .get_or_create_game(&website_name, &game_name, &clean_name, &category_name)
                .with_context(|| format!("failed to get or create game {game_name}"))?;
            print_json(&game)
        }
        GameCommand::Get { name } => print_json(&games.get_game(&name)),
        GameCommand::List => print_json(&games.get_games()),
        GameCommand::Delete { name } => {
            games
                .delete_game(&name)
                .with_context(|| format!("failed to delete game {name}"))?;
            info!("Deleted game {}", name);
            Ok(())
        }
    }
}

fn run_category(cmd: CategoryCommand, games: GameService) -> Result<()> {
    match cmd {
        CategoryCommand::GetOrCreate { name } => {
            let category = games
                .get_category_or_create(&name)
                .with_context(|| format!("failed to get or create category {name}"))?;
            print_json(&category)
        }
        CategoryCommand::Get { name } => print_json(&games.get_category(&name)),
        CategoryCommand::List => print_json(&games.get_categories()),
        CategoryCommand::Delete { name } => {
            games
                .delete_category(&name)
                .with_context(|| format!("failed to delete category {name}"))?;
            info!("Deleted category {}", name);
            Ok(())
        }
    }
}

fn run_player(cmd: PlayerCommand, players: PlayerService<BedrockPlayer>) -> Result<()> {
    match cmd {
        PlayerCommand::GetOrCreate { name } => {
            let player = players
                .get_or_create_player(NewBedrockPlayer::new(name.as_str()))
                .with_context(|| format!("failed to get or create player {name}"))?;
            print_json(&player)
        }
        PlayerCommand::Get { name } => print_json(&players.get_player(&name)),
        PlayerCommand::List => print_json(&players.get_players()),
        PlayerCommand::Delete { name } => {
            players
                .delete_player(&name)
                .with_context(|| format!("failed to delete player {name}"))?;
            info!("Deleted player {}", name);
            Ok(())
        }
    }
}

fn run_java_player(cmd: JavaPlayerCommand, players: PlayerService<JavaPlayer>) -> Result<()> {
    match cmd {
        JavaPlayerCommand::GetOrCreate { uuid, name } => {
            let player = players
                .get_or_create_player(NewJavaPlayer::new(uuid, name.as_str()))
                .with_context(|| format!("failed to get or create java player {name}"))?;
            print_json(&player)
        }
        JavaPlayerCommand::Get { name } => print_json(&players.get_player(&name)),
        JavaPlayerCommand::List => print_json(&players.get_players()),
        JavaPlayerCommand::Delete { name } => {
            players
                .delete_player(&name)
                .with_context(|| format!("failed to delete java player {name}"))?;
            info!("Deleted java player {}", name);
            Ok(())
        }
    }
}
