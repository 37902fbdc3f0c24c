// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use std::path::PathBuf;

mod cli;
mod database;
mod error;
mod operations;
mod password;
mod query;
mod report;
mod session;
mod table;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
type Result<T> = std::result::Result<T, Error>;

#[derive(Parser, Debug)]
#[command(name = "recipe-book", version, about = "Recipes, meal plans and pantry")]
struct Args {
    /// Database file to use instead of the one in the user data directory
    #[arg(long, global = true, env = "RECIPE_BOOK_DATABASE")]
    database: Option<PathBuf>,

    #[arg(long, global = true, env = "RECIPE_BOOK_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "RECIPE_BOOK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// More output, repeat for more still
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: cli::Command,
}

/// This is where the database and other user-data lives on-disk. On Linux it should be like:
/// `~/.local/share/recipe_book/`
fn data_path() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().ok_or("failed to get user home directory")?;
    let path = dirs.data_dir().join("recipe_book");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(log_level(args.verbose))
        .init()?;

    let path = match args.database {
        Some(path) => path,
        None => data_path()?.join("recipe_book.sqlite"),
    };
    log::info!("using database at {}", path.display());
    let mut db = database::establish_connection(&path)?;

    let mut sessions = session::SessionState::default();
    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        match operations::account::login(&mut db, username, password) {
            Ok(session) => sessions.log_in(session),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }

    let result = cli::run(&mut db, &sessions, args.command);
    if let Some(session) = sessions.log_out() {
        log::info!("logged out {}", session.username);
    }
    if let Err(e) = result {
        log::error!("{e:?}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

#[test]
fn verify_args() {
    use clap::CommandFactory as _;
    Args::command().debug_assert();
}
