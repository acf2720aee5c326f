//! Archenemy - Main Binary
//!
//! Terminal scheme-deck player for Magic: The Gathering "Archenemy"

use archenemy::{
    core::DeckId,
    loader::{DeckListLoader, SchemeDatabase},
    repo::{DeckRepository, FileDeckRepository},
    session::{
        InteractiveController, ScriptedController, Session, SessionController, SessionRunner,
        SessionSnapshot, VerbosityLevel,
    },
    store::FileSnapshotStore,
    ArchenemyError, Result,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Verbosity level for session output (custom parser supporting both names
/// and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "archenemy")]
#[command(about = "Archenemy - Magic: The Gathering scheme-deck player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an Archenemy session
    Play {
        /// Deck to play: a deck id or a deck name
        #[arg(long, value_name = "ID_OR_NAME")]
        deck: Option<String>,

        /// Directory holding stored decks
        #[arg(long, default_value = "decks")]
        decks_dir: PathBuf,

        /// Directory holding saved games
        #[arg(long, default_value = "saves")]
        save_dir: PathBuf,

        /// User the decks belong to
        #[arg(long, default_value = "archenemy")]
        user: String,

        /// Set random seed for deterministic sessions
        #[arg(long)]
        seed: Option<u64>,

        /// Scripted actions instead of interactive play
        /// (e.g., "draw draw abandon:0 undo end")
        #[arg(long, value_name = "ACTIONS")]
        script: Option<String>,

        /// Ignore any saved game and start fresh
        #[arg(long)]
        fresh: bool,

        /// Do not persist the session after each action
        #[arg(long)]
        no_autosave: bool,

        /// Verbosity level for session output (0=silent, 1=minimal,
        /// 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Manage stored scheme decks
    Deck {
        #[command(subcommand)]
        command: DeckCommands,
    },
}

#[derive(Subcommand)]
enum DeckCommands {
    /// List your decks
    List {
        #[arg(long, default_value = "decks")]
        decks_dir: PathBuf,

        #[arg(long, default_value = "archenemy")]
        user: String,
    },

    /// Add a deck from a deck-list file
    Add {
        /// Deck-list file
        list: PathBuf,

        /// Scheme card database (JSON)
        #[arg(long, default_value = "schemes.json")]
        cards: PathBuf,

        #[arg(long, default_value = "decks")]
        decks_dir: PathBuf,

        #[arg(long, default_value = "archenemy")]
        user: String,
    },

    /// Delete a deck
    Delete {
        /// Deck id
        id: u32,

        #[arg(long, default_value = "decks")]
        decks_dir: PathBuf,

        #[arg(long, default_value = "archenemy")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            deck,
            decks_dir,
            save_dir,
            user,
            seed,
            script,
            fresh,
            no_autosave,
            verbosity,
        } => {
            run_play(
                deck,
                decks_dir,
                save_dir,
                user,
                seed,
                script,
                fresh,
                no_autosave,
                verbosity.0,
            )
            .await
        }
        Commands::Deck { command } => match command {
            DeckCommands::List { decks_dir, user } => run_deck_list(decks_dir, user).await,
            DeckCommands::Add {
                list,
                cards,
                decks_dir,
                user,
            } => run_deck_add(list, cards, decks_dir, user).await,
            DeckCommands::Delete {
                id,
                decks_dir,
                user,
            } => run_deck_delete(id, decks_dir, user).await,
        },
    }
}

async fn run_play(
    deck: Option<String>,
    decks_dir: PathBuf,
    save_dir: PathBuf,
    user: String,
    seed: Option<u64>,
    script: Option<String>,
    fresh: bool,
    no_autosave: bool,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let store = FileSnapshotStore::new(save_dir)?;

    let mut session = Session::with_seed(seed.unwrap_or_else(rand::random));
    session.logger.set_verbosity(verbosity);

    let mut controller: Box<dyn SessionController> = match script {
        Some(script) => Box::new(ScriptedController::parse(&script)?.with_resume(!fresh)),
        None => Box::new(InteractiveController::new()),
    };

    let mut runner = SessionRunner::new(session, &store).with_autosave(!no_autosave);

    let resumed = if fresh {
        SessionSnapshot::clear(&store)?;
        false
    } else {
        runner.offer_resume(controller.as_mut())?
    };

    if !resumed {
        let repo = FileDeckRepository::new(&decks_dir, user)?;
        let decks = repo.list_decks_for_current_user().await?;
        if decks.is_empty() {
            println!(
                "No decks found in {} - add one with 'archenemy deck add'",
                decks_dir.display()
            );
            return Ok(());
        }

        let deck_id = match resolve_deck(&deck, &decks)? {
            Some(id) => id,
            None => {
                println!("Several decks available; pick one with --deck:");
                for d in &decks {
                    println!("  [{}] {} ({} schemes)", d.id, d.name, d.len());
                }
                return Ok(());
            }
        };

        runner.session.select_deck(deck_id, &decks)?;
        runner.session.start_game()?;
    }

    runner.run(controller.as_mut())
}

/// Resolve the --deck argument against the fetched deck list
///
/// Accepts an id or a case-insensitive name. With no argument, a lone deck
/// is chosen automatically; `None` means the caller has to disambiguate.
fn resolve_deck(
    arg: &Option<String>,
    decks: &[archenemy::core::Deck],
) -> Result<Option<DeckId>> {
    let Some(arg) = arg else {
        return Ok(if decks.len() == 1 {
            Some(decks[0].id)
        } else {
            None
        });
    };

    if let Ok(id) = arg.parse::<u32>() {
        return Ok(Some(DeckId::new(id)));
    }

    decks
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(arg))
        .map(|d| Some(d.id))
        .ok_or_else(|| ArchenemyError::InvalidArgument(format!("no deck named '{arg}'")))
}

async fn run_deck_list(decks_dir: PathBuf, user: String) -> Result<()> {
    let repo = FileDeckRepository::new(decks_dir, user)?;
    let decks = repo.list_decks_for_current_user().await?;

    if decks.is_empty() {
        println!("No decks.");
        return Ok(());
    }
    for deck in decks {
        let visibility = if deck.public { "public" } else { "private" };
        println!(
            "[{}] {} - {} schemes, {visibility}, updated {}",
            deck.id,
            deck.name,
            deck.len(),
            deck.updated_at
        );
    }
    Ok(())
}

async fn run_deck_add(
    list: PathBuf,
    cards: PathBuf,
    decks_dir: PathBuf,
    user: String,
) -> Result<()> {
    let db = SchemeDatabase::load_from_file(&cards).await?;
    let deck_list = DeckListLoader::load_from_file(&list)?;
    let resolved = deck_list.resolve(&db)?;

    let repo = FileDeckRepository::new(decks_dir, user)?;
    let deck = repo
        .save_deck(archenemy::core::NewDeck {
            name: deck_list
                .name
                .unwrap_or_else(|| "Unnamed scheme deck".to_string()),
            description: deck_list.description,
            cards: resolved,
        })
        .await?;

    println!("Saved deck [{}] {} ({} schemes)", deck.id, deck.name, deck.len());
    Ok(())
}

async fn run_deck_delete(id: u32, decks_dir: PathBuf, user: String) -> Result<()> {
    let repo = FileDeckRepository::new(decks_dir, user)?;
    repo.delete_deck(DeckId::new(id)).await?;
    println!("Deleted deck [{id}]");
    Ok(())
}
