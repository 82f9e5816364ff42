//! `gallows`: play hangman in the terminal against an executioner who
//! remembers you.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use gallows_core::achievements::{self, ACHIEVEMENTS};
use gallows_core::config::GallowsConfig;
use gallows_core::engine::GameStatus;
use gallows_core::narrator::{Dialogue, Narrator};
use gallows_core::persistence::SqliteStore;
use gallows_core::stats::Player;
use gallows_core::types::Difficulty;
use gallows_session::events::TurnOutcome;
use gallows_session::session::{GameReport, GameSession};
use gallows_session::telemetry::init_tracing;

#[derive(Parser)]
#[command(author, version, about = "Hangman with an executioner who remembers you")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the data directory from the configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games until you quit
    Play(PlayArgs),
    /// Show a player's statistics
    Stats {
        #[command(flatten)]
        who: PlayerArg,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the best players by total score
    Leaderboard {
        /// Rows to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List achievements and which ones a player has
    Achievements(PlayerArg),
    /// List known players
    Players,
    /// List word categories
    Categories,
    /// Rename a player
    Rename {
        /// Current name
        #[arg(long)]
        player: String,
        /// New name
        #[arg(long)]
        to: String,
    },
    /// Forget a player's games and the executioner's opinion of them
    Reset {
        /// Player name
        #[arg(long)]
        player: String,
        /// Also clear unlocked achievements
        #[arg(long)]
        achievements: bool,
    },
    /// Write a rotating backup of the database
    Backup,
    /// Run the database integrity check
    Check,
}

#[derive(Args)]
struct PlayerArg {
    /// Player name
    #[arg(long, default_value = "scout")]
    player: String,
}

#[derive(Args)]
struct PlayArgs {
    /// Player name
    #[arg(long, default_value = "scout")]
    player: String,
    /// easy, normal or hard
    #[arg(long, default_value = "normal")]
    difficulty: String,
    /// Only draw words from this category
    #[arg(long)]
    category: Option<String>,
    /// Seed the random source for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GallowsConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GallowsConfig::default(),
    };
    if cli.data_dir.is_some() {
        config.persistence.data_dir = cli.data_dir;
    }
    init_tracing(&config.general);

    let store = SqliteStore::open_configured(&config.persistence)
        .with_context(|| format!("opening {}", config.persistence.db_path().display()))?;

    match cli.command {
        Commands::Play(args) => play(&store, &config, &args)?,
        Commands::Stats { who, json } => show_stats(&store, &config, &who.player, json)?,
        Commands::Leaderboard { limit, json } => show_leaderboard(&store, limit, json)?,
        Commands::Achievements(args) => show_achievements(&store, &args.player)?,
        Commands::Players => {
            for player in store.all_players()? {
                println!("{:<20} since {}", player.name, player.created_at.format("%Y-%m-%d"));
            }
        }
        Commands::Categories => {
            for category in store.categories()? {
                println!("{category}");
            }
        }
        Commands::Rename { player, to } => {
            let found = find_player(&store, &player)?;
            store.rename_player(found.id, &to)?;
            println!("{player} is now {to}");
        }
        Commands::Reset { player, achievements } => {
            let found = find_player(&store, &player)?;
            store.reset_player_stats(found.id)?;
            if achievements {
                store.reset_player_achievements(found.id)?;
            }
            println!("{player} starts over");
        }
        Commands::Backup => {
            store.create_rotating_backup()?;
            println!("backup written next to {}", store.db_path().display());
        }
        Commands::Check => {
            if !store.integrity_check()? {
                bail!("integrity check failed for {}", store.db_path().display());
            }
            println!("ok");
        }
    }
    Ok(())
}

fn find_player(store: &SqliteStore, name: &str) -> Result<Player> {
    store
        .all_players()?
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| anyhow!("no player named {name}"))
}

// ---------------------------------------------------------------------------
// Play
// ---------------------------------------------------------------------------

fn play(store: &SqliteStore, config: &GallowsConfig, args: &PlayArgs) -> Result<()> {
    let difficulty: Difficulty = args.difficulty.parse()?;
    let player = store.get_or_create_player(&args.player)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    println!("{} ({}): {}", difficulty.label(), player.name, difficulty.description());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let game_rng = StdRng::from_rng(&mut rng)?;
        let (mut session, opening) = GameSession::start(
            store,
            config,
            player.clone(),
            difficulty,
            args.category.as_deref(),
            game_rng,
        )?;
        say(&opening);

        let mut clue_shown = false;
        while session.status() == GameStatus::InProgress {
            draw(&session);
            prompt("guess (? for help, :q to give up)> ")?;
            let Some(line) = lines.next() else {
                info!("Input closed mid-game; nothing recorded");
                return Ok(());
            };
            let line = line?;
            let input = line.trim();
            if input == ":q" {
                break;
            }
            let turn = if input == "?" {
                let clue = session.word().hint.clone();
                match clue {
                    Some(clue) if !clue_shown && !session.state().hint_used() => {
                        clue_shown = true;
                        println!("Clue: {clue} (? again to reveal a letter for a life)");
                        continue;
                    }
                    _ => session.use_hint()?,
                }
            } else {
                match input.chars().next() {
                    Some(letter) => session.guess(letter)?,
                    None => continue,
                }
            };
            match (&turn.outcome, &turn.dialogue) {
                (_, Some(dialogue)) => say(dialogue),
                (TurnOutcome::HintUnavailable, None) => println!("No hint left."),
                _ => {}
            }
        }

        let report = session.finish()?;
        summarize(&report, config);

        prompt("another? [Y/n]> ")?;
        let again = match lines.next() {
            Some(line) => !line?.trim().eq_ignore_ascii_case("n"),
            None => false,
        };
        if !again {
            return Ok(());
        }
    }
}

fn draw(session: &GameSession<'_, StdRng>) {
    let state = session.state();
    let board: String = state
        .display_word()
        .iter()
        .map(|c| format!("{c} "))
        .collect();
    let tried: String = state.guessed_letters().iter().collect();
    println!();
    println!("  {}   [{}]", board.trim_end(), state.category());
    println!(
        "  lives {}/{}   tried: {}",
        state.remaining_lives(),
        state.max_wrong_guesses(),
        if tried.is_empty() { "-" } else { tried.as_str() }
    );
}

fn say(dialogue: &Dialogue) {
    println!();
    println!("{}", dialogue.avatar);
    println!("  \"{}\"", dialogue.text);
}

fn summarize(report: &GameReport, config: &GallowsConfig) {
    println!();
    if report.game.won {
        println!("Solved \"{}\" for {} points.", report.word, report.game.score);
    } else if config.game.reveal_word_on_loss {
        println!("Hanged. The word was \"{}\".", report.word);
    } else {
        println!("Hanged.");
    }
    for def in &report.achievements {
        println!("{} {}: {}", def.icon, def.name, def.description);
    }
    for dialogue in &report.closing {
        say(dialogue);
    }
    println!(
        "Streak {} (best {}), executioner respect {}/100",
        report.stats.current_streak, report.stats.best_streak, report.memory.respect_level
    );
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn show_stats(store: &SqliteStore, config: &GallowsConfig, name: &str, json: bool) -> Result<()> {
    let player = find_player(store, name)?;
    let stats = store.player_stats(player.id)?;
    let memory = Narrator::new(store, config.narrator).memory(player.id)?;
    if json {
        let doc = serde_json::json!({ "player": player, "stats": stats, "executioner": memory });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{}", player.name);
    println!("  games        {}", stats.total_games);
    println!("  won / lost   {} / {}", stats.wins, stats.losses);
    println!("  win rate     {:.0}%", stats.win_rate);
    println!("  avg misses   {:.1}", stats.avg_wrong_guesses);
    println!("  streak       {} (best {})", stats.current_streak, stats.best_streak);
    println!("  total score  {}", stats.total_score);
    println!("  play time    {}s", stats.total_play_time);
    if let Some(secs) = stats.fastest_win {
        println!("  fastest win  {secs}s");
    }
    if let Some(word) = &stats.longest_word {
        println!("  longest word {word}");
    }
    println!("  executioner  {} (respect {})", memory.mood, memory.respect_level);
    Ok(())
}

fn show_leaderboard(store: &SqliteStore, limit: usize, json: bool) -> Result<()> {
    let entries = store.leaderboard(limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>6} pts  {:>3} games  {:>5.1}%",
            rank + 1,
            entry.name,
            entry.total_score,
            entry.total_games,
            entry.win_rate
        );
    }
    Ok(())
}

fn show_achievements(store: &SqliteStore, name: &str) -> Result<()> {
    let player = find_player(store, name)?;
    let unlocked = store.unlocked_achievements(player.id)?;
    for def in ACHIEVEMENTS {
        let mark = if unlocked.iter().any(|k| k == def.key) { "x" } else { " " };
        println!("[{mark}] {} {:<20} {}", def.icon, def.name, def.description);
    }
    let unknown: Vec<&str> = unlocked
        .iter()
        .map(String::as_str)
        .filter(|k| achievements::find(k).is_none())
        .collect();
    if !unknown.is_empty() {
        println!("(also: {})", unknown.join(", "));
    }
    Ok(())
}
