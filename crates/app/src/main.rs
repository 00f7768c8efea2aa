//! `biodinamica`: the biomechanics quiz games in a terminal.

use std::io;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use bio_core::model::{Difficulty, GameKind, MatchingCategory};

mod commands;
mod config;
mod logging;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "biodinamica", version, about = "Biomechanics quiz games")]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show total score, level, streaks and per-game scores
    Stats,

    /// Play one mini-game: levers, whoami, movement or matching
    Play {
        game: GameKind,

        /// Lever tier (easy, medium, hard); asked for when omitted
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Matching category; asked for when omitted
        #[arg(long)]
        category: Option<MatchingCategory>,

        /// Skip the tutorial screen this time
        #[arg(long)]
        no_tutorial: bool,
    },

    /// Zero one game's score. The total score is kept.
    ResetGame { game: GameKind },

    /// Validate the question bank and report duplicated content
    CheckBank,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config;
    tracing::debug!(?config, "configuration resolved");
    let stdout = io::stdout();
    match cli.command {
        Commands::Stats => commands::stats::execute(&config, &mut stdout.lock()),
        Commands::Play {
            game,
            difficulty,
            category,
            no_tutorial,
        } => {
            let options = commands::play::PlayOptions {
                game,
                difficulty,
                category,
                show_tutorial: !no_tutorial,
            };
            commands::play::execute(&config, &options, io::stdin().lock(), &mut stdout.lock())
        }
        Commands::ResetGame { game } => {
            commands::stats::reset_game(&config, game, &mut stdout.lock())
        }
        Commands::CheckBank => commands::bank::execute(&config, &mut stdout.lock()),
    }
}
