//! The `biodinamica stats` and `biodinamica reset-game` commands.

use std::io::Write;

use anyhow::{Context, Result};

use bio_core::model::{GameKind, PlayerStats};
use services::StatsService;

use crate::config::AppConfig;

pub fn execute(config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let storage = config.storage()?;
    let stats = StatsService::load(storage.stats).context("cannot load stats")?;
    print_stats(stats.stats(), out)
}

pub fn reset_game(config: &AppConfig, game: GameKind, out: &mut impl Write) -> Result<()> {
    let storage = config.storage()?;
    let mut stats = StatsService::load(storage.stats).context("cannot load stats")?;
    let updated = stats
        .reset_game(game)
        .with_context(|| format!("cannot reset {game}"))?;
    writeln!(out, "{} score reset to 0.", game.title())?;
    writeln!(out, "Total score stays at {}.", updated.total_score())?;
    Ok(())
}

pub(crate) fn print_stats(stats: &PlayerStats, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Total score:    {}", stats.total_score())?;
    writeln!(out, "Level:          {}", stats.level())?;
    writeln!(out, "Current streak: {}", stats.current_streak())?;
    writeln!(out, "Best streak:    {}", stats.best_streak())?;
    writeln!(out)?;
    for game in GameKind::ALL {
        writeln!(out, "  {:<28} {:>6}", game.title(), stats.game_score(game))?;
    }
    Ok(())
}
