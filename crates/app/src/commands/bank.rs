//! The `biodinamica check-bank` command.

use std::io::Write;

use anyhow::{Result, bail};

use bio_core::model::{Difficulty, Duplicate, MatchingCategory};

use crate::config::AppConfig;

pub fn execute(config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let bank = config.question_bank()?;
    let audit = bank.audit();

    writeln!(out, "Levers: {} questions", audit.lever_questions)?;
    for difficulty in Difficulty::ALL {
        writeln!(
            out,
            "  {:<8} {}",
            difficulty.label(),
            bank.lever_count(difficulty)
        )?;
    }
    for (class, count) in &audit.lever_class_distribution {
        writeln!(out, "  {class}: {count}")?;
    }
    report(out, "duplicate question", &audit.duplicate_lever_questions)?;

    writeln!(out, "Who am I: {} questions", audit.who_am_i_questions)?;
    report(out, "duplicate answer", &audit.duplicate_who_am_i_answers)?;
    report(out, "repeated hint", &audit.duplicate_hints)?;

    writeln!(out, "Movement: {} questions", audit.movement_questions)?;
    report(out, "duplicate title", &audit.duplicate_movement_titles)?;
    report(out, "repeated image", &audit.duplicate_movement_images)?;

    writeln!(out, "Matching: {} pairs", audit.matching_pairs)?;
    for category in MatchingCategory::ALL {
        writeln!(
            out,
            "  {:<22} {}",
            category.label(),
            bank.matching_count(category)
        )?;
    }
    report(out, "duplicate pair", &audit.duplicate_pairs)?;
    report(out, "repeated left term", &audit.repeated_left)?;
    report(out, "repeated right term", &audit.repeated_right)?;

    if audit.has_errors() {
        bail!("question bank contains duplicated content");
    }
    if audit.has_warnings() {
        writeln!(out, "Question bank is valid (with repeated terms).")?;
    } else {
        writeln!(out, "Question bank is valid.")?;
    }
    Ok(())
}

fn report(out: &mut impl Write, what: &str, duplicates: &[Duplicate]) -> Result<()> {
    for duplicate in duplicates {
        writeln!(out, "  {what} ({}x): {}", duplicate.count, duplicate.value)?;
    }
    Ok(())
}
