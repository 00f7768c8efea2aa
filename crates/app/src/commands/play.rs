//! The `biodinamica play` command: drives one game session over a line-based console.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use bio_core::model::{Difficulty, GameKind, GameSummary, LeverClass, MatchingCategory, QuestionBank};
use bio_core::{Clock, Shuffler};
use services::games::WHO_AM_I_MAX_MISSES;
use services::{
    AnswerFeedback, LeversSession, MatchingSession, MovementSession, SessionError, StatsService,
    TutorialService, WhoAmISession,
};

use crate::config::AppConfig;

use super::stats::print_stats;

const QUIT: &str = "q";

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub game: GameKind,
    pub difficulty: Option<Difficulty>,
    pub category: Option<MatchingCategory>,
    pub show_tutorial: bool,
}

pub fn execute(
    config: &AppConfig,
    options: &PlayOptions,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let storage = config.storage()?;
    let bank = config.question_bank()?;
    let mut stats = StatsService::load(storage.stats.clone()).context("cannot load stats")?;
    let tutorials = TutorialService::new(storage.tutorials.clone());
    let mut console = Console { input, out };

    writeln!(console.out, "== {} ==", options.game.title())?;
    if options.show_tutorial && !show_tutorial(&mut console, &tutorials, options.game)? {
        return Ok(());
    }

    let shuffler = config.shuffler();
    let summary = match options.game {
        GameKind::Levers => play_levers(&mut console, bank, shuffler, &mut stats, options.difficulty)?,
        GameKind::WhoAmI => play_who_am_i(&mut console, bank, shuffler, &mut stats)?,
        GameKind::Movement => play_movement(&mut console, bank, shuffler, &mut stats)?,
        GameKind::Matching => {
            play_matching(&mut console, bank, shuffler, &mut stats, options.category)?
        }
    };

    match summary {
        Some(summary) => print_summary(&mut console.out, &summary)?,
        None => writeln!(console.out, "Game stopped. Progress so far is saved.")?,
    }
    writeln!(console.out)?;
    print_stats(stats.stats(), &mut console.out)
}

//
// ─── CONSOLE ───────────────────────────────────────────────────────────────────
//

struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prompt and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt} ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Numbered menu. `None` when the player quits.
    fn choose<T: Copy>(&mut self, title: &str, choices: &[(T, String)]) -> Result<Option<T>> {
        loop {
            writeln!(self.out, "{title}")?;
            for (n, (_, label)) in choices.iter().enumerate() {
                writeln!(self.out, "  {}) {label}", n + 1)?;
            }
            let Some(line) = self.ask(">")? else {
                return Ok(None);
            };
            if line == QUIT {
                return Ok(None);
            }
            let picked = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| choices.get(idx));
            match picked {
                Some((value, _)) => return Ok(Some(*value)),
                None => writeln!(self.out, "Pick a number from 1 to {}.", choices.len())?,
            }
        }
    }
}

fn tutorial_text(game: GameKind) -> &'static str {
    match game {
        GameKind::Levers => {
            "Classify each lever. 1st class: the fulcrum sits between effort and load. \
             2nd class: the load sits between fulcrum and effort. \
             3rd class: the effort sits between fulcrum and load. +10 per correct answer."
        }
        GameKind::WhoAmI => {
            "Guess the body part from its hints. You start with 100 points; each extra hint \
             costs 15 and each wrong guess costs 10. After 3 wrong guesses the answer is shown."
        }
        GameKind::Movement => {
            "Read the movement and pick the correct analysis. +20 per correct answer."
        }
        GameKind::Matching => {
            "Put the right-hand terms in the order of the left-hand terms. \
             Check as often as you like; a fully correct board pays 10 per pair."
        }
    }
}

/// Returns `false` if the player left instead of starting.
fn show_tutorial<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tutorials: &TutorialService,
    game: GameKind,
) -> Result<bool> {
    if !tutorials.should_show(game)? {
        return Ok(true);
    }
    writeln!(console.out, "{}", tutorial_text(game))?;
    let Some(line) = console.ask("Press Enter to start, or type 'hide' to stop showing this:")?
    else {
        return Ok(false);
    };
    if line == QUIT {
        return Ok(false);
    }
    tutorials.dismiss(game, line.eq_ignore_ascii_case("hide"))?;
    Ok(true)
}

fn show_feedback(out: &mut impl Write, feedback: &AnswerFeedback) -> Result<()> {
    if feedback.correct {
        writeln!(out, "Correct! +{} points", feedback.awarded)?;
    } else if feedback.total > 1 {
        writeln!(out, "{}/{} correct.", feedback.matched, feedback.total)?;
    } else {
        writeln!(out, "Incorrect.")?;
    }
    if let Some(solution) = &feedback.solution {
        writeln!(out, "Answer: {solution}")?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, summary: &GameSummary) -> Result<()> {
    writeln!(
        out,
        "Finished {}: {}/{} correct, {} points.",
        summary.game().title(),
        summary.correct(),
        summary.rounds(),
        summary.score()
    )?;
    Ok(())
}

//
// ─── GAMES ─────────────────────────────────────────────────────────────────────
//

fn play_levers<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: Arc<QuestionBank>,
    shuffler: Shuffler,
    stats: &mut StatsService,
    difficulty: Option<Difficulty>,
) -> Result<Option<GameSummary>> {
    let mut session = LeversSession::new(bank, shuffler, Clock::System)?;
    let difficulty = match difficulty {
        Some(difficulty) => difficulty,
        None => {
            let choices: Vec<_> = Difficulty::ALL
                .into_iter()
                .map(|d| {
                    let count = session.bank().lever_count(d);
                    (d, format!("{} ({count} questions)", d.label()))
                })
                .collect();
            match console.choose("Choose a difficulty:", &choices)? {
                Some(difficulty) => difficulty,
                None => return Ok(None),
            }
        }
    };
    session.configure(difficulty)?;

    while let Some(round) = session.current_round() {
        let progress = session.progress();
        writeln!(
            console.out,
            "\n[{}/{}] {}",
            progress.index + 1,
            progress.total,
            round.question().question
        )?;
        for class in round.choices() {
            writeln!(console.out, "  {}) {}", class.number(), class.label())?;
        }
        let Some(line) = console.ask(">")? else {
            return Ok(None);
        };
        if line == QUIT {
            return Ok(None);
        }
        let Ok(class) = line.parse::<LeverClass>() else {
            writeln!(console.out, "Type 1, 2 or 3.")?;
            continue;
        };
        let feedback = session.submit(&class, stats)?;
        show_feedback(&mut console.out, &feedback)?;
        session.next()?;
    }
    Ok(Some(session.summary()?))
}

fn play_who_am_i<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: Arc<QuestionBank>,
    shuffler: Shuffler,
    stats: &mut StatsService,
) -> Result<Option<GameSummary>> {
    let mut session = WhoAmISession::new(bank, shuffler, Clock::System)?;
    let mut shown: Option<(usize, usize)> = None;

    while let Some(round) = session.current_round() {
        let progress = session.progress();
        let already = match shown {
            Some((index, hints)) if index == progress.index => hints,
            _ => {
                writeln!(
                    console.out,
                    "\n[{}/{}] Who am I? ({})",
                    progress.index + 1,
                    progress.total,
                    round.question().category.label()
                )?;
                0
            }
        };
        let hints = session.visible_hints();
        for (n, hint) in hints.iter().enumerate().skip(already) {
            writeln!(console.out, "  Hint {}: {hint}", n + 1)?;
        }
        shown = Some((progress.index, hints.len()));

        writeln!(
            console.out,
            "Worth {} points. Guess, '?' for another hint, '{QUIT}' to quit.",
            session.question().question_score()
        )?;
        let Some(line) = console.ask(">")? else {
            return Ok(None);
        };
        match line.as_str() {
            QUIT => return Ok(None),
            "" => {}
            "?" => match session.reveal_hint() {
                Ok(_) => {}
                Err(SessionError::HintsExhausted) => writeln!(console.out, "No more hints.")?,
                Err(err) => return Err(err.into()),
            },
            guess => {
                let feedback = session.submit(guess, stats)?;
                show_feedback(&mut console.out, &feedback)?;
                if feedback.is_resolved() {
                    session.next()?;
                } else {
                    writeln!(
                        console.out,
                        "Try again ({} of {WHO_AM_I_MAX_MISSES} wrong guesses used).",
                        feedback.attempts
                    )?;
                }
            }
        }
    }
    Ok(Some(session.summary()?))
}

fn play_movement<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: Arc<QuestionBank>,
    shuffler: Shuffler,
    stats: &mut StatsService,
) -> Result<Option<GameSummary>> {
    let mut session = MovementSession::new(bank, shuffler, Clock::System)?;

    while let Some(round) = session.current_round() {
        let progress = session.progress();
        let question = round.question();
        writeln!(
            console.out,
            "\n[{}/{}] {}",
            progress.index + 1,
            progress.total,
            question.title
        )?;
        writeln!(console.out, "{}", question.description)?;
        writeln!(console.out, "(image: {})", question.image_url)?;
        for (n, option) in round.options().iter().enumerate() {
            writeln!(console.out, "  {}) {}", n + 1, option.text)?;
        }
        let option_count = round.options().len();
        let Some(line) = console.ask(">")? else {
            return Ok(None);
        };
        if line == QUIT {
            return Ok(None);
        }
        let Some(index) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            writeln!(console.out, "Pick a number from 1 to {option_count}.")?;
            continue;
        };
        match session.submit(&index, stats) {
            Ok(feedback) => {
                show_feedback(&mut console.out, &feedback)?;
                session.next()?;
            }
            Err(SessionError::InvalidAnswer(_)) => {
                writeln!(console.out, "Pick a number from 1 to {option_count}.")?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(Some(session.summary()?))
}

fn play_matching<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: Arc<QuestionBank>,
    shuffler: Shuffler,
    stats: &mut StatsService,
    category: Option<MatchingCategory>,
) -> Result<Option<GameSummary>> {
    let mut session = MatchingSession::new(bank, shuffler, Clock::System)?;
    let category = match category {
        Some(category) => category,
        None => {
            let choices: Vec<_> = MatchingCategory::ALL
                .into_iter()
                .map(|c| {
                    let count = session.bank().matching_count(c);
                    (c, format!("{} ({count} pairs)", c.label()))
                })
                .collect();
            match console.choose("Choose a category:", &choices)? {
                Some(category) => category,
                None => return Ok(None),
            }
        }
    };
    session.configure(category)?;

    while let Some(round) = session.current_round() {
        writeln!(console.out)?;
        let marks = session.feedback().map(|feedback| feedback.marks.clone());
        for (n, left) in round.left_column().enumerate() {
            let mark = match marks.as_ref().and_then(|marks| marks.get(n)) {
                Some(true) => " ✓",
                Some(false) => " ✗",
                None => "",
            };
            writeln!(console.out, "  {}) {left}{mark}", n + 1)?;
        }
        for (n, right) in round.right_column().iter().enumerate() {
            writeln!(console.out, "  {}) {right}", slot_letter(n))?;
        }
        let slots = round.right_column().len();
        writeln!(
            console.out,
            "Letters in left order to check, 's' to shuffle, 'n' to finish, '{QUIT}' to quit."
        )?;
        let Some(line) = console.ask(">")? else {
            return Ok(None);
        };
        match line.as_str() {
            QUIT => return Ok(None),
            "s" => session.reshuffle()?,
            "n" => match session.next() {
                Ok(_) => {}
                Err(SessionError::Unresolved) => {
                    writeln!(console.out, "Check your answer at least once first.")?;
                }
                Err(err) => return Err(err.into()),
            },
            letters => {
                let Some(arrangement) = parse_arrangement(letters, slots) else {
                    writeln!(console.out, "Type {slots} letters, one per left term.")?;
                    continue;
                };
                match session.submit(&arrangement, stats) {
                    Ok(feedback) => {
                        show_feedback(&mut console.out, &feedback)?;
                        if feedback.is_resolved() {
                            session.next()?;
                        }
                    }
                    Err(SessionError::InvalidAnswer(reason)) => {
                        writeln!(console.out, "{reason}. Use each letter once.")?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
    Ok(Some(session.summary()?))
}

fn slot_letter(slot: usize) -> char {
    u8::try_from(slot)
        .ok()
        .and_then(|n| b'a'.checked_add(n))
        .map_or('?', char::from)
}

/// Read letters `a`, `b`, ... as right-column positions. Separators are
/// ignored. `None` if a letter is out of range or the count is wrong.
fn parse_arrangement(input: &str, slots: usize) -> Option<Vec<usize>> {
    let arrangement: Vec<usize> = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            let c = c.to_ascii_lowercase();
            c.is_ascii_lowercase()
                .then(|| usize::from(c as u8 - b'a'))
                .filter(|slot| *slot < slots)
        })
        .collect::<Option<_>>()?;
    (arrangement.len() == slots).then_some(arrangement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrangement_letters_map_to_slots() {
        assert_eq!(parse_arrangement("cab", 3), Some(vec![2, 0, 1]));
        assert_eq!(parse_arrangement("C, a, B", 3), Some(vec![2, 0, 1]));
        assert_eq!(parse_arrangement("ab", 3), None);
        assert_eq!(parse_arrangement("abz", 3), None);
        assert_eq!(parse_arrangement("a1b", 3), None);
    }

    #[test]
    fn letters_follow_slots() {
        assert_eq!(slot_letter(0), 'a');
        assert_eq!(slot_letter(7), 'h');
    }

    #[test]
    fn menu_rejects_out_of_range_picks() {
        let mut out = Vec::new();
        let mut console = Console {
            input: "9\n2\n".as_bytes(),
            out: &mut out,
        };
        let choices = [(Difficulty::Easy, "Fácil".to_owned()), (Difficulty::Hard, "Difícil".to_owned())];
        assert_eq!(
            console.choose("Choose:", &choices).unwrap(),
            Some(Difficulty::Hard)
        );
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Pick a number from 1 to 2."));
    }

    #[test]
    fn end_of_input_reads_as_none() {
        let mut out = Vec::new();
        let mut console = Console {
            input: "".as_bytes(),
            out: &mut out,
        };
        assert_eq!(console.ask(">").unwrap(), None);
    }
}
