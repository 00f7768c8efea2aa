use std::sync::Arc;

use bio_core::model::{Difficulty, GameKind, MatchingCategory, QuestionBank};
use services::games::Resolution;
use services::{
    Clock, LeversSession, MatchingSession, Phase, Shuffler, StatsService, TutorialService,
    WhoAmISession,
};
use storage::Storage;

fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::bundled().unwrap())
}

#[test]
fn stats_survive_a_restart_of_the_process() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Storage::file(dir.path()).unwrap();
        let mut stats = StatsService::load(storage.stats.clone()).unwrap();
        let mut game = WhoAmISession::new(bank(), Shuffler::Identity, Clock::fixed_now()).unwrap();

        game.reveal_hint().unwrap();
        game.submit("resposta errada", &mut stats).unwrap();
        let answer = game.current_round().unwrap().question().answer.clone();
        let feedback = game.submit(&answer, &mut stats).unwrap();
        assert_eq!(feedback.awarded, 75);
    }

    let storage = Storage::file(dir.path()).unwrap();
    let stats = StatsService::load(storage.stats.clone()).unwrap();
    assert_eq!(stats.stats().total_score(), 75);
    assert_eq!(stats.stats().game_score(GameKind::WhoAmI), 75);
    assert_eq!(stats.stats().current_streak(), 1);
    assert_eq!(stats.stats().level(), 1);
}

#[test]
fn undecodable_snapshot_starts_fresh_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join(format!("{}.json", storage::STATS_KEY));
    std::fs::write(&snapshot, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let storage = Storage::file(dir.path()).unwrap();
    let mut stats = StatsService::load(storage.stats.clone()).unwrap();
    assert_eq!(stats.stats(), &bio_core::model::PlayerStats::default());

    stats.add_score(10, GameKind::Levers).unwrap();
    let reloaded = StatsService::load(storage.stats.clone()).unwrap();
    assert_eq!(reloaded.stats().total_score(), 10);
}

#[test]
fn streak_carries_across_games() {
    let storage = Storage::in_memory();
    let mut stats = StatsService::load(storage.stats.clone()).unwrap();

    let mut levers = LeversSession::new(bank(), Shuffler::Identity, Clock::fixed_now()).unwrap();
    levers.configure(Difficulty::Easy).unwrap();
    for _ in 0..3 {
        let class = levers.current_round().unwrap().question().class;
        levers.submit(&class, &mut stats).unwrap();
        levers.next().unwrap();
    }
    assert_eq!(stats.stats().current_streak(), 3);

    let mut matching = MatchingSession::new(bank(), Shuffler::Identity, Clock::fixed_now()).unwrap();
    matching.configure(MatchingCategory::LeverExample).unwrap();
    let arrangement = matching.current_round().unwrap().current_arrangement();
    let feedback = matching.submit(&arrangement, &mut stats).unwrap();
    assert_eq!(feedback.resolution, Some(Resolution::Correct));

    assert_eq!(stats.stats().current_streak(), 4);
    assert_eq!(stats.stats().best_streak(), 4);
    assert_eq!(stats.stats().total_score(), 30 + 80);
    assert_eq!(stats.stats().game_score(GameKind::Levers), 30);
    assert_eq!(stats.stats().game_score(GameKind::Matching), 80);

    stats.reset_game(GameKind::Levers).unwrap();
    assert_eq!(stats.stats().game_score(GameKind::Levers), 0);
    assert_eq!(stats.stats().total_score(), 110);
}

#[test]
fn full_levers_tier_produces_summary() {
    let storage = Storage::in_memory();
    let mut stats = StatsService::load(storage.stats.clone()).unwrap();
    let mut levers = LeversSession::new(bank(), Shuffler::Identity, Clock::fixed_now()).unwrap();
    levers.configure(Difficulty::Hard).unwrap();

    let mut expected_correct = 0;
    while levers.phase() != Phase::Completed {
        let right = levers.current_round().unwrap().question().class;
        let pick = if levers.progress().index % 2 == 0 {
            expected_correct += 1;
            right
        } else {
            levers
                .current_round()
                .unwrap()
                .choices()
                .into_iter()
                .find(|class| *class != right)
                .unwrap()
        };
        levers.submit(&pick, &mut stats).unwrap();
        levers.next().unwrap();
    }

    let summary = levers.summary().unwrap();
    assert_eq!(summary.rounds(), 12);
    assert_eq!(summary.correct(), expected_correct);
    assert_eq!(summary.incorrect(), 12 - expected_correct);
    assert_eq!(summary.score(), expected_correct * 10);
    assert_eq!(summary.started_at(), summary.completed_at());
    assert_eq!(stats.stats().best_streak(), 1);
}

#[test]
fn tutorial_flags_are_stored_next_to_stats() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::file(dir.path()).unwrap();
    let tutorials = TutorialService::new(storage.tutorials.clone());

    tutorials.dismiss(GameKind::Matching, true).unwrap();
    assert!(dir.path().join("matching-tutorial-hidden.json").exists());

    let reopened = Storage::file(dir.path()).unwrap();
    let tutorials = TutorialService::new(reopened.tutorials.clone());
    assert!(!tutorials.should_show(GameKind::Matching).unwrap());
    assert!(tutorials.should_show(GameKind::Levers).unwrap());
}
