use bio_core::model::{GameKind, PlayerStats};
use storage::repository::{
    KeyValueStore, STATS_KEY, StatsRepository, StorageError, TutorialFlagRepository,
};
use storage::{FileStore, Storage};

#[test]
fn file_store_persists_stats_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut stats = PlayerStats::default();
    stats.add_score(20, GameKind::Movement);
    stats.increment_streak();
    stats.add_xp(150);

    {
        let store = FileStore::open(dir.path()).expect("open");
        store.save_stats(&stats).expect("save");
    }

    let reopened = FileStore::open(dir.path()).expect("reopen");
    let loaded = reopened.load_stats().expect("load").expect("snapshot");
    assert_eq!(loaded, stats);
    assert_eq!(loaded.level(), 2);
    assert!(dir.path().join(format!("{STATS_KEY}.json")).exists());
}

#[test]
fn file_store_creates_nested_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b");
    let storage = Storage::file(&nested).expect("storage");

    storage
        .tutorials
        .set_tutorial_hidden(GameKind::WhoAmI, true)
        .expect("flag");
    assert!(nested.join("whoami-tutorial-hidden.json").exists());
    assert!(
        storage
            .tutorials
            .tutorial_hidden(GameKind::WhoAmI)
            .expect("read flag")
    );
}

#[test]
fn file_store_overwrites_previous_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");

    store.set("k", "one").expect("first write");
    store.set("k", "two").expect("second write");
    assert_eq!(store.get("k").expect("read").as_deref(), Some("two"));
    assert!(!dir.path().join("k.json.tmp").exists());
}

#[test]
fn corrupted_snapshot_on_disk_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(format!("{STATS_KEY}.json")),
        "definitely not json",
    )
    .expect("write garbage");

    let store = FileStore::open(dir.path()).expect("open");
    assert!(store.load_stats().is_err());
}

#[test]
fn non_utf8_snapshot_is_reported_as_malformed() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(format!("{STATS_KEY}.json")), [0xff, 0xfe])
        .expect("write bytes");

    let store = FileStore::open(dir.path()).expect("open");
    assert!(matches!(
        store.load_stats(),
        Err(StorageError::Serialization(_))
    ));
}
