//! End-to-end tests for saving and resuming sessions
//!
//! These run the full loop through the file-backed store: play, quit,
//! come back, get the resume prompt, accept or decline.

use archenemy::core::{CardId, Deck, DeckId, SchemeCard};
use archenemy::session::{
    OutputMode, SchemeAction, ScriptedController, Session, SessionRunner, SessionSnapshot,
    VerbosityLevel, SNAPSHOT_KEY,
};
use archenemy::store::{FileSnapshotStore, SnapshotStore};
use archenemy::ArchenemyError;
use jiff::Timestamp;

fn deck() -> Deck {
    let cards = vec![
        SchemeCard::new(CardId::new(0), "A".to_string(), "Scheme".to_string()),
        SchemeCard::new(CardId::new(0), "B".to_string(), "Ongoing Scheme".to_string()),
        SchemeCard::new(CardId::new(0), "C".to_string(), "Scheme".to_string()),
        SchemeCard::new(CardId::new(0), "D".to_string(), "Scheme".to_string()),
    ];
    Deck {
        id: DeckId::new(1),
        name: "resume deck".to_string(),
        description: None,
        owner: "archenemy".to_string(),
        public: false,
        archived: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        cards,
    }
}

fn quiet_session(seed: u64) -> Session {
    let mut session = Session::with_seed(seed);
    session.logger.set_verbosity(VerbosityLevel::Silent);
    session.logger.set_output_mode(OutputMode::Memory);
    session
}

fn play_and_quit(store: &FileSnapshotStore) {
    let mut session = quiet_session(21);
    session.select_deck(DeckId::new(1), &[deck()]).unwrap();
    session.start_game().unwrap();

    let mut runner = SessionRunner::new(session, store);
    let mut controller = ScriptedController::new(vec![
        SchemeAction::Draw,
        SchemeAction::Draw,
        SchemeAction::Quit,
    ]);
    runner.run(&mut controller).unwrap();
}

#[test]
fn resume_accept_restores_play_state_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    play_and_quit(&FileSnapshotStore::new(dir.path()).unwrap());

    // A brand-new store instance sees the same file.
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    let mut runner = SessionRunner::new(quiet_session(0), &store);
    let mut controller = ScriptedController::new(vec![SchemeAction::Draw, SchemeAction::Quit])
        .with_resume(true);

    assert!(runner.offer_resume(&mut controller).unwrap());
    assert!(runner.session.game_started);
    assert!(runner.session.current.is_some());
    assert_eq!(runner.session.cards.len(), 4);

    // Play continues from the restored state.
    runner.run(&mut controller).unwrap();
    assert_eq!(runner.session.pool.len(), 1);
}

#[test]
fn resume_decline_discards_the_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    play_and_quit(&store);

    let mut runner = SessionRunner::new(quiet_session(0), &store);
    let mut controller = ScriptedController::new(vec![]).with_resume(false);

    assert!(!runner.offer_resume(&mut controller).unwrap());
    assert!(!runner.session.game_started);
    assert!(SessionSnapshot::load(&store).unwrap().is_none());
}

#[test]
fn end_game_discards_the_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();

    let mut session = quiet_session(33);
    session.select_deck(DeckId::new(1), &[deck()]).unwrap();
    session.start_game().unwrap();

    let mut runner = SessionRunner::new(session, &store);
    let mut controller = ScriptedController::new(vec![
        SchemeAction::Draw,
        SchemeAction::EndGame,
    ]);
    runner.run(&mut controller).unwrap();

    assert!(SessionSnapshot::load(&store).unwrap().is_none());
    assert!(!dir.path().join(format!("{SNAPSHOT_KEY}.json")).exists());
}

#[test]
fn corrupt_save_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    std::fs::write(dir.path().join(format!("{SNAPSHOT_KEY}.json")), "{oops").unwrap();

    assert!(matches!(
        SessionSnapshot::load(&store),
        Err(ArchenemyError::CorruptSnapshot(_))
    ));

    // The runner shrugs it off and starts fresh.
    let mut runner = SessionRunner::new(quiet_session(0), &store);
    let mut controller = ScriptedController::new(vec![]).with_resume(true);
    assert!(!runner.offer_resume(&mut controller).unwrap());
}

#[test]
fn snapshot_file_uses_the_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    play_and_quit(&store);

    let raw = store.read(SNAPSHOT_KEY).unwrap().unwrap();
    assert_eq!(raw.get("version").unwrap(), 1);
    assert!(raw.get("gameStarted").unwrap().as_bool().unwrap());
    let cards = raw.get("cards").unwrap();
    for key in ["currentCard", "previousCards", "ongoingCards", "cardPool"] {
        assert!(cards.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn future_version_save_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();

    let value = serde_json::json!({
        "version": 99,
        "gameStarted": true,
        "cards": {
            "currentCard": null,
            "previousCards": [],
            "ongoingCards": [],
            "cardPool": []
        }
    });
    store.write(SNAPSHOT_KEY, &value).unwrap();

    assert!(matches!(
        SessionSnapshot::load(&store),
        Err(ArchenemyError::SnapshotVersion { found: 99, .. })
    ));
}
