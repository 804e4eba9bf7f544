/// Integration tests for sled-backed sessions: restore, fallback and CLI-style flows.
use shadowquest::config::Config;
use shadowquest::progression::{
    GameSession, Player, SessionOptions, SledSnapshotStore, SledSnapshotStoreBuilder,
    SnapshotStore,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> GameSession<SledSnapshotStore> {
    let store = SledSnapshotStoreBuilder::new(dir.path())
        .with_key("test-player")
        .open()
        .unwrap();
    GameSession::open(store, SessionOptions::default())
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let instance_id = {
        let mut session = open(&dir);
        session.grant_experience(120);
        session.learn_skill("shadow_step").unwrap();
        session.accept_quest("daily_reading").unwrap().id
    };

    let mut session = open(&dir);
    assert_eq!(session.player().level, 2);
    assert_eq!(session.player().experience, 20);
    assert_eq!(session.player().agility, 14);
    assert!(session.player().has_skill("shadow_step"));
    assert_eq!(session.state().quests.active.len(), 1);

    session.complete_quest(&instance_id).unwrap();
    assert_eq!(session.player().experience, 50);
    assert_eq!(session.player().shadow_points, 8);
}

#[test]
fn test_snapshot_round_trip_is_field_for_field() {
    let dir = TempDir::new().unwrap();
    let expected = {
        let mut session = open(&dir);
        session.grant_experience(400);
        session.record_login();
        session.advance_rank();
        session.player().clone()
    };
    let session = open(&dir);
    assert_eq!(session.player(), &expected);
}

#[test]
fn test_corrupt_snapshot_starts_fresh() {
    let dir = TempDir::new().unwrap();
    {
        let db = sled::open(dir.path()).unwrap();
        let tree = db.open_tree("shadowquest").unwrap();
        tree.insert("test-player", &b"\x00\x01garbage"[..]).unwrap();
        tree.flush().unwrap();
    }
    let session = open(&dir);
    assert_eq!(session.player(), &Player::default());
}

#[test]
fn test_config_drives_session_options() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.player.name = "Igris".into();
    config.progression.cascade_level_ups = false;
    config.storage.data_dir = dir.path().to_str().unwrap().to_string();

    let store = SledSnapshotStoreBuilder::new(&config.storage.data_dir)
        .with_key(config.storage.snapshot_key.clone())
        .open()
        .unwrap();
    let mut session = GameSession::open(store, config.session_options());
    assert_eq!(session.player().name, "Igris");
    session.grant_experience(1000);
    assert_eq!(session.player().level, 2);

    let saved = session.store().load_player().unwrap().unwrap();
    assert_eq!(saved.level, 2);
}

#[test]
fn test_notifications_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.grant_experience(100);
        assert!(!session.state().system.notifications.is_empty());
    }
    let session = open(&dir);
    assert!(session.state().system.notifications.is_empty());
    assert_eq!(session.player().level, 2);
}

#[test]
fn test_reset_is_durable_across_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.grant_experience(400);
        session.accept_quest("daily_water").unwrap();
        session.reset();
    }
    let session = open(&dir);
    assert_eq!(session.player().level, 1);
    assert_eq!(session.player().experience, 0);
    assert!(session.state().quests.active.is_empty());
}
