//! Script replay through the session manager.

use std::sync::Arc;

use strictly_words::{CommandOutcome, DictionaryRegistry, GameConfig, GameSetup, Rack, Reserve};
use strictly_words_session::{GameSession, Script, SessionConfig, SessionManager};

fn manager() -> SessionManager {
    let registry = DictionaryRegistry::new();
    registry.load("fr", "Test", ["vendre", "eau"]);
    SessionManager::new(Arc::new(registry), SessionConfig::default())
}

#[test]
fn test_replay_reports_rejections_and_continues() {
    let script = Script::parse(
        "players ana bob\nseed 9\n\
         ana: pass\n\
         ana: pass\n\
         bob: pass\n\
         ana: exchange zz\n",
    )
    .expect("Parse failed");
    let manager = manager();
    let reports = script
        .replay(&manager, "t1".to_string(), None, None)
        .expect("Replay failed");

    assert_eq!(reports.len(), 4);
    let rejected: Vec<usize> = reports
        .iter()
        .filter(|r| r.rejection.is_some())
        .map(|r| r.line)
        .collect();
    assert_eq!(rejected, [4, 6]);
    assert!(
        reports[1]
            .rejection
            .as_deref()
            .is_some_and(|reason| reason.contains("turn"))
    );
    assert_eq!(
        reports[0].outcome,
        Some(CommandOutcome::Passed { game_over: false })
    );

    let history = manager.history("t1").expect("Session kept");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].player(), "bob");
}

#[test]
fn test_replay_with_unknown_dictionary_fails() {
    let script = Script::parse("players ana\ndictionary en\nana: pass\n").expect("Parse failed");
    let manager = manager();
    assert!(script.replay(&manager, "t1".to_string(), None, None).is_err());
    // The command-line dictionary wins over the script's.
    let reports = script
        .replay(&manager, "t1".to_string(), Some("fr"), None)
        .expect("Replay failed");
    assert_eq!(reports.len(), 1);
}

#[test]
fn test_placement_is_recorded_with_score() {
    let registry = DictionaryRegistry::new();
    registry.load("fr", "Test", ["oiseau"]);
    // Every objective public so the cheap vowel-heavy move earns bonuses.
    let config = SessionConfig::from_toml_str(
        "[game]\npublic_objectives = 5\nprivate_objectives_per_player = 0\n",
    )
    .expect("Config parsed");
    let game = GameSetup::new("fr")
        .config(config.game().clone())
        .player_with_rack("ana", Rack::from_chars("oiseaux").expect("Valid rack"))
        .player("bob")
        .reserve(Reserve::from_counts([('e', 30)]))
        .seed(5)
        .start()
        .expect("Game started");
    let mut session = GameSession::new("t1".to_string(), game);

    let outcome = session
        .execute("ana", "place h8h oiseau", &registry)
        .expect("Placement accepted");
    assert!(matches!(outcome, CommandOutcome::Placed(_)));

    let record = &session.history()[0];
    assert_eq!(record.session_id(), "t1");
    assert_eq!(record.player(), "ana");
    assert_eq!(record.command(), "place h8h oiseau");
    assert_eq!(*record.turn(), 1);
    // o i s e a(double letter) u = 7, doubled on h8.
    assert_eq!(*record.score(), 14);
    // Four vowels (20) and five letters under 15 points (25).
    assert_eq!(*record.bonus(), 45);

    let json = serde_json::to_string(record).expect("Record serializes");
    assert!(json.contains("\"score\":14"));
}

#[test]
fn test_config_game_rules_reach_new_sessions() {
    let registry = DictionaryRegistry::new();
    registry.load("fr", "Test", ["eau"]);
    let config = SessionConfig::from_toml_str(
        "[game]\nobjectives_enabled = false\nmax_consecutive_passes = 1\n",
    )
    .expect("Config parsed");
    assert_eq!(
        config.game(),
        &GameConfig::default()
            .without_objectives()
            .with_max_consecutive_passes(1)
    );

    let manager = SessionManager::new(Arc::new(registry), config);
    manager
        .create_session("t1".to_string(), None, vec!["ana".into()], 1)
        .expect("Session created");
    assert!(
        manager
            .with_session("t1", |s| s.game().objectives().objectives().is_empty())
            .expect("Session exists")
    );
    assert_eq!(
        manager.execute("t1", "ana", "pass").expect("Pass accepted"),
        CommandOutcome::Passed { game_over: true }
    );
}
