use std::sync::Arc;
use tablescore_core::{
    build_roster, Engine, EventBus, GameCatalog, GameSettings, GoalView, Phase, RosterRequest, Suit,
};
use tablescore_data::builtin_catalog;
use tablescore_sync::{HostSession, Replica, SyncError, SyncHub};

fn catalog() -> GameCatalog {
    builtin_catalog().expect("catalog")
}

fn host(key: &str, randomize: bool) -> HostSession {
    let config = catalog().config_or_generic(key);
    let names = ["Angie", "Derek", "Lina", "Quinn"];
    let players = build_roster(&config, &RosterRequest::named(&names, false)).expect("roster");
    let settings = GameSettings::resolve(&config, false, randomize, None);
    let engine = Engine::new(config, players, settings, 11).expect("engine");
    HostSession::start(engine, Arc::new(SyncHub::new())).expect("start")
}

fn raw(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn viewer_replica_follows_host() {
    let mut session = host("shanghai", true);
    let (viewer, replica) = Replica::follow(session.hub(), catalog()).expect("follow");
    assert_eq!(session.hub().viewer_count(), 1);
    assert_eq!(replica.lock().engine().map(|e| e.round()), Some(1));

    let mut events = EventBus::default();
    session
        .submit_round(&raw(&["0", "15", "20", "5"]), &[], &mut events)
        .expect("round");
    {
        let replica = replica.lock();
        let engine = replica.engine().expect("replica");
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.export(), session.engine().export());
    }

    assert!(session.hub().claim_slot(viewer, 2).expect("claim"));
    replica.lock().set_seat(Some(2));
    let view = replica.lock().view().expect("view");
    assert_eq!(view.identity.as_deref(), Some("Lina"));
    assert_eq!(view.action_label, None);
    assert!(!view.can_undo);
    assert!(matches!(view.players[2].goal, Some(GoalView::Shown(_))));
    assert_eq!(view.players[0].goal, Some(GoalView::Hidden));

    session.undo(&mut events).expect("undo");
    assert_eq!(replica.lock().engine().map(|e| e.round()), Some(1));

    session.hub().leave(viewer);
    assert_eq!(session.hub().viewer_count(), 0);
    assert_eq!(session.hub().claims().owner(2), None);
}

#[test]
fn staged_trump_reaches_viewers() {
    let mut session = host("oldhell", false);
    let (_, replica) = Replica::follow(session.hub(), catalog()).expect("follow");
    session
        .stage(|engine| engine.set_trump(Suit::Clubs))
        .expect("trump");
    assert_eq!(
        replica.lock().engine().and_then(|e| e.current_trump()),
        Some(Suit::Clubs)
    );
    session
        .submit_round(&raw(&["3", "3", "3", "3"]), &[], &mut EventBus::default())
        .expect("bids");
    let replica = replica.lock();
    let engine = replica.engine().expect("replica");
    assert_eq!(engine.phase(), Phase::Score);
    assert_eq!(engine.players()[1].bid, 3);
}

#[test]
fn rejected_round_is_not_published() {
    let mut session = host("rummikub", false);
    let version = session.hub().version();
    let err = session
        .submit_round(&raw(&["3", "4", "5", "6"]), &[], &mut EventBus::default())
        .expect_err("no winner");
    assert!(matches!(err, SyncError::Engine(_)));
    assert_eq!(session.hub().version(), version);
}

#[test]
fn late_joiner_gets_current_state() {
    let mut session = host("triominos", false);
    session
        .submit_round(&raw(&["0", "10", "20", "30"]), &[], &mut EventBus::default())
        .expect("round");
    let (_, replica) = Replica::follow(session.hub(), catalog()).expect("follow");
    let totals: Vec<i64> = replica
        .lock()
        .engine()
        .expect("replica")
        .players()
        .iter()
        .map(|p| p.total)
        .collect();
    assert_eq!(totals, [0, 10, 20, 30]);
}
