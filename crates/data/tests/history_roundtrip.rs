use std::path::PathBuf;
use tablescore_core::{
    build_roster, Engine, EventBus, GameCatalog, GameSettings, Phase, RosterRequest, Suit,
};
use tablescore_data::load_catalog_dir;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn catalog() -> GameCatalog {
    load_catalog_dir(&assets_root()).expect("load catalog")
}

fn start(key: &str, names: &[&str], use_teams: bool, randomize: bool) -> Engine {
    let config = catalog().config_or_generic(key);
    let players = build_roster(&config, &RosterRequest::named(names, use_teams)).expect("roster");
    let settings = GameSettings::resolve(&config, use_teams, randomize, None);
    Engine::new(config, players, settings, 31).expect("engine")
}

fn raw(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Submits one record and checks that it survives export/import and that
/// undo, on both the live and the restored engine, returns to the exact
/// prior state. Leaves `game` with the record applied.
fn submit_with_modifiers(game: &mut Engine, values: &[&str], modifiers: &[Vec<String>]) {
    let mut bus = EventBus::default();
    let before = game.export();
    game.submit_round(&raw(values), modifiers, &mut bus)
        .unwrap_or_else(|err| panic!("{} {values:?}: {err}", before.game_key));
    let after = game.export();
    assert_ne!(after, before, "{values:?} changed nothing");

    let mut restored = Engine::import_from_catalog(&after, &catalog()).expect("import");
    assert_eq!(restored.export(), after, "import of {values:?}");
    assert!(restored.undo(&mut bus).expect("undo restored").is_some());
    assert_eq!(restored.export(), before, "undo after import of {values:?}");

    let undone = game.undo(&mut bus).expect("undo").expect("record");
    assert_eq!(game.export(), before, "undo of {values:?}");
    assert_eq!(undone, after.state.history[after.state.history.len() - 1]);

    game.submit_round(&raw(values), modifiers, &mut bus).expect("resubmit");
    assert_eq!(game.export(), after, "resubmit of {values:?}");
}

fn submit(game: &mut Engine, values: &[&str]) {
    submit_with_modifiers(game, values, &[]);
}

/// Undoes everything and returns how many records came off.
fn unwind(game: &mut Engine) -> usize {
    let mut bus = EventBus::default();
    let mut count = 0;
    while game.undo(&mut bus).expect("undo").is_some() {
        count += 1;
    }
    count
}

const FOUR: [&str; 4] = ["Angie", "Derek", "Lina", "Quinn"];
const THREE: [&str; 3] = ["Angie", "Derek", "Lina"];

#[test]
fn shanghai_individual_random_goals() {
    let mut game = start("shanghai", &FOUR, false, true);
    let fresh = game.export();
    assert!(fresh.state.random_map.is_some());
    submit(&mut game, &["0", "15", "20", "5"]);
    submit(&mut game, &["10", "0", "5", "5"]);
    assert_eq!(unwind(&mut game), 2);
    assert_eq!(game.export(), fresh);
}

#[test]
fn shanghai_teams_random_goals() {
    let mut game = start("shanghai", &FOUR, true, true);
    let fresh = game.export();
    submit(&mut game, &["0", "0", "35", "40"]);
    submit(&mut game, &["15", "10", "0", "0"]);
    assert_eq!(unwind(&mut game), 2);
    assert_eq!(game.export(), fresh);
}

#[test]
fn hearts_plain_then_moon() {
    let mut game = start("hearts", &FOUR, false, false);
    let fresh = game.export();
    submit(&mut game, &["5", "5", "8", "8"]);
    submit(&mut game, &["0", "26", "0", "0"]);
    assert_eq!(game.history()[1].scores, [26, 0, 26, 26]);
    assert_eq!(unwind(&mut game), 2);
    assert_eq!(game.export(), fresh);
}

#[test]
fn rummikub_pot_records() {
    let mut game = start("rummikub", &THREE, false, false);
    submit(&mut game, &["0", "12", "8"]);
    submit(&mut game, &["7", "5", "0"]);
    let totals: Vec<i64> = game.players().iter().map(|p| p.total).collect();
    assert_eq!(totals, [13, -17, 4]);
}

#[test]
fn triominos_records() {
    let mut game = start("triominos", &THREE, false, false);
    submit(&mut game, &["0", "7", "11"]);
    submit(&mut game, &["4", "0", "9"]);
}

#[test]
fn qwirkle_records_with_helpers() {
    let mut game = start("qwirkle", &["Lina", "Nick"], false, false);
    submit(&mut game, &["12", "7"]);
    let helpers = vec![vec!["q".to_string()], vec!["end".to_string()]];
    submit_with_modifiers(&mut game, &["9", "4"], &helpers);
    assert_eq!(game.history()[1].meta.modifiers, helpers);
    assert_eq!(game.players()[0].total, 27);
}

#[test]
fn mexican_train_restores_starter() {
    let mut game = start("mexicantrain", &THREE, false, false);
    game.set_starter(1).expect("starter");
    let opening = game.export();
    submit(&mut game, &["0", "14", "22"]);
    assert_eq!(game.manual_starter(), None);
    game.set_starter(2).expect("starter");
    submit(&mut game, &["9", "0", "3"]);
    assert_eq!(unwind(&mut game), 2);
    assert_eq!(game.export(), opening);
}

#[test]
fn spades_team_hands() {
    let mut game = start("spades", &FOUR, true, false);
    for _ in 0..3 {
        submit(&mut game, &["4", "3", "3", "3"]);
        assert_eq!(game.phase(), Phase::Score);
        submit(&mut game, &["4", "3", "3", "3"]);
        assert_eq!(game.phase(), Phase::Bid);
    }
    assert_eq!(game.round(), 4);
}

#[test]
fn spades_nil_and_blind_nil() {
    let mut game = start("spades", &FOUR, false, false);
    submit(&mut game, &["0", "4", "4", "4"]);
    submit(&mut game, &["0", "4", "4", "5"]);
    game.toggle_blind_nil(3).expect("blind nil");
    submit(&mut game, &["4", "4", "4", "0"]);
    assert!(game.players()[3].is_blind_nil);
    submit(&mut game, &["5", "4", "4", "0"]);
    assert_eq!(game.history()[1].scores[3], 200);
}

#[test]
fn old_hell_two_hands() {
    let mut game = start("oldhell", &FOUR, false, false);
    game.set_trump(Suit::Hearts).expect("trump");
    let opening = game.export();
    submit(&mut game, &["3", "3", "3", "3"]);
    submit(&mut game, &["true", "false", "true", "false"]);
    assert_eq!(game.hand_size(), Some(12));
    assert_eq!(game.current_trump(), None);

    game.set_trump(Suit::Clubs).expect("trump");
    submit(&mut game, &["2", "2", "2", "2"]);
    submit(&mut game, &["false", "true", "true", "true"]);
    assert_eq!(game.hand_size(), Some(11));

    assert_eq!(unwind(&mut game), 4);
    assert_eq!(game.export(), opening);
}
