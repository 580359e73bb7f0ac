use std::path::PathBuf;
use tablescore_core::{
    build_roster, Engine, Event, EventBus, GameCatalog, GameSettings, Phase, RosterRequest, Suit,
    ValidationError,
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

fn start(key: &str, names: &[&str], use_teams: bool) -> Engine {
    let config = catalog().config_or_generic(key);
    let players = build_roster(&config, &RosterRequest::named(names, use_teams)).expect("roster");
    let settings = GameSettings::resolve(&config, use_teams, false, None);
    Engine::new(config, players, settings, 2024).expect("engine")
}

fn raw(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn submit(engine: &mut Engine, values: &[&str]) -> Result<(), ValidationError> {
    engine.submit_round(&raw(values), &[], &mut EventBus::default())
}

fn totals(engine: &Engine) -> Vec<i64> {
    engine.players().iter().map(|p| p.total).collect()
}

const FOUR: [&str; 4] = ["Angie", "Derek", "Lina", "Quinn"];

#[test]
fn hearts_plain_hand() {
    let mut game = start("hearts", &FOUR, false);
    submit(&mut game, &["5", "5", "8", "8"]).expect("hand");
    assert_eq!(totals(&game), [5, 5, 8, 8]);
}

#[test]
fn hearts_moon_shot() {
    let mut game = start("hearts", &FOUR, false);
    submit(&mut game, &["0", "26", "0", "0"]).expect("moon");
    assert_eq!(game.history()[0].scores, [26, 0, 26, 26]);
    assert_eq!(totals(&game), [26, 0, 26, 26]);
}

#[test]
fn old_hell_impossible_outcome_keeps_bids() {
    let mut game = start("oldhell", &FOUR, false);
    assert_eq!(game.hand_size(), Some(13));
    game.set_trump(Suit::Spades).expect("trump");
    submit(&mut game, &["3", "3", "3", "3"]).expect("bids");
    assert_eq!(game.phase(), Phase::Score);
    let err = submit(&mut game, &["true", "true", "true", "true"]).expect_err("impossible");
    assert!(err.to_string().starts_with("Impossible!"));
    assert_eq!(game.history().len(), 1);
    assert!(game.history()[0].is_bid());
    assert_eq!(game.phase(), Phase::Score);
}

#[test]
fn rummikub_pot() {
    let mut game = start("rummikub", &["Angie", "Derek", "Lina"], false);
    submit(&mut game, &["0", "12", "8"]).expect("round");
    assert_eq!(totals(&game), [20, -12, -8]);
}

#[test]
fn spades_nil_made() {
    let mut game = start("spades", &FOUR, false);
    submit(&mut game, &["0", "4", "4", "4"]).expect("bids");
    submit(&mut game, &["0", "4", "4", "5"]).expect("tricks");
    assert_eq!(game.players()[0].total, 100);
    assert_eq!(game.players()[0].bags, 0);
    assert_eq!(game.players()[3].bags, 1);
}

#[test]
fn mexican_train_ends_after_thirteenth_round() {
    let mut game = start("mexicantrain", &["Angie", "Derek", "Lina"], false);
    let mut bus = EventBus::default();
    for round in 1..=13u32 {
        assert!(!game.is_game_over(), "over before round {round}");
        game.set_starter(round as usize % 3).expect("starter");
        game.submit_round(&raw(&["0", "14", "22"]), &[], &mut bus).expect("round");
    }
    assert!(game.is_game_over());
    let events: Vec<_> = bus.drain().collect();
    assert_eq!(
        events.last(),
        Some(&Event::GameOver {
            winners: vec!["Angie".to_string()]
        })
    );
}

#[test]
fn triominos_plays_all_ninety_nine_rounds() {
    let mut game = start("triominos", &["Angie", "Derek", "Lina"], false);
    for round in 1..=98u32 {
        submit(&mut game, &["0", "5", "5"]).expect("round");
        assert_eq!(game.round(), round + 1);
    }
    assert!(!game.is_game_over());
    submit(&mut game, &["0", "5", "5"]).expect("round 99");
    assert!(game.is_game_over());
    assert_eq!(totals(&game), [0, 495, 495]);
    assert_eq!(submit(&mut game, &["0", "5", "5"]), Err(ValidationError::GameOver));
}

#[test]
fn spades_team_game_to_target() {
    let mut game = start("spades", &FOUR, true);
    assert_eq!(game.settings().target_score, 500);
    for hand in 1..=8 {
        assert!(!game.is_game_over(), "over before hand {hand}");
        submit(&mut game, &["4", "3", "3", "3"]).expect("bids");
        submit(&mut game, &["4", "3", "3", "3"]).expect("tricks");
    }
    assert_eq!(totals(&game), [560, 560, 480, 480]);
    assert!(game.is_game_over());
    assert_eq!(game.winners(), ["Team 1 (Angie & Derek)"]);
}

#[test]
fn saved_game_resumes_from_json() {
    let mut game = start("shanghai", &FOUR, true);
    submit(&mut game, &["0", "0", "35", "40"]).expect("round");
    let body = serde_json::to_string(&game.export()).expect("serialize");
    let record = serde_json::from_str(&body).expect("deserialize");
    let mut resumed = Engine::import_from_catalog(&record, &catalog()).expect("import");
    assert_eq!(resumed.export(), game.export());
    submit(&mut resumed, &["15", "10", "0", "0"]).expect("next round");
    assert_eq!(totals(&resumed), [15, 10, 35, 40]);
    assert_eq!(resumed.round(), 3);
}
