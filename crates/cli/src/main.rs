mod persistence;
mod telemetry;

use anyhow::{anyhow, bail, Context};
use persistence::{clear_state_file, default_state_path, load_state_file, save_state_file};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tablescore_core::{
    available_presets, build_roster, Engine, Event, EventBus, GameCatalog, GameSettings, NameChoice,
    Perspective, RosterRequest, Suit, TableView,
};
use tablescore_data::{builtin_catalog, load_catalog_dir};
use tracing::{info, warn};

const ASSETS_ENV: &str = "TABLESCORE_ASSETS";
const DEFAULT_SEATS: usize = 4;
const BLANK: &str = "-";

#[derive(Debug, Clone, Default)]
struct CliOptions {
    assets: Option<PathBuf>,
    save: Option<PathBuf>,
    seed: Option<u64>,
    resume: bool,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        assets: std::env::var_os(ASSETS_ENV).map(PathBuf::from),
        ..CliOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--resume" => options.resume = true,
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--save" => {
                if let Some(value) = args.get(idx + 1) {
                    options.save = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn load_catalog(options: &CliOptions) -> anyhow::Result<GameCatalog> {
    match &options.assets {
        Some(dir) => load_catalog_dir(dir),
        None => builtin_catalog(),
    }
}

struct Session {
    catalog: GameCatalog,
    engine: Option<Engine>,
    save_path: Option<PathBuf>,
    seed: Option<u64>,
    events: EventBus,
}

/// Arguments of `new`: game key, seat names and setup flags.
#[derive(Debug, Default, PartialEq)]
struct NewGame {
    key: String,
    names: Vec<String>,
    use_teams: bool,
    randomize: bool,
    target: Option<i64>,
}

fn parse_new_game(args: &[&str]) -> anyhow::Result<NewGame> {
    let Some((key, rest)) = args.split_first() else {
        bail!("usage: new <game> [names...] [--teams] [--random] [--target N]");
    };
    let mut game = NewGame {
        key: key.to_string(),
        ..NewGame::default()
    };
    let mut idx = 0usize;
    while idx < rest.len() {
        match rest[idx] {
            "--teams" => game.use_teams = true,
            "--random" => game.randomize = true,
            "--target" => {
                let value = rest.get(idx + 1).ok_or_else(|| anyhow!("--target needs a value"))?;
                game.target = Some(value.parse().with_context(|| format!("bad target '{value}'"))?);
                idx += 1;
            }
            name => game.names.push(name.to_string()),
        }
        idx += 1;
    }
    Ok(game)
}

/// One-based seat number from the command line.
fn parse_seat(arg: Option<&&str>) -> anyhow::Result<usize> {
    let raw = arg.ok_or_else(|| anyhow!("missing seat number"))?;
    let seat: usize = raw.parse().with_context(|| format!("bad seat '{raw}'"))?;
    seat.checked_sub(1).ok_or_else(|| anyhow!("seats start at 1"))
}

fn parse_round_values(args: &[&str]) -> Vec<String> {
    args.iter()
        .map(|value| if *value == BLANK { String::new() } else { value.to_string() })
        .collect()
}

impl Session {
    fn engine(&self) -> anyhow::Result<&Engine> {
        self.engine.as_ref().ok_or_else(|| anyhow!("no game in progress (try `new`)"))
    }

    fn engine_mut(&mut self) -> anyhow::Result<&mut Engine> {
        self.engine.as_mut().ok_or_else(|| anyhow!("no game in progress (try `new`)"))
    }

    fn save_path(&self, args: &[&str]) -> anyhow::Result<PathBuf> {
        if let Some(path) = args.first() {
            return Ok(PathBuf::from(path));
        }
        self.save_path
            .clone()
            .ok_or_else(|| anyhow!("save path unavailable (set TABLESCORE_SAVE)"))
    }

    fn name_choice(&self, name: &str) -> NameChoice {
        match self.catalog.common_names.iter().find(|c| *c == name) {
            Some(preset) => NameChoice::Preset(preset.clone()),
            None => NameChoice::Custom(name.to_string()),
        }
    }

    /// Presets still free for the seat after `picked`.
    fn free_presets(&self, picked: &[&str]) -> Vec<&str> {
        let taken: Vec<NameChoice> = picked.iter().map(|name| self.name_choice(name)).collect();
        available_presets(&self.catalog.common_names, &taken, taken.len())
    }

    fn start(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let request = parse_new_game(args)?;
        let config = self.catalog.config_or_generic(&request.key);
        if self.catalog.get(&request.key).is_none() {
            warn!(game = %request.key, "unknown game, using generic scoring");
        }
        let player_count = if request.names.is_empty() {
            config.min_players.unwrap_or(DEFAULT_SEATS).max(DEFAULT_SEATS)
        } else {
            request.names.len()
        };
        let roster = RosterRequest {
            player_count,
            use_teams: request.use_teams,
            names: request.names.iter().map(|name| self.name_choice(name)).collect(),
        };
        let players = build_roster(&config, &roster)?;
        let settings =
            GameSettings::resolve(&config, request.use_teams, request.randomize, request.target);
        let seed = self.seed.unwrap_or_else(|| tablescore_core::RngState::from_entropy().seed());
        self.engine = Some(Engine::new(config, players, settings, seed)?);
        self.autosave();
        Ok(())
    }

    fn submit(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let engine = self.engine.as_mut().ok_or_else(|| anyhow!("no game in progress"))?;
        if args.is_empty() {
            engine.submit_staged(&mut self.events)?;
        } else {
            let raw = parse_round_values(args);
            let modifiers = engine.modifiers().to_vec();
            engine.submit_round(&raw, &modifiers, &mut self.events)?;
        }
        self.autosave();
        Ok(())
    }

    fn undo(&mut self) -> anyhow::Result<()> {
        let engine = self.engine.as_mut().ok_or_else(|| anyhow!("no game in progress"))?;
        if engine.undo(&mut self.events)?.is_none() {
            println!("nothing to undo");
        }
        self.autosave();
        Ok(())
    }

    fn autosave(&self) {
        let (Some(engine), Some(path)) = (&self.engine, &self.save_path) else {
            return;
        };
        if let Err(err) = save_state_file(&engine.export(), path) {
            warn!(path = %path.display(), error = %err, "autosave failed");
        }
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<bool> {
        let Some(record) = load_state_file(path)? else {
            return Ok(false);
        };
        let engine = Engine::import_from_catalog(&record, &self.catalog)
            .with_context(|| format!("restore {}", path.display()))?;
        info!(game = %record.game_key, path = %path.display(), "game restored");
        self.engine = Some(engine);
        Ok(true)
    }

    fn print_events(&mut self) {
        for event in self.events.drain() {
            match event {
                Event::BidsLocked { label, bids } => println!("bids locked ({label}): {bids:?}"),
                Event::RoundScored { label, scores, .. } => println!("round {label}: {scores:?}"),
                Event::RoundUndone { label, kind } => println!("undid {kind:?} record {label}"),
                Event::GameOver { winners } => println!("game over. Winner: {}", winners.join(", ")),
            }
        }
    }

    fn execute(&mut self, cmd: &str, args: &[&str]) -> anyhow::Result<bool> {
        match cmd {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => return Ok(false),
            "games" => {
                for game in &self.catalog.games {
                    println!("{:<14} {}", game.key, game.name);
                }
            }
            "names" => println!("{}", self.free_presets(args).join(" ")),
            "new" => {
                self.start(args)?;
                print_table(&self.engine()?.view(Perspective::Solo));
            }
            "show" | "s" => print_table(&self.engine()?.view(Perspective::Solo)),
            "history" => print_history(self.engine()?),
            "submit" | "sub" => {
                self.submit(args)?;
                self.print_events();
                print_table(&self.engine()?.view(Perspective::Solo));
            }
            "undo" | "u" => {
                self.undo()?;
                self.print_events();
                print_table(&self.engine()?.view(Perspective::Solo));
            }
            "set" => {
                let seat = parse_seat(args.first())?;
                let value = parse_round_values(&args[1.min(args.len())..]).concat();
                self.engine_mut()?.set_temp_input(seat, value)?;
            }
            "trump" => {
                let code = args.first().ok_or_else(|| anyhow!("usage: trump <S|H|C|D>"))?;
                let suit = Suit::from_code(code).ok_or_else(|| anyhow!("unknown suit '{code}'"))?;
                self.engine_mut()?.set_trump(suit)?;
            }
            "starter" => {
                let seat = parse_seat(args.first())?;
                self.engine_mut()?.set_starter(seat)?;
            }
            "blindnil" | "bn" => {
                let seat = parse_seat(args.first())?;
                self.engine_mut()?.toggle_blind_nil(seat)?;
            }
            "star" => {
                let seat = parse_seat(args.first())?;
                self.engine_mut()?.toggle_star(seat)?;
            }
            "mod" => {
                let seat = parse_seat(args.first())?;
                let id = args.get(1).ok_or_else(|| anyhow!("usage: mod <seat> <helper>"))?;
                self.engine_mut()?.toggle_modifier(seat, id)?;
            }
            "made" => {
                let seat = parse_seat(args.first())?;
                self.engine_mut()?.toggle_made(seat)?;
            }
            "moon" => {
                let seat = parse_seat(args.first())?;
                self.engine_mut()?.apply_moon(seat)?;
            }
            "save" => {
                let path = self.save_path(args)?;
                save_state_file(&self.engine()?.export(), &path)?;
                println!("saved to {}", path.display());
            }
            "load" => {
                let path = self.save_path(args)?;
                if self.load(&path)? {
                    print_table(&self.engine()?.view(Perspective::Solo));
                } else {
                    println!("no saved game at {}", path.display());
                }
            }
            "clear" => {
                let path = self.save_path(args)?;
                clear_state_file(&path)?;
                println!("cleared {}", path.display());
            }
            other => bail!("unknown command '{other}' (try `help`)"),
        }
        Ok(true)
    }
}

fn print_help() {
    println!("commands:");
    println!("  games                          list known games");
    println!("  names [picked..]               preset names still free");
    println!("  new <game> [names..] [--teams] [--random] [--target N]");
    println!("  submit [v1 v2 ..]              submit a round ('-' = blank; no values = staged)");
    println!("  set <seat> <value>             stage one player's input");
    println!("  undo                           revert the last record");
    println!("  trump <S|H|C|D>                Old Hell trump");
    println!("  starter <seat>                 Mexican Train starter");
    println!("  blindnil <seat>                Spades blind nil");
    println!("  made <seat>                    Old Hell made/missed");
    println!("  moon <seat>                    Hearts moon shot");
    println!("  mod <seat> <helper>            toggle a helper bonus");
    println!("  star <seat>                    toggle a star");
    println!("  show | history                 table and score sheet");
    println!("  save|load|clear [path]         persistence");
    println!("  quit");
}

fn print_table(view: &TableView) {
    println!();
    println!("== {} ==", view.title);
    for line in view.hero.lines() {
        println!("   {line}");
    }
    if let Some(trump) = view.trump {
        println!("   trump: {trump}");
    }
    for player in &view.players {
        let mut line = format!("{:>2}. {:<12} {:>6}", player.index + 1, player.name, player.total);
        if let Some(badge) = player.badge {
            line.push_str(&format!("  [{}]", badge.label()));
        }
        if let Some(detail) = &player.detail {
            line.push_str(&format!("  {detail}"));
        }
        if player.starred {
            line.push_str("  *");
        }
        if !player.modifiers.is_empty() {
            line.push_str(&format!("  +{}", player.modifiers.join("+")));
        }
        if !player.pending.is_empty() {
            line.push_str(&format!("  <{}>", player.pending));
        }
        println!("{line}");
    }
    for team in &view.teams {
        if let Some(goal) = &team.goal {
            println!("   {} goal: {:?}", team.label, goal);
        }
    }
    match (&view.winner_text, view.action_label) {
        (Some(text), _) => println!("{text}"),
        (None, Some(action)) => println!("next: {action}"),
        (None, None) => {}
    }
}

fn print_history(engine: &Engine) {
    let names: Vec<&str> = engine.players().iter().map(|p| p.name.as_str()).collect();
    println!("{:>6} | {}", "#", names.join(" | "));
    let nil_names = engine.config().has_blind_nil;
    for record in engine.history() {
        let marker = if record.is_bid() { "bid" } else { "" };
        println!(
            "{:>6} | {} {}",
            record.label,
            record.cells(nil_names).join(" | "),
            marker
        );
    }
}

fn run_repl(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match session.execute(cmd, &args) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("error: {err:#}"),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let catalog = load_catalog(&options).context("load game catalog")?;
    let mut session = Session {
        catalog,
        engine: None,
        save_path: options.save.clone().or_else(default_state_path),
        seed: options.seed,
        events: EventBus::default(),
    };
    if options.resume {
        if let Some(path) = session.save_path.clone() {
            if session.load(&path)? {
                print_table(&session.engine()?.view(Perspective::Solo));
            }
        }
    }
    print_help();
    run_repl(&mut session)
}
