use crate::Phase;
use thiserror::Error;

/// A rejected submission. The message is what the table shows the scorer;
/// nothing in the engine changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The game is over. Undo to keep scoring.")]
    GameOver,
    #[error("Expected {expected} inputs, got {actual}.")]
    InputCount { expected: usize, actual: usize },
    #[error("Enter at least one score.")]
    Empty,
    #[error("Enter scores.")]
    EmptyContract,
    #[error("Player {}: '{raw}' is not a whole number", .player + 1)]
    NotANumber { player: usize, raw: String },
    #[error("Player {}: value must be between -{limit} and {limit}", .player + 1)]
    OutOfRange { player: usize, limit: i64 },
    #[error("Player {}: total is out of range", .player + 1)]
    TotalOverflow { player: usize },
    #[error("Player {}: value cannot be negative", .player + 1)]
    Negative { player: usize },
    #[error("Player {}: Score must be multiple of 5", .player + 1)]
    NotMultipleOfFive { player: usize },
    #[error("Someone must have 0.")]
    NoWinner,
    #[error("Only one person can have 0.")]
    MultipleWinners,
    #[error("Team Rule: Both partners must have 0 to win.")]
    PartialTeamZero,
    #[error("One team must have 0 (both players).")]
    NoWinningTeam,
    #[error("Only one team can have 0.")]
    MultipleWinningTeams,
    #[error("Who started the round? Tap a domino.")]
    StarterNotChosen,
    #[error("Total must be 26 (or {moon} for Moon). You have {actual}.")]
    HeartsTotal { moon: i64, actual: i64 },
    #[error("Select a Trump suit.")]
    TrumpNotChosen,
    #[error("Screw the Dealer: Total bids ({total}) cannot equal card count ({hand_size}).")]
    ScrewTheDealer { total: i64, hand_size: u32 },
    #[error("Impossible! Total bids didn't match card count, so someone must have missed.")]
    ImpossibleOutcome,
    #[error("Player {}: Blind Nil requires a bid of 0.", .player + 1)]
    BlindNilNeedsZero { player: usize },
    #[error("Please enter tricks.")]
    NoTricks,
    #[error("Total tricks must be {expected} (Counted: {counted})")]
    TrickTotal { expected: i64, counted: i64 },
}

/// History that cannot be replayed or rebuilt, e.g. a legacy save with
/// fields missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("round {label}: completed hand has no recorded bid inputs")]
    MissingBidInputs { label: u32 },
    #[error("round {label}: completed hand has no recorded trump")]
    MissingTrump { label: u32 },
    #[error("round {label}: expected {expected} bids, found {actual}")]
    BidCount { label: u32, expected: usize, actual: usize },
    #[error("round {label}: snapshot has {actual} players, roster has {expected}")]
    SnapshotSize { label: u32, expected: usize, actual: usize },
    #[error("saved game has no players")]
    EmptyRoster,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("at least {min} players are required")]
    TooFewPlayers { min: usize },
    #[error("at most {max} players are allowed")]
    TooManyPlayers { max: usize },
    #[error("{game} has no team mode")]
    TeamsUnsupported { game: String },
    #[error("team play needs an even number of players, got {count}")]
    OddTeamRoster { count: usize },
    #[error("name '{0}' is used twice")]
    DuplicateName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("player index {index} out of range (roster of {len})")]
    PlayerIndex { index: usize, len: usize },
    #[error("{action} is not available in {game}")]
    Unsupported { action: &'static str, game: String },
    #[error("{game} has no helper '{id}'")]
    UnknownHelper { game: String, id: String },
    #[error("{action} is not available during the {phase:?} phase")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
}
