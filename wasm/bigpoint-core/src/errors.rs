use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move: card {index} is not in a hand of {hand_size}")]
    InvalidMove { index: usize, hand_size: usize },
    #[error("Invalid move: the bot has no cards left")]
    EmptyBotHand,
    #[error("Bot chose card {index} from a hand of {hand_size}")]
    BotMoveOutOfRange { index: usize, hand_size: usize },
    #[error("Game is over, reset to play again")]
    GameFinished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Hand size must be between 1 and {max}, got {size}")]
    InvalidHandSize { size: usize, max: usize },
    #[error("Unknown hand check: {0}")]
    UnknownHandCheck(String),
    #[error("Unknown redraw source: {0}")]
    UnknownRedrawSource(String),
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Invalid rules: {0}")]
    Parse(String),
}
