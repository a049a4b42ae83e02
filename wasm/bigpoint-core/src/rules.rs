use serde::{Deserialize, Serialize};

use crate::{deck::DECK_SIZE, errors::ConfigError};

pub const DEFAULT_HAND_SIZE: usize = 7;
pub const MAX_HAND_SIZE: usize = DECK_SIZE / 2;

/// Which hand lengths decide that a round was the last one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCheck {
    /// Lengths as they were before the round's cards left the hands.
    PreRound,
    /// Lengths after the round, redraws included.
    PostRound,
}

impl HandCheck {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "pre_round" => Ok(HandCheck::PreRound),
            "post_round" => Ok(HandCheck::PostRound),
            other => Err(ConfigError::UnknownHandCheck(other.to_string())),
        }
    }
}

/// Where the replacement cards of a tie come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawSource {
    /// A new shuffled deck with the first `2 * hand_size` cards skipped.
    FreshDeck,
    /// The undealt part of the deck shuffled at reset.
    Remainder,
}

impl RedrawSource {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "fresh_deck" => Ok(RedrawSource::FreshDeck),
            "remainder" => Ok(RedrawSource::Remainder),
            other => Err(ConfigError::UnknownRedrawSource(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RulesInput {
    #[serde(default)]
    pub hand_size: Option<usize>,
    #[serde(default)]
    pub hand_check: Option<String>,
    #[serde(default)]
    pub redraw_source: Option<String>,
    #[serde(default)]
    pub declare_drawn_games: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameRules {
    pub hand_size: usize,
    pub hand_check: HandCheck,
    pub redraw_source: RedrawSource,
    pub declare_drawn_games: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            hand_size: DEFAULT_HAND_SIZE,
            hand_check: HandCheck::PreRound,
            redraw_source: RedrawSource::FreshDeck,
            declare_drawn_games: false,
        }
    }
}

impl GameRules {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let input: RulesInput =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        to_game_rules(&input)
    }

    /// Cards skipped at the top of a fresh deck before redraws are taken.
    pub fn redraw_offset(&self) -> usize {
        self.hand_size * 2
    }
}

pub fn to_game_rules(rules: &RulesInput) -> Result<GameRules, ConfigError> {
    let hand_size = rules.hand_size.unwrap_or(DEFAULT_HAND_SIZE);
    if hand_size == 0 || hand_size > MAX_HAND_SIZE {
        return Err(ConfigError::InvalidHandSize {
            size: hand_size,
            max: MAX_HAND_SIZE,
        });
    }
    let hand_check = match rules.hand_check.as_deref() {
        Some(name) => HandCheck::from_name(name)?,
        None => HandCheck::PreRound,
    };
    let redraw_source = match rules.redraw_source.as_deref() {
        Some(name) => RedrawSource::from_name(name)?,
        None => RedrawSource::FreshDeck,
    };
    Ok(GameRules {
        hand_size,
        hand_check,
        redraw_source,
        declare_drawn_games: rules.declare_drawn_games.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        let rules = to_game_rules(&RulesInput::default()).unwrap();
        assert_eq!(rules, GameRules::default());
        assert_eq!(rules.redraw_offset(), 14);
    }

    #[test]
    fn json_overrides_fields() {
        let rules = GameRules::from_json(
            r#"{"hand_size": 3, "hand_check": "post_round", "redraw_source": "remainder"}"#,
        )
        .unwrap();
        assert_eq!(rules.hand_size, 3);
        assert_eq!(rules.hand_check, HandCheck::PostRound);
        assert_eq!(rules.redraw_source, RedrawSource::Remainder);
        assert!(!rules.declare_drawn_games);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            GameRules::from_json(r#"{"hand_size": 27}"#),
            Err(ConfigError::InvalidHandSize { size: 27, max: 26 })
        );
        assert_eq!(
            GameRules::from_json(r#"{"hand_size": 0}"#),
            Err(ConfigError::InvalidHandSize { size: 0, max: 26 })
        );
        assert_eq!(
            GameRules::from_json(r#"{"redraw_source": "discard"}"#),
            Err(ConfigError::UnknownRedrawSource("discard".to_string()))
        );
        assert!(matches!(
            GameRules::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
