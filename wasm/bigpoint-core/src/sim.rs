use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    deck::Deck,
    errors::{ConfigError, GameError},
    game::{Redraw, RoundOutcome, WarGame, Winner},
    rules::{to_game_rules, RulesInput},
    strategy,
};

fn default_player_strategy() -> String {
    "top".to_string()
}

fn default_progress_interval() -> u32 {
    10_000
}

fn default_max_rounds() -> u32 {
    10_000
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Game {game} did not finish within {limit} rounds")]
    RoundLimit { game: u32, limit: u32 },
}

#[derive(Debug, Deserialize)]
pub struct SimulationInput {
    pub iterations: u32,
    pub seed: u64,
    #[serde(default = "default_player_strategy")]
    pub player_strategy: String,
    #[serde(default)]
    pub rules: Option<RulesInput>,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_games: u32,
    pub player_wins: u32,
    pub bot_wins: u32,
    pub drawn_games: u32,
    pub total_rounds: u64,
    pub ties: u64,
    pub redraws: u64,
    pub exhausted_games: u32,
    pub player_win_rate: f64,
    pub average_rounds: f64,
}

pub fn run(input: SimulationInput) -> Result<SimulationResult, SimError> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(input: SimulationInput, mut progress_cb: F) -> Result<SimulationResult, SimError>
where
    F: FnMut(u32, u32),
{
    let player = strategy::from_name(&input.player_strategy)?;
    let rules = to_game_rules(&input.rules.unwrap_or_default())?;
    let mut game = WarGame::new(rules, Deck::new(input.seed));
    let progress_interval = input.progress_interval.max(1);
    let mut result = SimulationResult::default();

    tracing::info!(
        iterations = input.iterations,
        seed = input.seed,
        player_strategy = player.name(),
        "starting simulation"
    );

    for game_index in 0..input.iterations {
        if game_index > 0 {
            game.reset();
        }

        let mut rounds = 0;
        while !game.is_over() {
            if rounds >= input.max_rounds {
                return Err(SimError::RoundLimit {
                    game: game_index,
                    limit: input.max_rounds,
                });
            }
            let index = player.choose_card(game.player_hand());
            let report = game.play_round(index)?;
            rounds += 1;
            if report.outcome == RoundOutcome::Tie {
                result.ties += 1;
                match report.redraw {
                    Some(Redraw::Drawn { .. }) => result.redraws += 1,
                    Some(Redraw::Exhausted) => result.exhausted_games += 1,
                    None => {}
                }
            }
        }

        result.total_games += 1;
        result.total_rounds += u64::from(rounds);
        let state = game.state();
        if state.player_score == state.bot_score {
            result.drawn_games += 1;
        }
        match game.winner() {
            Winner::Player => result.player_wins += 1,
            Winner::Bot => result.bot_wins += 1,
            Winner::Draw => {}
        }

        let completed = game_index + 1;
        if completed % progress_interval == 0 || completed == input.iterations {
            progress_cb(completed, input.iterations);
        }
    }

    if result.total_games > 0 {
        let games = f64::from(result.total_games);
        result.player_win_rate = (f64::from(result.player_wins) / games) * 100.0;
        result.average_rounds = result.total_rounds as f64 / games;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> SimulationInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn every_game_reaches_a_verdict() {
        let result = run(input(r#"{"iterations": 200, "seed": 7}"#)).unwrap();
        assert_eq!(result.total_games, 200);
        assert_eq!(result.player_wins + result.bot_wins, 200);
        assert!(result.total_rounds >= 200 * 7);
        assert_eq!(result.exhausted_games, 0);
        assert!(result.average_rounds >= 7.0);
    }

    #[test]
    fn declared_draws_leave_both_tallies() {
        let result = run(input(
            r#"{"iterations": 300, "seed": 3, "rules": {"declare_drawn_games": true}}"#,
        ))
        .unwrap();
        assert_eq!(
            result.player_wins + result.bot_wins + result.drawn_games,
            300
        );
    }

    #[test]
    fn same_seed_same_tallies() {
        let json = r#"{"iterations": 50, "seed": 21, "player_strategy": "highest"}"#;
        let first = run(input(json)).unwrap();
        let second = run(input(json)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_games, 50);
    }

    #[test]
    fn progress_reports_interval_and_final_game() {
        let mut calls = Vec::new();
        run_with_progress(
            input(r#"{"iterations": 25, "seed": 1, "progress_interval": 10}"#),
            |current, total| calls.push((current, total)),
        )
        .unwrap();
        assert_eq!(calls, vec![(10, 25), (20, 25), (25, 25)]);
    }

    #[test]
    fn bad_strategy_is_a_config_error() {
        let err = run(input(r#"{"iterations": 1, "seed": 1, "player_strategy": "psychic"}"#))
            .unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::UnknownStrategy(_))));
    }

    #[test]
    fn round_limit_stops_runaway_games() {
        let err = run(input(r#"{"iterations": 1, "seed": 1, "max_rounds": 3}"#)).unwrap_err();
        assert!(matches!(err, SimError::RoundLimit { game: 0, limit: 3 }));
    }
}
