use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    deck::{Card, Deck},
    errors::GameError,
    rules::{GameRules, HandCheck, RedrawSource},
    strategy::{Strategy, TopCard},
};

pub const NO_CARDS_LEFT: &str = "No cards left to draw. Game ends in a tie.";
pub const BOTH_DRAW: &str = "Both players draw new cards due to a tie.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Dealing,
    Active,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    PlayerWins,
    BotWins,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Redraw {
    Drawn { player: Card, bot: Card },
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Bot,
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub player_card: Card,
    pub bot_card: Card,
    pub outcome: RoundOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redraw: Option<Redraw>,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_hand: Vec<Card>,
    pub bot_hand: Vec<Card>,
    pub center_cards: Vec<Card>,
    pub player_score: u32,
    pub bot_score: u32,
    pub ties: u32,
    pub rounds_played: u32,
    pub log: Vec<String>,
    pub game_over: bool,
    pub phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            player_hand: Vec::new(),
            bot_hand: Vec::new(),
            center_cards: Vec::new(),
            player_score: 0,
            bot_score: 0,
            ties: 0,
            rounds_played: 0,
            log: Vec::new(),
            game_over: false,
            phase: Phase::Dealing,
        }
    }
}

impl GameState {
    pub fn dealt(player_hand: Vec<Card>, bot_hand: Vec<Card>) -> Self {
        GameState {
            player_hand,
            bot_hand,
            phase: Phase::Active,
            ..GameState::default()
        }
    }
}

/// What the table shows: the bot's cards stay face down.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<'a> {
    pub player_hand: &'a [Card],
    pub bot_hand_size: usize,
    pub center_cards: &'a [Card],
    pub player_score: u32,
    pub bot_score: u32,
    pub log: &'a [String],
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

pub struct WarGame {
    state: GameState,
    stock: Vec<Card>,
    rules: GameRules,
    deck: Deck,
    bot: Box<dyn Strategy>,
}

impl WarGame {
    /// Creates a game and deals the first hands.
    pub fn new(rules: GameRules, deck: Deck) -> Self {
        let mut game = WarGame {
            state: GameState::default(),
            stock: Vec::new(),
            rules,
            deck,
            bot: Box::new(TopCard),
        };
        game.reset();
        game
    }

    /// Starts from hands chosen by the caller instead of a shuffled deal.
    /// `stock` is what the `remainder` redraw source draws from.
    pub fn from_hands(
        player_hand: Vec<Card>,
        bot_hand: Vec<Card>,
        stock: Vec<Card>,
        rules: GameRules,
        deck: Deck,
    ) -> Self {
        WarGame {
            state: GameState::dealt(player_hand, bot_hand),
            stock,
            rules,
            deck,
            bot: Box::new(TopCard),
        }
    }

    pub fn with_bot(mut self, bot: Box<dyn Strategy>) -> Self {
        self.bot = bot;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.state.player_hand
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn reset(&mut self) {
        let hand_size = self.rules.hand_size;
        let mut cards = self.deck.shuffled();
        let stock = cards.split_off(hand_size * 2);
        let bot_hand = cards.split_off(hand_size);
        self.state = GameState::dealt(cards, bot_hand);
        self.stock = stock;
        tracing::info!(hand_size, "new game dealt");
    }

    /// Plays the player's card at `player_card_index` against the bot's pick.
    /// On error nothing is changed.
    pub fn play_round(&mut self, player_card_index: usize) -> Result<RoundReport, GameError> {
        let player_len = self.state.player_hand.len();
        let bot_len = self.state.bot_hand.len();
        let rejected = if self.state.game_over {
            Some(GameError::GameFinished)
        } else if bot_len == 0 {
            Some(GameError::EmptyBotHand)
        } else if player_card_index >= player_len {
            Some(GameError::InvalidMove {
                index: player_card_index,
                hand_size: player_len,
            })
        } else {
            None
        };
        if let Some(err) = rejected {
            tracing::warn!(index = player_card_index, error = %err, "move rejected");
            return Err(err);
        }

        let bot_index = self.bot.choose_card(&self.state.bot_hand);
        if bot_index >= bot_len {
            let err = GameError::BotMoveOutOfRange {
                index: bot_index,
                hand_size: bot_len,
            };
            tracing::warn!(bot = self.bot.name(), error = %err, "move rejected");
            return Err(err);
        }

        let player_card = self.state.player_hand.remove(player_card_index);
        let bot_card = self.state.bot_hand.remove(bot_index);
        self.state.center_cards = vec![player_card, bot_card];
        self.state.rounds_played += 1;

        let final_round = match self.rules.hand_check {
            HandCheck::PreRound => player_len == 1 && bot_len == 1,
            HandCheck::PostRound => {
                self.state.player_hand.is_empty() || self.state.bot_hand.is_empty()
            }
        };

        let outcome = match player_card.compare_value(&bot_card) {
            Ordering::Greater => {
                self.state.player_score += 1;
                self.record(format!(
                    "Player wins: {} > {}",
                    player_card.rank.label(),
                    bot_card.rank.label()
                ));
                RoundOutcome::PlayerWins
            }
            Ordering::Less => {
                self.state.bot_score += 1;
                self.record(format!(
                    "Bot wins: {} > {}",
                    bot_card.rank.label(),
                    player_card.rank.label()
                ));
                RoundOutcome::BotWins
            }
            Ordering::Equal => {
                self.state.ties += 1;
                self.record(format!(
                    "Tie: {} = {}",
                    player_card.rank.label(),
                    bot_card.rank.label()
                ));
                RoundOutcome::Tie
            }
        };

        let mut report = RoundReport {
            player_card,
            bot_card,
            outcome,
            redraw: None,
            game_over: false,
        };

        if outcome == RoundOutcome::Tie {
            // A tie never ends the game by itself; only an empty draw does.
            let redraw = self.redraw_after_tie(final_round);
            report.redraw = Some(redraw);
            report.game_over = self.state.game_over;
            return Ok(report);
        }

        if final_round {
            self.finish();
        }
        report.game_over = self.state.game_over;
        Ok(report)
    }

    /// Current leader. Equal scores go to the bot unless drawn games are
    /// declared.
    pub fn winner(&self) -> Winner {
        let (player, bot) = (self.state.player_score, self.state.bot_score);
        if player > bot {
            Winner::Player
        } else if player == bot && self.rules.declare_drawn_games {
            Winner::Draw
        } else {
            Winner::Bot
        }
    }

    pub fn banner(&self) -> Option<String> {
        if !self.state.game_over {
            return None;
        }
        let verdict = match self.winner() {
            Winner::Player => "Player Wins!",
            Winner::Bot => "Bot Wins!",
            Winner::Draw => "It's a Tie!",
        };
        Some(format!("Game Over! {verdict}"))
    }

    pub fn table_view(&self) -> TableView<'_> {
        TableView {
            player_hand: &self.state.player_hand,
            bot_hand_size: self.state.bot_hand.len(),
            center_cards: &self.state.center_cards,
            player_score: self.state.player_score,
            bot_score: self.state.bot_score,
            log: &self.state.log,
            game_over: self.state.game_over,
            banner: self.banner(),
        }
    }

    fn redraw_after_tie(&mut self, final_round: bool) -> Redraw {
        match self.draw_pair() {
            Some((player, bot)) => {
                self.state.player_hand.push(player);
                self.state.bot_hand.push(bot);
                // The last-card tie refills silently.
                if !final_round {
                    self.record(BOTH_DRAW.to_string());
                }
                tracing::debug!(%player, %bot, final_round, "tie redraw");
                Redraw::Drawn { player, bot }
            }
            None => {
                self.record(NO_CARDS_LEFT.to_string());
                self.finish();
                Redraw::Exhausted
            }
        }
    }

    fn draw_pair(&mut self) -> Option<(Card, Card)> {
        match self.rules.redraw_source {
            RedrawSource::FreshDeck => {
                let fresh = self.deck.shuffled();
                let offset = self.rules.redraw_offset();
                match fresh.get(offset..offset + 2) {
                    Some(&[player, bot]) => Some((player, bot)),
                    _ => None,
                }
            }
            RedrawSource::Remainder => {
                let pair = match self.stock.as_slice() {
                    [player, bot, ..] => (*player, *bot),
                    _ => return None,
                };
                self.stock.drain(..2);
                Some(pair)
            }
        }
    }

    fn record(&mut self, entry: String) {
        tracing::debug!(round = self.state.rounds_played, "{entry}");
        self.state.log.push(entry);
    }

    fn finish(&mut self) {
        self.state.game_over = true;
        self.state.phase = Phase::GameOver;
        tracing::info!(
            player_score = self.state.player_score,
            bot_score = self.state.bot_score,
            ties = self.state.ties,
            "game over"
        );
    }
}
