use crate::{deck::Card, errors::ConfigError};

/// Picks which card of a hand to play next.
pub trait Strategy {
    /// Index into `hand` of the card to play. Callers never pass an empty hand.
    fn choose_card(&self, hand: &[Card]) -> usize;

    fn name(&self) -> &'static str;
}

/// Always plays the first card. This is the bot.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopCard;

impl Strategy for TopCard {
    fn choose_card(&self, _hand: &[Card]) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "top"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HighestCard;

impl Strategy for HighestCard {
    fn choose_card(&self, hand: &[Card]) -> usize {
        // max_by_key keeps the last maximum; prefer the earliest one
        hand.iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, card)| card.value())
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "highest"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LowestCard;

impl Strategy for LowestCard {
    fn choose_card(&self, hand: &[Card]) -> usize {
        hand.iter()
            .enumerate()
            .min_by_key(|(_, card)| card.value())
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "lowest"
    }
}

pub fn from_name(name: &str) -> Result<Box<dyn Strategy>, ConfigError> {
    match name {
        "top" => Ok(Box::new(TopCard)),
        "highest" => Ok(Box::new(HighestCard)),
        "lowest" => Ok(Box::new(LowestCard)),
        other => Err(ConfigError::UnknownStrategy(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Rank, Suit};

    fn hand(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(Suit::Clubs, rank)).collect()
    }

    #[test]
    fn top_card_ignores_values() {
        let cards = hand(&[Rank::Two, Rank::King]);
        assert_eq!(TopCard.choose_card(&cards), 0);
    }

    #[test]
    fn highest_and_lowest_pick_first_extreme() {
        let cards = hand(&[Rank::Five, Rank::King, Rank::Ace, Rank::King, Rank::Ace]);
        assert_eq!(HighestCard.choose_card(&cards), 1);
        assert_eq!(LowestCard.choose_card(&cards), 2);
    }

    #[test]
    fn names_round_trip() {
        for name in ["top", "highest", "lowest"] {
            assert_eq!(from_name(name).unwrap().name(), name);
        }
        assert!(matches!(
            from_name("cheat"),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }
}
