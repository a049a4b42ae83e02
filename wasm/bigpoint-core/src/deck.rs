use std::{cmp::Ordering, fmt};

use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{ser::SerializeStruct, Serialize, Serializer};

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

/// Card rank. Aces are low: the Ace is worth 1 and the King 13.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    King,
    Queen,
    Jack,
    Ten,
    Nine,
    Eight,
    Seven,
    Six,
    Five,
    Four,
    Three,
    Two,
    Ace,
}

impl Rank {
    /// Order in which ranks appear inside each suit of a fresh deck.
    pub const ALL: [Rank; 13] = [
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
        Rank::Ace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::Ten => "10",
            Rank::Nine => "9",
            Rank::Eight => "8",
            Rank::Seven => "7",
            Rank::Six => "6",
            Rank::Five => "5",
            Rank::Four => "4",
            Rank::Three => "3",
            Rank::Two => "2",
            Rank::Ace => "A",
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Rank::King => 13,
            Rank::Queen => 12,
            Rank::Jack => 11,
            Rank::Ten => 10,
            Rank::Nine => 9,
            Rank::Eight => 8,
            Rank::Seven => 7,
            Rank::Six => 6,
            Rank::Five => 5,
            Rank::Four => 4,
            Rank::Three => 3,
            Rank::Two => 2,
            Rank::Ace => 1,
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.label() == label)
    }
}

/// A playing card. Only the rank takes part in round comparisons; the suit
/// is display-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn compare_value(&self, other: &Card) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.label(), self.suit.symbol())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut card = serializer.serialize_struct("Card", 3)?;
        card.serialize_field("suit", self.suit.symbol())?;
        card.serialize_field("rank", self.rank.label())?;
        card.serialize_field("value", &self.value())?;
        card.end()
    }
}

/// Builds the 52 cards in canonical order: suits ♠ ♥ ♦ ♣, each from King
/// down to Ace.
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Fisher–Yates shuffle of `deck`, returning the permuted cards.
pub fn shuffle_deck<R: Rng + ?Sized>(mut deck: Vec<Card>, rng: &mut R) -> Vec<Card> {
    deck.shuffle(rng);
    deck
}

/// Hands out freshly created and shuffled decks from one random stream.
pub struct Deck {
    rng: SmallRng,
}

impl Deck {
    pub fn new(seed: u64) -> Self {
        Deck {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Deck {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Deck::new(seed),
            None => Deck::from_entropy(),
        }
    }

    pub fn shuffled(&mut self) -> Vec<Card> {
        shuffle_deck(create_deck(), &mut self.rng)
    }
}
