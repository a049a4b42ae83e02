use std::collections::HashSet;

use bigpoint_core::deck::{create_deck, shuffle_deck, Card, Deck, Rank, Suit, DECK_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn sorted(mut cards: Vec<Card>) -> Vec<(usize, usize)> {
    let mut keys: Vec<(usize, usize)> = cards
        .drain(..)
        .map(|card| {
            let suit = Suit::ALL.iter().position(|&s| s == card.suit).unwrap();
            let rank = Rank::ALL.iter().position(|&r| r == card.rank).unwrap();
            (suit, rank)
        })
        .collect();
    keys.sort();
    keys
}

#[test]
fn deck_is_every_suit_and_rank_once() {
    let deck = create_deck();
    assert_eq!(deck.len(), DECK_SIZE);

    let unique: HashSet<Card> = deck.iter().copied().collect();
    assert_eq!(unique.len(), 52, "deck must not contain duplicates");

    for suit in Suit::ALL {
        for rank in Rank::ALL {
            assert!(unique.contains(&Card::new(suit, rank)), "missing {rank:?} of {suit:?}");
        }
    }
}

#[test]
fn create_deck_is_deterministic() {
    assert_eq!(create_deck(), create_deck());
}

#[test]
fn shuffle_usually_moves_cards() {
    let canonical = create_deck();
    let mut deck = Deck::new(2024);
    let unchanged = (0..20).filter(|_| deck.shuffled() == canonical).count();
    assert_eq!(unchanged, 0, "shuffles should not keep the canonical order");
}

#[test]
fn different_seeds_give_different_orders() {
    let a = Deck::new(1).shuffled();
    let b = Deck::new(2).shuffled();
    assert_ne!(a, b);
}

#[test]
fn entropy_deck_is_still_a_full_deck() {
    let cards = Deck::from_entropy().shuffled();
    assert_eq!(sorted(cards), sorted(create_deck()));
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let shuffled = shuffle_deck(create_deck(), &mut rng);
        prop_assert_eq!(shuffled.len(), DECK_SIZE);
        prop_assert_eq!(sorted(shuffled), sorted(create_deck()));
    }

    #[test]
    fn seeded_shuffles_replay(seed in any::<u64>()) {
        prop_assert_eq!(Deck::new(seed).shuffled(), Deck::new(seed).shuffled());
    }
}
