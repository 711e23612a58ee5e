// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand categories and values.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use handscope_cards::{Card, Rank, combinations, ensure_distinct};

use crate::EvalError;

/// Rank bits of A-2-3-4-5.
const WHEEL_MASK: u16 = 0b1_0000_0000_1111;

/// The bit offset of the category in a packed hand value.
const CATEGORY_SHIFT: u32 = 20;

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// Returns all the categories from the weakest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }

    fn from_bits(bits: u32) -> HandRank {
        HandRank::ranks()
            .nth(bits as usize)
            .unwrap_or(HandRank::StraightFlush)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        f.write_str(name)
    }
}

/// The value of a poker hand.
///
/// The value packs the category and up to five tie-break ranks in a single
/// integer so that comparing two values compares the hands:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|xxxxcccc|11112222|33334444|.. 5555
///   +--------+--------+--------+--------+
///   c = hand category (high card=0,...,straight flush=8)
///   1-5 = tie-break ranks (deuce=1,...,ace=13, ace in a wheel=0)
/// ```
///
/// Tie-break ranks are the grouped ranks ordered by count and then by rank,
/// for example the trips rank and then the two kickers for three of a kind,
/// or all five ranks from the highest for high card, flush and straights.
/// The ace of a wheel straight (A-2-3-4-5) counts below the deuce so that the
/// wheel is the lowest straight.
#[derive(Debug, Clone, Copy)]
pub struct HandValue {
    value: u32,
    kickers: u8,
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// The cards are not validated, use [evaluate] for untrusted input.
    ///
    /// Panics if the number of cards is not 5, 6, or 7.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "Invalid number of cards {}",
            cards.len()
        );

        if let Ok(hand) = <[Card; 5]>::try_from(cards) {
            return Self::eval5(hand);
        }

        combinations(cards, 5)
            .map(|subset| {
                let mut hand = [Card::default(); 5];
                hand.copy_from_slice(&subset);
                Self::eval5(hand)
            })
            .max()
            .unwrap_or_else(|| Self::eval5([cards[0], cards[1], cards[2], cards[3], cards[4]]))
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::from_bits(self.value >> CATEGORY_SHIFT)
    }

    /// The packed numeric value, a greater value is a stronger hand.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The five cards that make this hand.
    pub fn hand(&self) -> &[Card; 5] {
        &self.hand
    }

    /// The tie-break ranks in comparison order.
    pub fn kickers(&self) -> Vec<Rank> {
        (0..self.kickers as u32)
            .map(|i| {
                let bits = (self.value >> (16 - 4 * i)) & 0xF;
                // The wheel ace is packed as 0.
                match bits {
                    0 => Rank::Ace,
                    n => Rank::from_bits(n as u8 - 1),
                }
            })
            .collect()
    }

    /// The hand name, an ace high straight flush is a Royal Flush.
    pub fn name(&self) -> String {
        match self.rank() {
            HandRank::StraightFlush if self.kickers().first() == Some(&Rank::Ace) => {
                "Royal Flush".to_string()
            }
            rank => rank.to_string(),
        }
    }

    fn eval5(hand: [Card; 5]) -> HandValue {
        let mut counts = [0u8; Rank::COUNT];
        let mut mask = 0u16;
        for card in &hand {
            counts[card.rank_bits() as usize] += 1;
            mask |= 1u16 << card.rank_bits();
        }

        let suit = hand[0].suit_bits();
        let is_flush = hand.iter().all(|c| c.suit_bits() == suit);

        // The straight top rank, Five for a wheel.
        let straight = if mask.count_ones() == 5 {
            let hi = 15 - mask.leading_zeros() as u8;
            let lo = mask.trailing_zeros() as u8;
            if hi - lo == 4 {
                Some(hi)
            } else if mask == WHEEL_MASK {
                Some(Rank::Five as u8)
            } else {
                None
            }
        } else {
            None
        };

        // Ranks grouped by count and then rank, both descending.
        let mut groups = [(0u8, 0u8); 5];
        let mut num_groups = 0;
        for rank in (0..Rank::COUNT).rev() {
            if counts[rank] > 0 {
                groups[num_groups] = (counts[rank], rank as u8);
                num_groups += 1;
            }
        }
        groups[..num_groups].sort_by(|g1, g2| g2.cmp(g1));

        let mut grouped = [0u8; 5];
        for (dst, &(_, rank)) in grouped.iter_mut().zip(&groups[..num_groups]) {
            *dst = rank + 1;
        }

        let (category, tie_break) = match (straight, is_flush, groups[0].0) {
            (Some(top), true, _) => (HandRank::StraightFlush, Self::straight_ranks(top)),
            (_, _, 4) => (HandRank::FourOfAKind, grouped),
            (_, _, 3) if groups[1].0 == 2 => (HandRank::FullHouse, grouped),
            (_, true, _) => (HandRank::Flush, grouped),
            (Some(top), _, _) => (HandRank::Straight, Self::straight_ranks(top)),
            (_, _, 3) => (HandRank::ThreeOfAKind, grouped),
            (_, _, 2) if groups[1].0 == 2 => (HandRank::TwoPair, grouped),
            (_, _, 2) => (HandRank::OnePair, grouped),
            _ => (HandRank::HighCard, grouped),
        };

        let value = tie_break
            .iter()
            .enumerate()
            .fold((category as u32) << CATEGORY_SHIFT, |value, (i, &r)| {
                value | ((r as u32) << (16 - 4 * i as u32))
            });

        HandValue {
            value,
            kickers: num_groups as u8,
            hand,
        }
    }

    /// Packed ranks of a straight from its top rank down.
    fn straight_ranks(top: u8) -> [u8; 5] {
        // Ranks are packed as rank + 1, the wheel ends with 0 for the ace.
        [top + 1, top, top - 1, top - 2, top - 3]
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.name())?;
        for (idx, card) in self.hand.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str(")")
    }
}

/// Evaluates 5 to 7 distinct cards.
///
/// Returns the value of the best five cards hand or an error if the number
/// of cards is out of range or a card is repeated.
pub fn evaluate(cards: &[Card]) -> Result<HandValue, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::InvalidCardCount {
            count: cards.len(),
            expected: "5 to 7",
        });
    }

    ensure_distinct(cards)?;

    Ok(HandValue::eval(cards))
}
