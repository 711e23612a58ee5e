// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Handscope Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use handscope_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td = "Td".parse::<Card>().unwrap();
//! assert_eq!(ah.to_string(), "Ah");
//! assert_eq!(td.rank(), Rank::Ten);
//! ```
//!
//! a [Deck] type for shuffling, sampling, and removing known cards from the
//! deck, and a lazy [combinations] iterator over the k-subsets of a hand.
//!
//! For example to sample 10 random 5-cards hands from the cards left after
//! removing the hero hole cards:
//!
//! ```
//! # use handscope_cards::{Card, Deck};
//! let hole = Card::parse_many(&["As", "Ks"]).unwrap();
//! let deck = Deck::without(&hole);
//!
//! let mut counter = 0;
//! deck.sample(&mut rand::rng(), 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
//!
//! and to iterate all 5-cards subsets of a 7-cards hand:
//!
//! ```
//! # use handscope_cards::{Deck, combinations};
//! let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
//! assert_eq!(combinations(&cards, 5).count(), 21);
//! ```
//!
//! The **`parallel`** feature enables parallel sampling with a given number of
//! tasks, the closure `task_id` can be used to store per task data to reduce
//! contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_sample() {
//! # use std::sync::atomic;
//! # use handscope_cards::Deck;
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_sample(4, 40, 7, None, |task_id, hand| {
//!     assert_eq!(hand.len(), 7);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 40);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod combinations;
pub use combinations::{Combinations, MAX_K, Subset, combinations, nck};

mod deck;
pub use deck::{Card, CardError, Deck, Rank, Suit, ensure_distinct};
