//! The Casino vocabulary: cards, builds and staging stacks.
//!
//! These are immutable value types. Builds and stacks are updated by
//! producing modified copies; `im::Vector` keeps those copies cheap.

pub mod card;
pub mod build;
pub mod staging;

pub use card::{standard_deck, total_value, Card, ParseCardError, Rank, Suit, DECK_SIZE};
pub use build::Build;
pub use staging::{Origin, StagedCard, TemporaryStack};
