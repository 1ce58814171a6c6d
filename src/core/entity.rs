//! Entity identification for composite table items.
//!
//! Loose cards are identified by the card itself (every card is unique in
//! the deck). Builds and staging stacks are composite objects that change
//! contents over their lifetime, so they carry an `EntityId` allocated from
//! a per-game counter. IDs are never reused within a game.
//!
//! ```
//! use casino_engine::core::EntityId;
//!
//! let id = EntityId(3);
//! assert_eq!(id.next(), EntityId(4));
//! assert_eq!(format!("{}", id), "#3");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a build or staging stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First ID handed out in a new game.
    pub const FIRST: EntityId = EntityId(1);

    /// The ID following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
