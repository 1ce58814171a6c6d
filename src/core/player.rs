//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Casino is strictly a two-player game: seats are `PlayerId(0)` and
//! `PlayerId(1)`, and every player has exactly one opponent.
//!
//! ## PlayerMap
//!
//! Per-player data storage indexed by `PlayerId`. Backed by a fixed-size
//! array so cloning a `PlayerMap` of persistent collections stays cheap.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a Casino table.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier (seat index 0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who moves first.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player at the table.
    ///
    /// ```
    /// use casino_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
    /// assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both seats in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use casino_engine::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<u32> = PlayerMap::new(|_| 0);
/// points[PlayerId::SECOND] = 3;
///
/// assert_eq!(points[PlayerId::FIRST], 0);
/// assert_eq!(points[PlayerId::SECOND], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Apply `f` to each entry, producing a new map.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|p| f(p, self.get(p)))
    }

    /// Copy the entries out as a plain array, in seat order.
    #[must_use]
    pub fn to_array(&self) -> [T; PLAYER_COUNT]
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> From<[T; PLAYER_COUNT]> for PlayerMap<T> {
    fn from(data: [T; PLAYER_COUNT]) -> Self {
        Self { data }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(format!("{}", PlayerId::SECOND), "Player 1");
    }

    #[test]
    fn test_opponent_is_involution() {
        for p in PlayerId::all() {
            assert_ne!(p.opponent(), p);
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn test_player_map_new_and_index() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);
        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);

        map[PlayerId::FIRST] = 7;
        assert_eq!(map.to_array(), [7, 10]);
    }

    #[test]
    fn test_player_map_iter_and_map() {
        let map: PlayerMap<u32> = PlayerMap::from([4, 4]);
        let doubled = map.map(|_, v| v * 2);

        let pairs: Vec<_> = doubled.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &8), (PlayerId::SECOND, &8)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
