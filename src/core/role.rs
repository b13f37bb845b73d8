//! Role identification and per-role data storage.
//!
//! ## Role
//!
//! Exactly two roles exist per episode: the Guesser asks yes/no
//! questions (or makes the single final guess) and the Answerer
//! answers truthfully about the hidden target.
//!
//! ## RoleMap
//!
//! Per-role data storage backed by a fixed two-slot array.
//! Supports iteration and indexing by `Role`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed participant roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Asks questions and issues the terminal guess.
    Guesser,
    /// Responds yes/no about the hidden target.
    Answerer,
}

impl Role {
    /// The role that takes the turn after this one.
    #[must_use]
    pub const fn other(self) -> Role {
        match self {
            Role::Guesser => Role::Answerer,
            Role::Answerer => Role::Guesser,
        }
    }

    /// Zero-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Role::Guesser => 0,
            Role::Answerer => 1,
        }
    }

    /// Wire name used in trace events (`"Player 1"` / `"Player 2"`).
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Role::Guesser => "Player 1",
            Role::Answerer => "Player 2",
        }
    }

    /// Iterate over both roles in turn order.
    pub fn all() -> impl Iterator<Item = Role> {
        [Role::Guesser, Role::Answerer].into_iter()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Per-role data storage with O(1) access.
///
/// Backed by a `[T; 2]` with one entry per role.
///
/// ## Example
///
/// ```
/// use guess_what::core::{Role, RoleMap};
///
/// let mut reprompts: RoleMap<u32> = RoleMap::default();
/// reprompts[Role::Guesser] += 1;
/// assert_eq!(reprompts[Role::Guesser], 1);
/// assert_eq!(reprompts[Role::Answerer], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMap<T> {
    data: [T; 2],
}

impl<T> RoleMap<T> {
    /// Create a new RoleMap with values from a factory function.
    pub fn new(factory: impl Fn(Role) -> T) -> Self {
        Self {
            data: [factory(Role::Guesser), factory(Role::Answerer)],
        }
    }

    /// Create a new RoleMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a role's data.
    #[must_use]
    pub fn get(&self, role: Role) -> &T {
        &self.data[role.index()]
    }

    /// Get a mutable reference to a role's data.
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        &mut self.data[role.index()]
    }

    /// Iterate over (Role, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::all().zip(self.data.iter())
    }
}

impl<T> Index<Role> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: Role) -> &Self::Output {
        self.get(role)
    }
}

impl<T> IndexMut<Role> for RoleMap<T> {
    fn index_mut(&mut self, role: Role) -> &mut Self::Output {
        self.get_mut(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_other() {
        assert_eq!(Role::Guesser.other(), Role::Answerer);
        assert_eq!(Role::Answerer.other(), Role::Guesser);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(format!("{}", Role::Guesser), "Player 1");
        assert_eq!(format!("{}", Role::Answerer), "Player 2");
    }

    #[test]
    fn test_role_all() {
        let roles: Vec<_> = Role::all().collect();
        assert_eq!(roles, vec![Role::Guesser, Role::Answerer]);
    }

    #[test]
    fn test_role_map_indexing() {
        let mut map: RoleMap<i32> = RoleMap::with_value(5);

        map[Role::Answerer] = 9;

        assert_eq!(map[Role::Guesser], 5);
        assert_eq!(map[Role::Answerer], 9);
    }

    #[test]
    fn test_role_map_factory() {
        let map: RoleMap<usize> = RoleMap::new(|r| r.index() * 10);

        assert_eq!(map[Role::Guesser], 0);
        assert_eq!(map[Role::Answerer], 10);
    }

    #[test]
    fn test_role_map_iter() {
        let map: RoleMap<i32> = RoleMap::new(|r| r.index() as i32);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(pairs, vec![(Role::Guesser, &0), (Role::Answerer, &1)]);
    }
}
