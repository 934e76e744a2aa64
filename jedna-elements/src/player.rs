//! [`PlayerId`] newtype and the seated [`Player`] record.

use core::fmt::{Debug, Display, Formatter};

use derive_more::{From, Into};

use crate::hand::Hand;

/// Opaque player identity, stable for the life of a game.
///
/// ## Optional `serde` support
///
/// Serializes transparently as the identity string.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From, Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> PlayerId {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> PlayerId {
        PlayerId(id.to_string())
    }
}

impl Debug for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seated player: identity plus the cards they hold.
///
/// Compared by identity alone; the hand is game state, not identity.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub hand: Hand,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>) -> Player {
        Player { id: id.into(), hand: Hand::new() }
    }

    pub fn with_hand(id: impl Into<PlayerId>, hand: Hand) -> Player {
        Player { id: id.into(), hand }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Player) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}
