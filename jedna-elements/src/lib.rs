//! Building blocks of the Jedna card game: cards and their public notation,
//! the draw/discard piles, hands, and player identities.
//!
//! Game flow (turns, wars, scoring) lives in the `jedna` crate; everything
//! here is inert data with no knowledge of the rules.

pub mod card;
pub mod deck;
pub mod hand;
pub mod player;

pub mod prelude {
    pub use crate::card::*;
    pub use crate::deck::*;
    pub use crate::hand::*;
    pub use crate::player::*;
}
