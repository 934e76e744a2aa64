use thiserror::Error;

use jedna_elements::prelude::*;

/// Failure modes reported by engine operations. No operation mutates state
/// when it returns one of these.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ActionError {
    #[error("Not this player's turn.")]
    NotYourTurn,

    #[error("Card {0} is not in the hand.")]
    CardNotInHand(Card),

    #[error("That action is not legal in the current game state.")]
    IllegalInState,

    #[error("A wild card needs a chosen color.")]
    MissingWildColor,

    #[error("Must draw a card before passing.")]
    MustDrawFirst,

    #[error("The game has not started.")]
    GameNotStarted,

    #[error("The game is already over.")]
    GameAlreadyOver,

    #[error("Cannot play that as a double.")]
    BadDoublePlay,

    #[error("Player {0} already joined.")]
    DuplicatePlayer(PlayerId),

    #[error("At least two players are needed to start.")]
    NotEnoughPlayers,

    #[error("The table is full.")]
    RosterFull,
}
