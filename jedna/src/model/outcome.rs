//! What a successful engine operation did ([`ActionOutcome`]).

use jedna_elements::prelude::*;

use super::GameEnd;

/// Structured description of a completed engine operation, so the runner can
/// report to agents without peeking at engine internals.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionOutcome {
    /// Card(s) placed on the discard; the turn moved on.
    Played {
        /// The card as placed (chosen color attached for wilds).
        card: Card,
        /// The second copy of a double play, as placed.
        second: Option<Card>,
        /// The player now holds exactly one card.
        uno: bool,
        /// Players passed over by Skip effects this turn, in order.
        skipped: Vec<PlayerId>,
    },
    /// The acting player drew their one card for the turn; `None` means the
    /// table had nothing left to give. The turn continues.
    Drew(Option<Card>),
    /// Turn ended by declining to play the picked card.
    Passed,
    /// Turn ended by swallowing a war penalty of `drawn` cards.
    PassedWar { drawn: usize },
    /// The play emptied the acting player's hand and ended the game.
    Won(GameEnd),
}

impl ActionOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionOutcome::Won(_))
    }
}
