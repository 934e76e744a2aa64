//! [`Action`] by the acting player.

use std::fmt::{Display, Formatter};

use jedna_elements::prelude::*;

/// Action by the acting player.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Play one copy (or, with `double`, two identical copies) of a card from
    /// the hand.
    Play {
        card: Card,
        /// Color the wild card will take; required iff the card is wild.
        chosen_color: Option<Color>,
        /// Play both copies of an identical pair in one action.
        double: bool,
    },
    /// Draw the turn's single card. Does not end the turn.
    Draw,
    /// End the turn: in a war, swallow the stacked penalty; otherwise decline
    /// to play the picked card.
    Pass,
}

impl Action {
    pub fn play(card: Card) -> Action {
        Action::Play { card, chosen_color: None, double: false }
    }

    pub fn play_wild(card: Card, color: Color) -> Action {
        Action::Play { card, chosen_color: Some(color), double: false }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play { card, chosen_color: Some(color), double } => {
                write!(f, "Play({}{}{})", card, color.letter(), if *double { ", double" } else { "" })
            }
            Action::Play { card, chosen_color: None, double } => {
                write!(f, "Play({}{})", card, if *double { ", double" } else { "" })
            }
            Action::Draw => write!(f, "Draw"),
            Action::Pass => write!(f, "Pass"),
        }
    }
}
