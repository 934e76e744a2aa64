//! Pure legality checks. Nothing in here mutates; every public operation of
//! the engine runs its check before [`super::step`] applies the effect.

use jedna_elements::prelude::*;

use crate::model::*;
use super::errors::ActionError;

pub(crate) fn check_play(
    state: &State,
    card: Card,
    chosen_color: Option<Color>,
    double: bool,
) -> Result<(), ActionError> {
    use ActionError::*;

    let top = state.top_card().ok_or(IllegalInState)?;
    let hand = &state.acting_player().hand;

    match state.phase {
        GamePhase::Off => return Err(IllegalInState),

        GamePhase::Normal => {
            if state.already_picked {
                // Strict picked-card rule: the drawn card is the only one
                // that may still be played this turn.
                let picked = state.picked_card.ok_or(IllegalInState)?;
                if !picked.same_identity(card) {
                    return Err(IllegalInState);
                }
                if double {
                    return Err(BadDoublePlay);
                }
            }
            if !hand.contains(card) {
                return Err(CardNotInHand(card));
            }
            if !top.matches(card) {
                return Err(IllegalInState);
            }
        }

        GamePhase::WarDrawTwo => {
            if !hand.contains(card) {
                return Err(CardNotInHand(card));
            }
            if !answers_draw_two_war(card, top) {
                return Err(IllegalInState);
            }
        }

        GamePhase::WarWildDrawFour => {
            if !hand.contains(card) {
                return Err(CardNotInHand(card));
            }
            if card.figure() != Figure::WildDrawFour {
                return Err(IllegalInState);
            }
        }
    }

    if card.is_wild() {
        match chosen_color {
            Some(color) if !color.is_wild() => {}
            _ => return Err(MissingWildColor),
        }
    }

    if double {
        if card.figure() == Figure::WildDrawFour {
            return Err(BadDoublePlay);
        }
        if hand.count_identical(card) < 2 {
            return Err(BadDoublePlay);
        }
    }

    Ok(())
}

/// Legal answers to a +2 war: any war-playable card, except that a Reverse
/// only counters on a color match.
fn answers_draw_two_war(card: Card, top: Card) -> bool {
    card.is_war_playable()
        && (card.figure() != Figure::Reverse || card.color() == top.color())
}

pub(crate) fn check_draw(state: &State) -> Result<(), ActionError> {
    if state.phase != GamePhase::Normal || state.already_picked {
        return Err(ActionError::IllegalInState);
    }
    Ok(())
}

pub(crate) fn check_pass(state: &State) -> Result<(), ActionError> {
    match state.phase {
        GamePhase::Off => Err(ActionError::IllegalInState),
        GamePhase::WarDrawTwo | GamePhase::WarWildDrawFour => Ok(()),
        GamePhase::Normal => {
            if state.already_picked {
                Ok(())
            } else {
                Err(ActionError::MustDrawFirst)
            }
        }
    }
}

/// Every hand card that is legal to play right now. While `already_picked`,
/// this is at most the picked card.
pub(crate) fn playable_cards(state: &State) -> Vec<Card> {
    let Some(top) = state.top_card() else {
        return Vec::new();
    };
    let hand = &state.acting_player().hand;
    match state.phase {
        GamePhase::Off => Vec::new(),
        GamePhase::Normal if state.already_picked => state
            .picked_card
            .into_iter()
            .filter(|picked| top.matches(*picked))
            .collect(),
        GamePhase::Normal => hand.iter().filter(|c| top.matches(**c)).copied().collect(),
        GamePhase::WarDrawTwo => hand
            .iter()
            .filter(|c| answers_draw_two_war(**c, top))
            .copied()
            .collect(),
        GamePhase::WarWildDrawFour => hand
            .iter()
            .filter(|c| c.figure() == Figure::WildDrawFour)
            .copied()
            .collect(),
    }
}
