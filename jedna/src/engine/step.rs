//! State transitions. Each change is applied in chronological order,
//! gradually morphing the current state into the next; [`super::check`] has
//! already vouched for legality by the time anything here runs.

use rand::rngs::StdRng;

use jedna_elements::prelude::*;

use crate::model::*;

/// Deals the opening hands and flips the first top card, applying its
/// initial effect. Wild flips (plain or draw-four) are set aside and slid
/// back under the deck once a non-wild top is found.
pub(crate) fn start(state: &mut State, rng: &mut StdRng) {
    let mut deck = Deck::standard();
    deck.shuffle(rng);
    state.deck = deck;
    state.discard = DiscardPile::new();
    state.direction = Direction::Clockwise;
    state.stacked_cards = 0;
    state.already_picked = false;
    state.picked_card = None;

    for player in &mut state.players {
        for _ in 0..7 {
            if let Some(card) = state.deck.draw() {
                player.hand.add(card);
            }
        }
    }

    let mut rejected = Vec::new();
    while let Some(card) = state.deck.draw() {
        if card.is_wild() {
            rejected.push(card);
        } else {
            state.discard.place(card);
            break;
        }
    }
    state.deck.place_under(rejected);

    state.phase = GamePhase::Normal;
    if let Some(top) = state.top_card() {
        match top.figure() {
            // the first player is passed over
            Figure::Skip => state.rotate(1),
            Figure::Reverse => state.direction = state.direction.flipped(),
            Figure::DrawTwo => {
                state.phase = GamePhase::WarDrawTwo;
                state.stacked_cards = 2;
            }
            _ => {}
        }
    }
}

/// Commits a checked play: moves the card(s) to the discard, resolves a win,
/// applies figure effects in placement order, and rotates the turn.
pub(crate) fn apply_play(
    state: &mut State,
    card: Card,
    chosen_color: Option<Color>,
    double: bool,
) -> ActionOutcome {
    let attach = |removed: Card| {
        if removed.is_wild() {
            removed.with_color(chosen_color.unwrap())
        } else {
            removed
        }
    };

    let placed = attach(state.players[0].hand.remove(card).unwrap());
    state.discard.place(placed);
    let second = if double {
        let placed2 = attach(state.players[0].hand.remove(card).unwrap());
        state.discard.place(placed2);
        Some(placed2)
    } else {
        None
    };

    if state.players[0].hand.is_empty() {
        let end = GameEnd::from_hands(state.players[0].id.clone(), &state.players);
        state.phase = GamePhase::Off;
        state.stacked_cards = 0;
        state.already_picked = false;
        state.picked_card = None;
        return ActionOutcome::Won(end);
    }

    let mut advance = 1;
    for played in [Some(placed), second].into_iter().flatten() {
        match played.figure() {
            Figure::Skip => advance += 1,
            Figure::Reverse => {
                // In a +2 war this redirects the stacked penalty to the
                // previous player; the war itself survives.
                state.direction = state.direction.flipped();
            }
            Figure::DrawTwo => {
                if state.phase == GamePhase::Normal {
                    state.phase = GamePhase::WarDrawTwo;
                }
                state.stacked_cards += 2;
            }
            Figure::WildDrawFour => {
                state.phase = GamePhase::WarWildDrawFour;
                state.stacked_cards += 4;
            }
            Figure::Digit(_) | Figure::Wild => {}
        }
    }
    debug_assert!(state.phase.is_war() || state.stacked_cards == 0);

    let uno = state.players[0].hand.len() == 1;
    let skipped = (1..advance).map(|k| state.player_at_offset(k).id.clone()).collect();
    state.already_picked = false;
    state.picked_card = None;
    state.rotate(advance);

    ActionOutcome::Played { card: placed, second, uno, skipped }
}

/// Commits a checked draw: the card goes straight into the hand, and the
/// picked-card marker remembers it for the rest of the turn.
pub(crate) fn apply_draw(state: &mut State, rng: &mut StdRng) -> ActionOutcome {
    let drawn =
        draw_with_reshuffle(&mut state.deck, &mut state.discard, 1, rng).pop();
    state.already_picked = true;
    state.picked_card = drawn;
    if let Some(card) = drawn {
        state.players[0].hand.add(card);
    }
    ActionOutcome::Drew(drawn)
}

/// Commits a checked pass. In a war the passer swallows the stacked penalty
/// and the war ends; either way the turn advances by one.
pub(crate) fn apply_pass(state: &mut State, rng: &mut StdRng) -> ActionOutcome {
    if state.phase.is_war() {
        let penalty = state.stacked_cards as usize;
        let drawn =
            draw_with_reshuffle(&mut state.deck, &mut state.discard, penalty, rng);
        let count = drawn.len();
        state.players[0].hand.add_all(drawn);
        state.stacked_cards = 0;
        state.phase = GamePhase::Normal;
        state.rotate(1);
        ActionOutcome::PassedWar { drawn: count }
    } else {
        state.already_picked = false;
        state.picked_card = None;
        state.rotate(1);
        ActionOutcome::Passed
    }
}
