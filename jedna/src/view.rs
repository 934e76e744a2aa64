//! Agent-facing view of the engine state.
//!
//! [`action_request`] is pure: it reads the engine, mutates nothing, and
//! yields the same bytes until the next engine mutation. The view is what an
//! acting agent is allowed to know — its own hand, public counts for
//! everyone else.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::model::GamePhase;

/// Public knowledge about one opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OtherPlayer {
    pub id: String,
    pub card_count: usize,
}

/// The state bundle delivered with a `request_action` envelope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The acting player's identity.
    pub your_id: String,

    /// Notations of the acting player's cards, in hand order.
    pub hand: Vec<String>,

    /// Notation of the current top card (chosen color attached for wilds).
    pub top_card: String,

    /// `"off" | "normal" | "war_+2" | "war_wd4"`.
    pub game_state: String,

    pub stacked_cards: u8,

    pub already_picked: bool,

    pub picked_card: Option<String>,

    /// Opponents in turn order, starting after the acting player.
    pub other_players: Vec<OtherPlayer>,

    /// Subset of `{"play", "draw", "pass"}` that will not be rejected.
    pub available_actions: Vec<String>,

    /// Every hand card that is legal to play now; while `already_picked`,
    /// at most the picked card.
    pub playable_cards: Vec<String>,
}

/// Renders the view for the acting player.
pub fn action_request(engine: &Engine) -> ActionRequest {
    let state = engine.state();
    let acting = state.acting_player();
    let playable = engine.playable_cards();

    // "play" is only offered when a playable card actually exists, so that
    // every advertised action succeeds.
    let mut available: Vec<&str> = Vec::new();
    if state.phase != GamePhase::Off {
        if !playable.is_empty() {
            available.push("play");
        }
        if state.already_picked || state.stacked_cards > 0 {
            available.push("pass");
        } else {
            available.push("draw");
        }
    }

    ActionRequest {
        your_id: acting.id.to_string(),
        hand: acting.hand.iter().map(ToString::to_string).collect_vec(),
        top_card: state.top_card().map(|c| c.to_string()).unwrap_or_default(),
        game_state: state.phase.wire_label().to_string(),
        stacked_cards: state.stacked_cards,
        already_picked: state.already_picked,
        picked_card: state.picked_card.map(|c| c.to_string()),
        other_players: state
            .others_in_turn_order()
            .into_iter()
            .map(|p| OtherPlayer { id: p.id.to_string(), card_count: p.hand.len() })
            .collect(),
        available_actions: available.into_iter().map(str::to_string).collect(),
        playable_cards: playable.iter().map(ToString::to_string).collect(),
    }
}
