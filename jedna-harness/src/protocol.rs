//! Wire protocol: one JSON object per line, UTF-8, over the agent's standard
//! I/O. Engine-to-agent traffic is tagged by `"type"`, agent replies by
//! `"action"`. Card notation on the wire is exactly the one defined by
//! `jedna-elements`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jedna::view::ActionRequest;
use jedna_elements::card::Color;

/// Engine-to-agent envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// The engine wants a move for the enclosed state.
    RequestAction { state: ActionRequest },

    /// Informational traffic; agents may ignore it.
    Notification { message: String },

    /// A rejected or substituted move, explained.
    Error { message: String },

    /// Final envelope of a game; `winner` is absent on a drawn game.
    GameEnd {
        winner: Option<String>,
        scores: BTreeMap<String, u32>,
    },
}

/// Agent reply to a `request_action` envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentReply {
    Play {
        /// Card notation; wild cards may carry the color inline (`wr`) or
        /// through `wild_color`.
        card: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        wild_color: Option<WireColor>,

        #[serde(default, skip_serializing_if = "is_false")]
        double_play: bool,
    },
    Draw,
    Pass,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Color words used on the wire (`wild_color` field).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl From<WireColor> for Color {
    fn from(color: WireColor) -> Color {
        match color {
            WireColor::Red => Color::Red,
            WireColor::Green => Color::Green,
            WireColor::Blue => Color::Blue,
            WireColor::Yellow => Color::Yellow,
        }
    }
}
