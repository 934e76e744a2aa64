//! Main game state bundle.

use jedna_elements::prelude::*;

/// Lifecycle phase of a game.
///
/// `Off` is both "not started" and "finished"; [`crate::engine::Engine`]
/// distinguishes the two through its recorded game end.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GamePhase {
    #[default]
    Off,
    Normal,
    /// A draw-two war: only a DrawTwo, a color-matching Reverse, or a
    /// WildDrawFour may be played; a pass swallows the stacked penalty.
    WarDrawTwo,
    /// A wild-draw-four war: only a WildDrawFour may be played.
    WarWildDrawFour,
}

impl GamePhase {
    pub const fn is_war(self) -> bool {
        matches!(self, GamePhase::WarDrawTwo | GamePhase::WarWildDrawFour)
    }

    /// The label used on the wire.
    pub const fn wire_label(self) -> &'static str {
        match self {
            GamePhase::Off => "off",
            GamePhase::Normal => "normal",
            GamePhase::WarDrawTwo => "war_+2",
            GamePhase::WarWildDrawFour => "war_wd4",
        }
    }
}

/// Turn rotation direction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl Direction {
    pub const fn flipped(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }
}

/// State variables sampled right before a player's action.
///
/// The acting player is always `players[0]`; turn changes rotate the seating
/// so that this invariant holds between any two operations.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub players: Vec<Player>,

    /// Face-down draw stack.
    pub deck: Deck,

    /// Face-up pile; its top card drives color/figure matching.
    pub discard: DiscardPile,

    pub direction: Direction,

    pub phase: GamePhase,

    /// Accumulated draw penalty of the ongoing war. Zero outside wars; at
    /// least 2 inside, growing by 2 or 4 per stacked play.
    pub stacked_cards: u8,

    /// True iff the acting player has drawn their one card this turn and has
    /// not yet resolved it. Only possible in [`GamePhase::Normal`].
    pub already_picked: bool,

    /// The card drawn this turn. `None` with `already_picked` set means the
    /// table had no card left to give.
    pub picked_card: Option<Card>,
}

impl State {
    pub fn acting_player(&self) -> &Player {
        &self.players[0]
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard.top()
    }

    /// Rotates the seating so that the player `k` seats away (in the current
    /// direction) becomes the acting player.
    pub fn rotate(&mut self, k: usize) {
        let n = self.players.len();
        if n == 0 {
            return;
        }
        match self.direction {
            Direction::Clockwise => self.players.rotate_left(k % n),
            Direction::Counterclockwise => self.players.rotate_right(k % n),
        }
    }

    /// The player seated `k` away from the acting player in the current
    /// direction.
    pub fn player_at_offset(&self, k: usize) -> &Player {
        let n = self.players.len();
        match self.direction {
            Direction::Clockwise => &self.players[k % n],
            Direction::Counterclockwise => &self.players[(n - k % n) % n],
        }
    }

    /// The other players in turn order, starting after the acting player.
    pub fn others_in_turn_order(&self) -> Vec<&Player> {
        (1..self.players.len()).map(|k| self.player_at_offset(k)).collect()
    }

    /// Total number of cards across deck, discard, and all hands. Constant
    /// for the life of a game.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }
}
