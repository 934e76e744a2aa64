//! The rules engine: every way a game moves from one state to the next.
//!
//! [`Engine`] is the only mutable entry point: callers submit operations, the
//! engine validates them against the current state ([`check`]), applies them
//! ([`step`]), and reports what happened as an [`ActionOutcome`]. A failed
//! operation leaves the state untouched.

mod check;
mod errors;
mod step;

use rand::rngs::StdRng;
use rand::SeedableRng;

use jedna_elements::prelude::*;

use crate::model::*;
pub use self::errors::ActionError;

/// Standard table size; also keeps the opening deal within the deck.
pub const MAX_PLAYERS: usize = 10;

/// The rules engine of one game.
#[derive(Clone, Debug)]
pub struct Engine {
    state: State,
    end: Option<GameEnd>,
    total_score: u32,
    rng: StdRng,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::with_rng(StdRng::from_entropy())
    }

    /// Seedable construction; two engines built from the same rng replay the
    /// same shuffles.
    pub fn with_rng(rng: StdRng) -> Engine {
        Engine { state: State::default(), end: None, total_score: 0, rng }
    }

    /// Builds an engine over an explicitly assembled state. Used by tests and
    /// scenario tooling to force hands, top card, and phase.
    pub fn from_state(state: State) -> Engine {
        Engine { state, end: None, total_score: 0, rng: StdRng::from_entropy() }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn end(&self) -> Option<&GameEnd> {
        self.end.as_ref()
    }

    /// Score accumulated at game end; zero until a winner is declared.
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn acting_player_id(&self) -> Option<&PlayerId> {
        self.state.players.first().map(|p| &p.id)
    }

    /// Every hand card the acting player may legally play right now.
    pub fn playable_cards(&self) -> Vec<Card> {
        check::playable_cards(&self.state)
    }

    /// Seats a player. Only possible before the game starts; the roster is
    /// frozen afterwards.
    pub fn add_player(&mut self, id: impl Into<PlayerId>) -> Result<(), ActionError> {
        if self.end.is_some() {
            return Err(ActionError::GameAlreadyOver);
        }
        if self.state.phase != GamePhase::Off {
            return Err(ActionError::IllegalInState);
        }
        let id = id.into();
        if self.state.players.iter().any(|p| p.id == id) {
            return Err(ActionError::DuplicatePlayer(id));
        }
        if self.state.players.len() == MAX_PLAYERS {
            return Err(ActionError::RosterFull);
        }
        log::debug!("player {} joined", id);
        self.state.players.push(Player::new(id));
        Ok(())
    }

    /// Shuffles, deals seven cards to each player, flips the initial top card
    /// and applies its effect. Transitions `Off -> Normal` (or into a +2 war
    /// on an initial DrawTwo).
    pub fn start_game(&mut self) -> Result<(), ActionError> {
        if self.end.is_some() {
            return Err(ActionError::GameAlreadyOver);
        }
        if self.state.phase != GamePhase::Off {
            return Err(ActionError::IllegalInState);
        }
        if self.state.players.len() < 2 {
            return Err(ActionError::NotEnoughPlayers);
        }
        step::start(&mut self.state, &mut self.rng);
        log::info!(
            "game started: {} players, top card {}, {:?}",
            self.state.players.len(),
            self.state.top_card().map(|c| c.to_string()).unwrap_or_default(),
            self.state.phase,
        );
        Ok(())
    }

    /// Plays one copy (or, with `double`, two identical copies) of `card`
    /// from `player`'s hand.
    pub fn play(
        &mut self,
        player: &PlayerId,
        card: Card,
        chosen_color: Option<Color>,
        double: bool,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_live()?;
        self.ensure_acting(player)?;
        check::check_play(&self.state, card, chosen_color, double)?;
        let cards_before = self.state.total_cards();

        let outcome = step::apply_play(&mut self.state, card, chosen_color, double);
        debug_assert_eq!(self.state.total_cards(), cards_before);

        if let ActionOutcome::Won(end) = &outcome {
            log::info!("{} wins, score {}", end.winner, end.score);
            self.total_score += end.score;
            self.end = Some(end.clone());
        } else {
            log::debug!(
                "{} played {}; next up {}",
                player,
                card,
                self.state.acting_player().id,
            );
        }
        Ok(outcome)
    }

    /// The acting player draws their one card for the turn. Valid only in
    /// the normal phase, once per turn; does not advance the turn.
    pub fn draw_one(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_live()?;
        check::check_draw(&self.state)?;
        let outcome = step::apply_draw(&mut self.state, &mut self.rng);
        log::debug!("{} drew a card", self.state.acting_player().id);
        Ok(outcome)
    }

    /// Concludes the current turn. In a war this swallows the stacked
    /// penalty; in the normal phase it requires a prior draw.
    pub fn pass(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_live()?;
        check::check_pass(&self.state)?;
        let passer = self.state.acting_player().id.clone();
        let outcome = step::apply_pass(&mut self.state, &mut self.rng);
        if let ActionOutcome::PassedWar { drawn } = outcome {
            log::debug!("{} passed and drew {} penalty cards", passer, drawn);
        } else {
            log::debug!("{} passed", passer);
        }
        Ok(outcome)
    }

    /// Dispatches a model-level [`Action`] on behalf of `player`.
    pub fn apply(
        &mut self,
        player: &PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, ActionError> {
        match action {
            Action::Play { card, chosen_color, double } => {
                self.play(player, *card, *chosen_color, *double)
            }
            Action::Draw => {
                self.ensure_live()?;
                self.ensure_acting(player)?;
                self.draw_one()
            }
            Action::Pass => {
                self.ensure_live()?;
                self.ensure_acting(player)?;
                self.pass()
            }
        }
    }

    fn ensure_live(&self) -> Result<(), ActionError> {
        if self.state.phase == GamePhase::Off {
            if self.end.is_some() {
                return Err(ActionError::GameAlreadyOver);
            }
            return Err(ActionError::GameNotStarted);
        }
        Ok(())
    }

    fn ensure_acting(&self, player: &PlayerId) -> Result<(), ActionError> {
        if self.state.players.first().map(|p| &p.id) != Some(player) {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
