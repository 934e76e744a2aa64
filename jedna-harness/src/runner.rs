//! Per-game loop: views out, replies in, engine operations applied, with the
//! recovery policy that keeps a game progressing no matter what the agents
//! do. One runner drives one game on one thread; parallel games use
//! independent runners.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use serde::Serialize;

use jedna::engine::Engine;
use jedna::model::{ActionOutcome, GameEnd, GamePhase};
use jedna::view::action_request;
use jedna_elements::prelude::*;

use crate::agent::AgentProcess;
use crate::protocol::{AgentReply, Envelope};

/// How long a stopped agent gets to exit on its own before being killed.
const STOP_GRACE: Duration = Duration::from_secs(1);

/// The two timeouts the core consumes. Seconds; `0.0` means no limit.
#[derive(Copy, Clone, Debug)]
pub struct HarnessConfig {
    pub turn_timeout: f64,
    pub game_timeout: f64,
}

impl Default for HarnessConfig {
    fn default() -> HarnessConfig {
        HarnessConfig { turn_timeout: 30.0, game_timeout: 0.0 }
    }
}

impl HarnessConfig {
    pub fn turn_limit(&self) -> Option<Duration> {
        limit(self.turn_timeout)
    }

    pub fn game_limit(&self) -> Option<Duration> {
        limit(self.game_timeout)
    }
}

fn limit(seconds: f64) -> Option<Duration> {
    (seconds > 0.0).then(|| Duration::from_secs_f64(seconds))
}

/// One seat at the table: who plays and how to start them.
#[derive(Clone, Debug)]
pub struct AgentSeat {
    pub id: PlayerId,
    pub command: String,
}

/// What a finished game looked like from the outside.
#[derive(Clone, Debug, Serialize)]
pub struct GameReport {
    /// Absent when the game was drawn, aborted, or forfeited.
    pub winner: Option<PlayerId>,

    /// Hand value per player; the winner's entry is the awarded score.
    pub scores: BTreeMap<PlayerId, u32>,

    /// The agent dropped for repeated protocol errors, if any.
    pub forfeited: Option<PlayerId>,

    /// The per-game timeout expired.
    pub timed_out: bool,
}

/// Runs one full game between the seated agents.
///
/// Engine rejections and agent protocol slips are absorbed by the
/// safe-default policy; two protocol errors in a row forfeit the offender;
/// failure to even spawn an agent aborts the game.
pub fn run_game(seats: &[AgentSeat], config: &HarnessConfig) -> Result<GameReport> {
    if seats.len() < 2 {
        bail!("a game needs at least two seats, got {}", seats.len());
    }
    log::info!(
        "running game: {}",
        seats.iter().map(|seat| format!("{} ({})", seat.id, seat.command)).join(", ")
    );

    let mut engine = Engine::new();
    for seat in seats {
        engine
            .add_player(seat.id.clone())
            .with_context(|| format!("cannot seat '{}'", seat.id))?;
    }

    let mut agents: Vec<AgentProcess> = Vec::with_capacity(seats.len());
    for seat in seats {
        match AgentProcess::start(&seat.command) {
            Ok(agent) => agents.push(agent),
            Err(err) => {
                for agent in &mut agents {
                    agent.stop(STOP_GRACE);
                }
                return Err(err)
                    .with_context(|| format!("failed to start agent for '{}'", seat.id));
            }
        }
    }

    if let Err(err) = engine.start_game() {
        for agent in &mut agents {
            agent.stop(STOP_GRACE);
        }
        return Err(err).context("failed to start the game");
    }

    let deadline = config.game_limit().map(|limit| Instant::now() + limit);
    let mut consecutive_errors = vec![0u32; seats.len()];
    let mut end: Option<GameEnd> = None;
    let mut forfeited: Option<PlayerId> = None;
    let mut timed_out = false;

    loop {
        if let Some(game_end) = engine.end() {
            end = Some(game_end.clone());
            break;
        }
        if deadline.map_or(false, |d| Instant::now() >= d) {
            log::info!("per-game timeout expired; declaring a draw");
            timed_out = true;
            break;
        }

        let view = action_request(&engine);
        let idx = seats
            .iter()
            .position(|seat| seat.id.as_str() == view.your_id)
            .expect("acting player is always seated");
        let acting = seats[idx].id.clone();

        match agents[idx].request_action(&view, config.turn_limit()) {
            Ok(reply) => {
                consecutive_errors[idx] = 0;
                match apply_reply(&mut engine, &acting, &reply) {
                    Ok(outcome) => announce(&mut agents, &acting, &outcome),
                    Err(message) => {
                        log::warn!("agent '{}' move rejected: {}", acting, message);
                        agents[idx].notify(&Envelope::Error { message });
                        safe_default(&mut engine);
                    }
                }
            }
            Err(err) => {
                log::warn!("agent '{}' protocol error: {}", acting, err);
                consecutive_errors[idx] += 1;
                if consecutive_errors[idx] >= 2 {
                    log::warn!("agent '{}' forfeits after repeated errors", acting);
                    forfeited = Some(acting);
                    break;
                }
                agents[idx].notify(&Envelope::Error { message: err.to_string() });
                safe_default(&mut engine);
            }
        }
    }

    let report = close_report(&engine, end, forfeited, timed_out);
    let farewell = Envelope::GameEnd {
        winner: report.winner.as_ref().map(|w| w.to_string()),
        scores: report
            .scores
            .iter()
            .map(|(id, score)| (id.to_string(), *score))
            .collect(),
    };
    for agent in &mut agents {
        agent.notify(&farewell);
    }
    for agent in &mut agents {
        agent.stop(STOP_GRACE);
    }
    Ok(report)
}

/// Translates an agent reply into engine operations.
fn apply_reply(
    engine: &mut Engine,
    acting: &PlayerId,
    reply: &AgentReply,
) -> std::result::Result<ActionOutcome, String> {
    match reply {
        AgentReply::Play { card, wild_color, double_play } => {
            let card: Card = card.parse().map_err(|err: ParseCardError| err.to_string())?;
            // the chosen color may ride inline in the notation (`wr`) or in
            // the dedicated field
            let chosen = wild_color
                .map(Color::from)
                .or_else(|| (card.is_wild() && !card.color().is_wild()).then(|| card.color()));
            engine
                .play(acting, card, chosen, *double_play)
                .map_err(|err| err.to_string())
        }
        AgentReply::Draw => engine.draw_one().map_err(|err| err.to_string()),
        AgentReply::Pass => engine.pass().map_err(|err| err.to_string()),
    }
}

/// The move applied when an agent cannot or will not produce a legal one.
/// Always ends the turn, so the game is guaranteed to progress.
fn safe_default(engine: &mut Engine) {
    let phase = engine.state().phase;
    let already_picked = engine.state().already_picked;
    if phase == GamePhase::Normal && !already_picked {
        let _ = engine.draw_one();
    }
    if let Err(err) = engine.pass() {
        log::debug!("safe-default pass rejected: {}", err);
    }
}

/// Broadcasts what just happened to every agent.
fn announce(agents: &mut [AgentProcess], acting: &PlayerId, outcome: &ActionOutcome) {
    let mut messages: Vec<String> = Vec::new();
    match outcome {
        ActionOutcome::Played { card, second, uno, skipped } => {
            messages.push(match second {
                Some(_) => format!("{} played {} twice", acting, card),
                None => format!("{} played {}", acting, card),
            });
            for player in skipped {
                messages.push(format!("{} was skipped", player));
            }
            if *uno {
                messages.push(format!("{} has one card left", acting));
            }
        }
        ActionOutcome::Drew(_) => {
            // the drawn card stays private; the turn is not over yet
            messages.push(format!("{} drew a card", acting));
        }
        ActionOutcome::Passed => messages.push(format!("{} passed", acting)),
        ActionOutcome::PassedWar { drawn } => {
            messages.push(format!("{} passed and drew {} penalty cards", acting, drawn));
        }
        ActionOutcome::Won(end) => {
            messages.push(format!("{} wins with {} points", end.winner, end.score));
        }
    }
    for message in messages {
        for agent in agents.iter_mut() {
            agent.notify(&Envelope::Notification { message: message.clone() });
        }
    }
}

fn close_report(
    engine: &Engine,
    end: Option<GameEnd>,
    forfeited: Option<PlayerId>,
    timed_out: bool,
) -> GameReport {
    match end {
        Some(end) => {
            let mut scores: BTreeMap<PlayerId, u32> =
                end.hand_values.iter().cloned().collect();
            scores.insert(end.winner.clone(), end.score);
            GameReport { winner: Some(end.winner), scores, forfeited, timed_out }
        }
        None => GameReport {
            winner: None,
            scores: engine
                .state()
                .players
                .iter()
                .map(|p| (p.id.clone(), p.hand.value()))
                .collect(),
            forfeited,
            timed_out,
        },
    }
}
