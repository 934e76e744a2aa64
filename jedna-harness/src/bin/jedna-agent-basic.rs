//! Baseline agent: plays the first card the view offers, otherwise draws,
//! otherwise passes. Wild colors follow the majority color of the hand.
//!
//! Useful as a smoke-test opponent and as a reference for the protocol loop
//! an agent is expected to run.

use std::io::{self, BufRead, Write};

use jedna::view::ActionRequest;
use jedna_harness::protocol::{AgentReply, Envelope, WireColor};

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let Ok(envelope) = serde_json::from_str::<Envelope>(&line) else {
            eprintln!("unparseable envelope: {line}");
            continue;
        };
        match envelope {
            Envelope::RequestAction { state } => {
                let reply = decide(&state);
                let Ok(json) = serde_json::to_string(&reply) else { break };
                if writeln!(out, "{json}").and_then(|_| out.flush()).is_err() {
                    break;
                }
            }
            Envelope::GameEnd { .. } => break,
            Envelope::Notification { .. } | Envelope::Error { .. } => {}
        }
    }
}

fn decide(state: &ActionRequest) -> AgentReply {
    let offered = |action: &str| state.available_actions.iter().any(|a| a == action);

    if offered("play") {
        if let Some(card) = state.playable_cards.first() {
            let wild_color = card.starts_with('w').then(|| majority_color(&state.hand));
            return AgentReply::Play { card: card.clone(), wild_color, double_play: false };
        }
    }
    if offered("draw") {
        return AgentReply::Draw;
    }
    AgentReply::Pass
}

/// Most common color among held non-wild cards; red when holding only wilds.
fn majority_color(hand: &[String]) -> WireColor {
    let colors =
        [WireColor::Red, WireColor::Green, WireColor::Blue, WireColor::Yellow];
    let mut counts = [0usize; 4];
    for card in hand {
        match card.chars().next() {
            Some('r') => counts[0] += 1,
            Some('g') => counts[1] += 1,
            Some('b') => counts[2] += 1,
            Some('y') => counts[3] += 1,
            _ => {}
        }
    }
    let best = (0..4).max_by_key(|&i| counts[i]).unwrap_or(0);
    colors[best]
}
