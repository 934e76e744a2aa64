//! Runs one game of Jedna between agent commands and prints the report.

use anyhow::{ensure, Result};
use clap::Parser;
use env_logger::Env;

use jedna_harness::runner::{run_game, AgentSeat, HarnessConfig};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Agent commands, one per seat, in seating order. Each is run through
    /// the shell.
    #[clap(value_parser, required = true)]
    commands: Vec<String>,

    /// Seconds an agent gets per turn; 0 means no limit.
    #[clap(long, default_value_t = 30.0)]
    turn_timeout: f64,

    /// Seconds a whole game may last before it is declared a draw; 0 means
    /// no limit.
    #[clap(long, default_value_t = 0.0)]
    game_timeout: f64,
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    ensure!(args.commands.len() >= 2, "need at least two agent commands");

    let seats: Vec<AgentSeat> = args
        .commands
        .iter()
        .enumerate()
        .map(|(i, command)| AgentSeat {
            id: format!("player{}", i + 1).into(),
            command: command.clone(),
        })
        .collect();
    let config = HarnessConfig {
        turn_timeout: args.turn_timeout,
        game_timeout: args.game_timeout,
    };

    let report = run_game(&seats, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
