//! Agent harness for Jedna: the line-delimited JSON protocol spoken over a
//! child process's standard I/O, the per-agent subprocess lifecycle, and the
//! per-game runner that drives the rules engine from agent decisions.
//!
//! Tournament scheduling, configuration files, and reporting belong to the
//! layers built on top of this crate; nothing here knows about them.

pub mod agent;
pub mod protocol;
pub mod runner;

pub mod prelude {
    pub use crate::agent::{AgentError, AgentProcess};
    pub use crate::protocol::{AgentReply, Envelope, WireColor};
    pub use crate::runner::{run_game, AgentSeat, GameReport, HarnessConfig};
}
