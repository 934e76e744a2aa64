//! Rules engine for Jedna, a two-to-many player card game in the UNO family.
//!
//! The [`engine::Engine`] owns the deck, the discard pile, every hand, and the
//! turn cursor; it validates each play against the top card and the current
//! game phase (normal / draw-two war / wild-draw-four war) and applies the
//! consequences of action cards. [`view`] renders the engine's observable
//! state into the public form delivered to the acting agent.

pub mod engine;
pub mod model;
pub mod view;

pub mod prelude {
    //! Convenient re-exports of commonly imported items.
    pub use jedna_elements::prelude::*;

    pub use crate::engine::{ActionError, Engine};
    pub use crate::model::*;
    pub use crate::view::*;
}
