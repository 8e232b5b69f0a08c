mod error;
pub mod learner;
pub mod runner;
pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use error::Error;
pub use learner::{Learner, Margin, PolicyEntry, ScoreTally};
pub use runner::{HandLimit, RunSummary, Runner};
pub use simulation::state::{
    ActiveState, GameState, Outcome, OutcomeDescription, PrevState, ResolvedState, SituationKey,
};
pub use simulation::{Card, Game, Rank, Suit};
pub use strategy::{Responder, ThresholdStrategy};

/// A player decision while the hand is still active.
///
/// The textual forms are exactly `hit` and `stand`; parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_enum_str, Deserialize_enum_str)]
pub enum Action {
    #[serde(rename = "hit")]
    Hit,
    #[serde(rename = "stand")]
    Stand,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
        }
    }

    /// Parses a responder reply, rejecting anything but the two action tokens.
    pub fn from_reply(reply: &str) -> Result<Action, Error> {
        reply
            .parse::<Action>()
            .map_err(|_| Error::InvalidAction(reply.to_string()))
    }
}
