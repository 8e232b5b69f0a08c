use crate::{Action, Error, GameState};

/// Reply that asks the runner for another hand.
pub const DEAL: &str = "deal";
/// Reply that stops the runner once the hand is resolved.
pub const END: &str = "end";

/// A decision source driven by the runner.
///
/// While the snapshot is active the reply must be `hit` or `stand`. Once resolved, `end` stops
/// the run and any other reply continues with the next hand.
pub trait Responder {
    fn respond(&mut self, state: &GameState) -> Result<String, Error>;
}

impl<F> Responder for F
where
    F: FnMut(&GameState) -> Result<String, Error>,
{
    fn respond(&mut self, state: &GameState) -> Result<String, Error> {
        self(state)
    }
}

/// Hits below a fixed total and stands otherwise.
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    stand_on: u16,
    single_hand: bool,
}

impl ThresholdStrategy {
    pub fn new(stand_on: u16) -> Self {
        ThresholdStrategy {
            stand_on,
            single_hand: false,
        }
    }

    /// Ends the run after the first resolved hand.
    pub fn single_hand(mut self) -> Self {
        self.single_hand = true;
        self
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::new(17)
    }
}

impl Responder for ThresholdStrategy {
    fn respond(&mut self, state: &GameState) -> Result<String, Error> {
        let reply = match state {
            GameState::Active(active) if active.player_total < self.stand_on => {
                Action::Hit.as_str()
            }
            GameState::Active(_) => Action::Stand.as_str(),
            GameState::Resolved(_) if self.single_hand => END,
            GameState::Resolved(_) => DEAL,
        };
        Ok(reply.to_string())
    }
}
