use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::{Action, Error};

/// What the player sees when deciding: softness, own total and the dealer upcard.
///
/// Written as `<H|S><player_total>-<dealer_upcard>`, e.g. `H17-9` or `S13-11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SituationKey {
    pub soft: bool,
    pub player_total: u16,
    pub dealer_upcard: u8,
}

impl SituationKey {
    pub fn new(soft: bool, player_total: u16, dealer_upcard: u8) -> Self {
        SituationKey {
            soft,
            player_total,
            dealer_upcard,
        }
    }
}

impl std::fmt::Display for SituationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let soft = if self.soft { 'S' } else { 'H' };
        write!(f, "{}{}-{}", soft, self.player_total, self.dealer_upcard)
    }
}

impl FromStr for SituationKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSituationKey(s.to_string());
        let soft = match s.chars().next() {
            Some('H') => false,
            Some('S') => true,
            _ => return Err(invalid()),
        };
        let (total, upcard) = s[1..].split_once('-').ok_or_else(invalid)?;
        if !is_digits(total) || !is_digits(upcard) {
            return Err(invalid());
        }
        Ok(SituationKey {
            soft,
            player_total: total.parse().map_err(|_| invalid())?,
            dealer_upcard: upcard.parse().map_err(|_| invalid())?,
        })
    }
}

/// Plain ASCII digits only, so no sign can slip through `parse`.
fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

impl Serialize for SituationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The situation the player faced last in this hand and the action taken there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrevState {
    pub key: SituationKey,
    pub action: Action,
}

impl PrevState {
    pub fn new(key: SituationKey, action: Action) -> Self {
        PrevState { key, action }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = match self {
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
            Outcome::Push => "Push",
        };
        write!(f, "{}", outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeDescription {
    DealerBusted,
    PlayerWon,
    PlayerBusted,
    DealerWon,
    Tie,
}

impl std::fmt::Display for OutcomeDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            OutcomeDescription::DealerBusted => "Dealer busted",
            OutcomeDescription::PlayerWon => "Player won",
            OutcomeDescription::PlayerBusted => "Player busted",
            OutcomeDescription::DealerWon => "Dealer won",
            OutcomeDescription::Tie => "Tie",
        };
        write!(f, "{}", description)
    }
}

/// Snapshot taken while the player can still act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveState {
    pub player_total: u16,
    pub dealer_upcard: u8,
    pub player_soft: bool,
    pub dealer_soft: bool,
    pub prev_state: Option<PrevState>,
}

impl ActiveState {
    pub fn situation_key(&self) -> SituationKey {
        SituationKey::new(self.player_soft, self.player_total, self.dealer_upcard)
    }
}

/// Snapshot taken once the player has stood or busted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedState {
    pub player_total: u16,
    pub dealer_total: u16,
    pub player_bust: bool,
    pub dealer_bust: bool,
    pub prev_state: Option<PrevState>,
    pub outcome: Outcome,
    pub description: OutcomeDescription,
}

/// What a responder is shown at each decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum GameState {
    Active(ActiveState),
    Resolved(ResolvedState),
}

impl GameState {
    pub fn is_active(&self) -> bool {
        matches!(self, GameState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveState> {
        match self {
            GameState::Active(state) => Some(state),
            GameState::Resolved(_) => None,
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedState> {
        match self {
            GameState::Active(_) => None,
            GameState::Resolved(state) => Some(state),
        }
    }

    pub fn prev_state(&self) -> Option<&PrevState> {
        match self {
            GameState::Active(state) => state.prev_state.as_ref(),
            GameState::Resolved(state) => state.prev_state.as_ref(),
        }
    }

    pub fn player_total(&self) -> u16 {
        match self {
            GameState::Active(state) => state.player_total,
            GameState::Resolved(state) => state.player_total,
        }
    }
}
