use std::collections::HashMap;
use std::ops::{Add, Sub};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::runner::{HandLimit, RunSummary, Runner};
use crate::strategy::{Responder, DEAL};
use crate::{Action, Error, GameState, Outcome, SituationKey};

/// Reward for a decision after which the hand is still going.
pub const ACTIVE_REWARD: f64 = 0.1;

fn terminal_reward(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Win => 1.0,
        Outcome::Loss => -1.0,
        Outcome::Push => 0.0,
    }
}

/// Running mean of the rewards tallied for one situation and action.
///
/// Comparisons and arithmetic work on the means only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTally {
    score: f64,
    count: u64,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&mut self, score: f64) {
        self.score += score;
        self.count += 1;
    }

    /// Mean of the tallied scores, or 0 when nothing has been tallied.
    pub fn value(&self) -> f64 {
        if self.count > 0 {
            self.score / self.count as f64
        } else {
            0.0
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl PartialEq for ScoreTally {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl PartialOrd for ScoreTally {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value().partial_cmp(&other.value())
    }
}

impl Add for ScoreTally {
    type Output = f64;

    fn add(self, other: ScoreTally) -> f64 {
        self.value() + other.value()
    }
}

impl Sub for ScoreTally {
    type Output = f64;

    fn sub(self, other: ScoreTally) -> f64 {
        self.value() - other.value()
    }
}

/// The two tallies kept for every observed situation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionTallies {
    pub hit: ScoreTally,
    pub stand: ScoreTally,
}

impl ActionTallies {
    pub fn get(&self, action: Action) -> &ScoreTally {
        match action {
            Action::Hit => &self.hit,
            Action::Stand => &self.stand,
        }
    }

    pub fn get_mut(&mut self, action: Action) -> &mut ScoreTally {
        match action {
            Action::Hit => &mut self.hit,
            Action::Stand => &mut self.stand,
        }
    }

    /// Hit only wins with a strictly higher mean.
    pub fn best(&self) -> Action {
        if self.hit > self.stand {
            Action::Hit
        } else {
            Action::Stand
        }
    }
}

/// The better action for a situation and how far ahead it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub action: Action,
    pub diff: f64,
}

impl std::fmt::Display for Margin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self.action {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
        };
        write!(f, "{} +{}", action, self.diff)
    }
}

/// One row of the learned policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEntry {
    pub key: SituationKey,
    pub action: Action,
    pub margin: f64,
    pub hit: f64,
    pub stand: f64,
}

/// Every syntactically possible key: hard before soft, then player total 4..=21, then dealer
/// upcard 2..=11.
pub fn ordered_keys() -> impl Iterator<Item = SituationKey> + Clone {
    [false, true].into_iter().flat_map(|soft| {
        (4..=21u16).flat_map(move |player_total| {
            (2..=11u8)
                .map(move |dealer_upcard| SituationKey::new(soft, player_total, dealer_upcard))
        })
    })
}

/// Explores by choosing hit or stand at random and tallies the reward each choice led to.
pub struct Learner {
    outcomes: HashMap<SituationKey, ActionTallies>,
    rng: StdRng,
}

impl Learner {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Learner {
            outcomes: HashMap::new(),
            rng,
        }
    }

    pub fn outcomes(&self) -> &HashMap<SituationKey, ActionTallies> {
        &self.outcomes
    }

    /// Returns the tallies for `key`, creating empty ones on first sight.
    pub fn observe(&mut self, key: SituationKey) -> &mut ActionTallies {
        self.outcomes.entry(key).or_default()
    }

    /// Lets the runner play `hands` hands with this learner as the player.
    pub fn run_explorer(
        &mut self,
        runner: &mut Runner,
        hands: HandLimit,
    ) -> Result<RunSummary, Error> {
        let summary = runner.run(self, hands)?;
        log::info!(
            "explored {} hands, {} situations observed",
            summary.hands_played,
            self.outcomes.len()
        );
        Ok(summary)
    }

    pub fn ordered_keys(&self) -> impl Iterator<Item = SituationKey> + Clone {
        ordered_keys()
    }

    /// Enumeration order, restricted to keys that have been observed.
    pub fn observed_keys(&self) -> impl Iterator<Item = SituationKey> + '_ {
        ordered_keys().filter(move |key| self.outcomes.contains_key(key))
    }

    /// The action with the higher mean reward, or `None` for a never observed key.
    pub fn action_for(&self, key: &SituationKey) -> Option<Action> {
        self.outcomes.get(key).map(ActionTallies::best)
    }

    pub fn action_with_margin(&self, key: &SituationKey) -> Option<Margin> {
        let actions = self.outcomes.get(key)?;
        let margin = match actions.best() {
            Action::Hit => Margin {
                action: Action::Hit,
                diff: actions.hit - actions.stand,
            },
            Action::Stand => Margin {
                action: Action::Stand,
                diff: actions.stand - actions.hit,
            },
        };
        Some(margin)
    }

    pub fn report(&self) -> Vec<PolicyEntry> {
        self.observed_keys()
            .filter_map(|key| {
                let actions = self.outcomes.get(&key)?;
                let margin = self.action_with_margin(&key)?;
                Some(PolicyEntry {
                    key,
                    action: margin.action,
                    margin: margin.diff,
                    hit: actions.hit.value(),
                    stand: actions.stand.value(),
                })
            })
            .collect()
    }

    fn tally(&mut self, key: SituationKey, action: Action, reward: f64) {
        log::trace!("tally {} {} {}", key, action.as_str(), reward);
        self.observe(key).get_mut(action).tally(reward);
    }
}

impl Default for Learner {
    fn default() -> Self {
        Self::new()
    }
}

impl Responder for Learner {
    fn respond(&mut self, state: &GameState) -> Result<String, Error> {
        match state {
            GameState::Active(active) => {
                if let Some(prev) = &active.prev_state {
                    self.tally(prev.key, prev.action, ACTIVE_REWARD);
                }
                let action = if self.rng.gen_bool(0.5) {
                    Action::Hit
                } else {
                    Action::Stand
                };
                Ok(action.as_str().to_string())
            }
            GameState::Resolved(resolved) => {
                match &resolved.prev_state {
                    Some(prev) => {
                        self.tally(prev.key, prev.action, terminal_reward(resolved.outcome))
                    }
                    None => log::debug!("resolved hand without a decision, nothing to tally"),
                }
                Ok(DEAL.to_string())
            }
        }
    }
}
