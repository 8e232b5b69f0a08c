use crate::strategy::{Responder, END};
use crate::{Action, Error, Game};

/// Dealer keeps drawing while below this total.
const DEALER_STANDS_ON: u16 = 17;

/// How many hands a run may deal at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLimit {
    Unbounded,
    Limited(u64),
}

/// Negative counts mean no limit.
impl From<i64> for HandLimit {
    fn from(hands: i64) -> Self {
        if hands < 0 {
            HandLimit::Unbounded
        } else {
            HandLimit::Limited(hands as u64)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub hands_played: u64,
    /// True when the responder stopped the run with `end`.
    pub ended_by_responder: bool,
}

/// Drives a game hand after hand, asking a responder at every decision point.
pub struct Runner {
    game: Game,
}

impl Runner {
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Self {
        Runner { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays up to `hands` hands. Returns early when the responder replies `end` to a resolved
    /// snapshot. Any reply other than `hit` or `stand` to an active snapshot aborts the run.
    pub fn run<R: Responder + ?Sized>(
        &mut self,
        responder: &mut R,
        hands: HandLimit,
    ) -> Result<RunSummary, Error> {
        log::info!("running {:?} hands", hands);
        let mut summary = RunSummary::default();

        loop {
            if let HandLimit::Limited(limit) = hands {
                if summary.hands_played >= limit {
                    break;
                }
            }

            self.game.deal()?;

            while self.game.active() {
                let state = self.game.state();
                let reply = responder.respond(&state)?;
                log::trace!("{:?} -> {}", state, reply);
                match Action::from_reply(&reply)? {
                    Action::Hit => self.game.player_hit()?,
                    Action::Stand => self.game.player_stand(),
                }
            }

            if !self.game.player_bust() {
                while self.game.dealer_total() < DEALER_STANDS_ON {
                    self.game.dealer_hit()?;
                }
            }

            let state = self.game.state();
            if let Some(resolved) = state.resolved() {
                log::debug!(
                    "hand {}: {} ({}), player {} dealer {}",
                    summary.hands_played + 1,
                    resolved.outcome,
                    resolved.description,
                    resolved.player_total,
                    resolved.dealer_total
                );
            }
            let reply = responder.respond(&state)?;
            summary.hands_played += 1;

            if reply == END {
                summary.ended_by_responder = true;
                break;
            }
        }

        log::info!("finished after {} hands", summary.hands_played);
        Ok(summary)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::simulation::deck::Deck;
    use crate::strategy::DEAL;
    use crate::{GameState, ThresholdStrategy};

    fn unshuffled_runner() -> Runner {
        Runner::with_game(Game::from_deck(Deck::new(), StdRng::seed_from_u64(1)))
    }

    #[test]
    fn negative_hand_counts_are_unbounded() {
        assert_eq!(HandLimit::from(-1), HandLimit::Unbounded);
        assert_eq!(HandLimit::from(0), HandLimit::Limited(0));
        assert_eq!(HandLimit::from(25), HandLimit::Limited(25));
    }

    #[test]
    fn invalid_reply_aborts_the_run() {
        let mut runner = Runner::with_game(Game::with_seed(2));
        let mut steal = |_: &GameState| -> Result<String, Error> { Ok("steal".to_string()) };
        match runner.run(&mut steal, HandLimit::Unbounded) {
            Err(Error::InvalidAction(reply)) => assert_eq!(reply, "steal"),
            other => panic!("expected InvalidAction, got {:?}", other),
        }
    }

    #[test]
    fn completes_the_requested_hands() {
        let mut runner = Runner::with_game(Game::with_seed(3));
        let summary = runner
            .run(&mut ThresholdStrategy::default(), HandLimit::Limited(1000))
            .unwrap();
        assert_eq!(summary.hands_played, 1000);
        assert!(!summary.ended_by_responder);
    }

    #[test]
    fn zero_hands_deals_nothing() {
        let mut runner = unshuffled_runner();
        let summary = runner
            .run(&mut ThresholdStrategy::default(), HandLimit::Limited(0))
            .unwrap();
        assert_eq!(summary.hands_played, 0);
        assert_eq!(runner.game().deck().len(), 52);
    }

    #[test]
    fn end_reply_stops_after_one_hand() {
        let mut runner = Runner::with_game(Game::with_seed(4));
        let mut always_hit = |state: &GameState| -> Result<String, Error> {
            Ok(if state.is_active() { "hit" } else { END }.to_string())
        };
        let summary = runner.run(&mut always_hit, HandLimit::Unbounded).unwrap();
        assert_eq!(summary.hands_played, 1);
        assert!(summary.ended_by_responder);
        assert!(runner.game().player_bust());
    }

    #[test]
    fn unknown_resolved_replies_continue() {
        let mut runner = Runner::with_game(Game::with_seed(5));
        let mut resolved_calls = 0;
        let mut responder = |state: &GameState| -> Result<String, Error> {
            if state.is_active() {
                return Ok("stand".to_string());
            }
            resolved_calls += 1;
            Ok(if resolved_calls == 3 { END } else { "whatever" }.to_string())
        };
        let summary = runner.run(&mut responder, HandLimit::Limited(10)).unwrap();
        assert_eq!(summary.hands_played, 3);
        assert!(summary.ended_by_responder);
    }

    #[test]
    fn dealer_draws_to_seventeen_after_a_stand() {
        let mut runner = unshuffled_runner();
        let mut stand_once = |state: &GameState| -> Result<String, Error> {
            Ok(if state.is_active() { "stand" } else { END }.to_string())
        };
        runner.run(&mut stand_once, HandLimit::Unbounded).unwrap();
        // Dealer King/Queen already stands on 20.
        assert_eq!(runner.game().dealer().len(), 2);

        let mut runner = Runner::with_game(Game::with_seed(6));
        let mut snapshots = Vec::new();
        let mut recorder = |state: &GameState| -> Result<String, Error> {
            snapshots.push(state.clone());
            Ok(if state.is_active() { "stand" } else { DEAL }.to_string())
        };
        runner.run(&mut recorder, HandLimit::Limited(200)).unwrap();
        for state in snapshots.iter().filter_map(GameState::resolved) {
            assert!(state.dealer_total >= 17);
            assert!(!state.player_bust);
        }
    }

    #[test]
    fn busted_player_skips_dealer_play() {
        let mut runner = unshuffled_runner();
        // Dealer King/Queen, player Jack/10: hitting draws the 9 and busts.
        let mut hit_once = |state: &GameState| -> Result<String, Error> {
            Ok(if state.is_active() { "hit" } else { END }.to_string())
        };
        runner.run(&mut hit_once, HandLimit::Unbounded).unwrap();
        assert!(runner.game().player_bust());
        assert_eq!(runner.game().dealer().len(), 2);
        assert_eq!(runner.game().player_total(), 29);
    }

    #[test]
    fn responder_sees_the_hand_in_order() {
        let mut runner = unshuffled_runner();
        let mut seen = Vec::new();
        let mut responder = |state: &GameState| -> Result<String, Error> {
            seen.push(state.clone());
            Ok(if state.is_active() { "stand" } else { END }.to_string())
        };
        runner.run(&mut responder, HandLimit::Unbounded).unwrap();

        assert_eq!(seen.len(), 2);
        let active = seen[0].active().unwrap();
        assert_eq!(active.player_total, 20);
        assert_eq!(active.dealer_upcard, 10);
        let resolved = seen[1].resolved().unwrap();
        assert_eq!(resolved.outcome, crate::Outcome::Push);
        assert_eq!(
            resolved.prev_state.as_ref().map(|prev| prev.key.to_string()),
            Some("H20-10".to_string())
        );
    }
}
