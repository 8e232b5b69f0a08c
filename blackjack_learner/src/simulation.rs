pub mod deck;
pub mod hand;
pub mod state;

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use strum_macros::EnumIter;

use crate::{Action, Error};

use self::deck::Deck;
use self::hand::Hand;
use self::state::{
    ActiveState, GameState, Outcome, OutcomeDescription, PrevState, ResolvedState, SituationKey,
};

static RANK_NAMES: [&str; 13] = [
    "Ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Blackjack value of the rank. Aces count 1 here; promotion to 11 is decided by the hand.
    pub fn blackjack_value(&self) -> u8 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            _ => *self as u8,
        }
    }

    pub fn name(&self) -> &'static str {
        RANK_NAMES[*self as usize - 1]
    }
}

impl TryFrom<u8> for Rank {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let rank = match value {
            1 => Rank::Ace,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => return Err(Error::InvalidRank(value.to_string())),
        };
        Ok(rank)
    }
}

/// Accepts the rank names `Ace`, `2`..`10`, `Jack`, `Queen` and `King`.
impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let face_value = RANK_NAMES
            .iter()
            .position(|name| *name == s)
            .ok_or_else(|| Error::InvalidRank(s.to_string()))?;
        Rank::try_from(face_value as u8 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Suit {
    Clubs = 0,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl FromStr for Suit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Clubs" => Ok(Suit::Clubs),
            "Diamonds" => Ok(Suit::Diamonds),
            "Hearts" => Ok(Suit::Hearts),
            "Spades" => Ok(Suit::Spades),
            _ => Err(Error::InvalidSuit(s.to_string())),
        }
    }
}

/// Represents a card in the real world with a suit and a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Builds a card from its rank and suit names, e.g. `Card::from_names("Ace", "Spades")`.
    pub fn from_names(rank: &str, suit: &str) -> Result<Self, Error> {
        Ok(Card {
            rank: rank.parse()?,
            suit: suit.parse()?,
        })
    }

    pub fn blackjack_value(&self) -> u8 {
        self.rank.blackjack_value()
    }

    /// Value of the card when shown as the dealer upcard. Aces report 11.
    pub fn upcard_value(&self) -> u8 {
        match self.rank {
            Rank::Ace => 11,
            _ => self.blackjack_value(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit.name())
    }
}

/// One player against a dealer who draws to 17.
///
/// There is no stored phase: the game is active while the player has neither stood nor busted,
/// and resolved otherwise.
pub struct Game {
    deck: Deck,
    rng: StdRng,
    dealer: Hand,
    player: Hand,
    player_standing: bool,
    prev_state: Option<PrevState>,
}

impl Game {
    /// Creates a game with a freshly shuffled deck and empty hands.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but every shuffle is driven by a generator seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a game drawing from the given deck as is. Replacement decks are still shuffled.
    pub fn from_deck(deck: Deck, rng: StdRng) -> Self {
        Self {
            deck,
            rng,
            dealer: Hand::new(),
            player: Hand::new(),
            player_standing: false,
            prev_state: None,
        }
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        Self::from_deck(deck, rng)
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn player_standing(&self) -> bool {
        self.player_standing
    }

    pub fn prev_state(&self) -> Option<&PrevState> {
        self.prev_state.as_ref()
    }

    /// True while the player can still choose to hit.
    pub fn active(&self) -> bool {
        !self.player_standing && !self.player_bust()
    }

    /// Value of the dealer's first card, with Ace reported as 11. Zero before the first deal.
    pub fn dealer_upcard(&self) -> u8 {
        self.dealer.cards().first().map_or(0, Card::upcard_value)
    }

    pub fn dealer_total(&self) -> u16 {
        self.dealer.total().value
    }

    pub fn player_total(&self) -> u16 {
        self.player.total().value
    }

    pub fn player_bust(&self) -> bool {
        self.player.bust()
    }

    pub fn dealer_bust(&self) -> bool {
        self.dealer.bust()
    }

    /// The situation the player is facing right now.
    pub fn situation_key(&self) -> SituationKey {
        let total = self.player.total();
        SituationKey::new(total.soft, total.value, self.dealer_upcard())
    }

    /// Removes old hands and deals new ones, dealer first.
    pub fn deal(&mut self) -> Result<(), Error> {
        self.prev_state = None;
        self.player_standing = false;
        self.dealer = Hand::from(self.safe_draw(2)?);
        self.player = Hand::from(self.safe_draw(2)?);
        Ok(())
    }

    /// Records the decision, then adds one card to the player's hand.
    pub fn player_hit(&mut self) -> Result<(), Error> {
        self.prev_state = Some(PrevState::new(self.situation_key(), Action::Hit));
        let cards = self.safe_draw(1)?;
        self.player += cards;
        Ok(())
    }

    pub fn player_stand(&mut self) {
        self.prev_state = Some(PrevState::new(self.situation_key(), Action::Stand));
        self.player_standing = true;
    }

    pub fn dealer_hit(&mut self) -> Result<(), Error> {
        let cards = self.safe_draw(1)?;
        self.dealer += cards;
        Ok(())
    }

    /// Rules are checked in order: higher unbusted total, dealer bust, equal totals, else loss.
    pub fn outcome(&self) -> Outcome {
        let player_total = self.player_total();
        let dealer_total = self.dealer_total();
        if !self.player_bust() && player_total > dealer_total {
            Outcome::Win
        } else if !self.player_bust() && self.dealer_bust() {
            Outcome::Win
        } else if player_total == dealer_total {
            Outcome::Push
        } else {
            Outcome::Loss
        }
    }

    pub fn outcome_description(&self) -> OutcomeDescription {
        match self.outcome() {
            Outcome::Win if self.dealer_bust() => OutcomeDescription::DealerBusted,
            Outcome::Win => OutcomeDescription::PlayerWon,
            Outcome::Loss if self.player_bust() => OutcomeDescription::PlayerBusted,
            Outcome::Loss => OutcomeDescription::DealerWon,
            Outcome::Push => OutcomeDescription::Tie,
        }
    }

    /// Snapshot of the game. An active snapshot never reveals the dealer total or the outcome.
    pub fn state(&self) -> GameState {
        if self.active() {
            let player = self.player.total();
            GameState::Active(ActiveState {
                player_total: player.value,
                dealer_upcard: self.dealer_upcard(),
                player_soft: player.soft,
                dealer_soft: self.dealer.total().soft,
                prev_state: self.prev_state.clone(),
            })
        } else {
            GameState::Resolved(ResolvedState {
                player_total: self.player_total(),
                dealer_total: self.dealer_total(),
                player_bust: self.player_bust(),
                dealer_bust: self.dealer_bust(),
                prev_state: self.prev_state.clone(),
                outcome: self.outcome(),
                description: self.outcome_description(),
            })
        }
    }

    /// Draws `n` cards, replacing an exhausted deck with a freshly shuffled one.
    fn safe_draw(&mut self, n: usize) -> Result<Vec<Card>, Error> {
        match self.deck.draw(n) {
            Ok(cards) => Ok(cards),
            Err(Error::EmptyDeck { remaining, .. }) => {
                log::debug!("deck exhausted with {} cards left, replacing", remaining);
                let mut deck = Deck::new();
                deck.shuffle(&mut self.rng);
                self.deck = deck;
                self.deck.draw(n)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: &str, suit: &str) -> Card {
        Card::from_names(rank, suit).unwrap()
    }

    fn unshuffled_game() -> Game {
        Game::from_deck(Deck::new(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn invalid_card_names_are_rejected() {
        assert!(matches!(
            Card::from_names("Six", "Diamonds"),
            Err(Error::InvalidRank(_))
        ));
        assert!(matches!(
            Card::from_names("Ace", "Octogons"),
            Err(Error::InvalidSuit(_))
        ));
        assert!(matches!(Rank::try_from(0), Err(Error::InvalidRank(_))));
        assert!(matches!(Rank::try_from(14), Err(Error::InvalidRank(_))));
    }

    #[test]
    fn valid_cards_display_by_name() {
        assert_eq!(card("6", "Clubs").to_string(), "6 of Clubs");
        assert_eq!(card("10", "Spades").to_string(), "10 of Spades");
        assert_eq!(card("Queen", "Hearts").to_string(), "Queen of Hearts");
    }

    #[test]
    fn card_values_follow_blackjack_rules() {
        assert_eq!(card("7", "Diamonds").blackjack_value(), 7);
        assert_eq!(card("Queen", "Hearts").blackjack_value(), 10);
        assert_eq!(card("Ace", "Clubs").blackjack_value(), 1);
        assert_eq!(card("Ace", "Clubs").upcard_value(), 11);
        assert_eq!(card("King", "Clubs").upcard_value(), 10);
    }

    #[test]
    fn new_game_has_full_deck_and_empty_hands() {
        let game = Game::with_seed(1);
        assert_eq!(game.deck().len(), 52);
        assert!(game.player().is_empty());
        assert!(game.dealer().is_empty());
        assert_eq!(game.dealer_upcard(), 0);
    }

    #[test]
    fn deal_replaces_an_exhausted_deck() {
        let mut game = Game::with_seed(3);
        game.deal().unwrap();
        assert_eq!(game.player().len(), 2);
        assert_eq!(game.dealer().len(), 2);

        game.deck.draw(46).unwrap();
        assert_eq!(game.deck().len(), 2);
        game.deal().unwrap();
        assert_eq!(game.player().len(), 2);
        assert_eq!(game.dealer().len(), 2);
        assert_eq!(game.deck().len(), 50);
    }

    #[test]
    fn upcard_reports_ace_as_eleven() {
        let mut game = unshuffled_game();
        game.dealer = Hand::from(vec![card("Ace", "Spades"), card("6", "Clubs")]);
        game.player = Hand::from(vec![card("Jack", "Clubs"), card("King", "Diamonds")]);
        assert_eq!(game.dealer_total(), 17);
        assert_eq!(game.dealer_upcard(), 11);
        assert_eq!(game.player_total(), 20);

        game.dealer = Hand::from(vec![card("7", "Spades"), card("6", "Clubs")]);
        assert_eq!(game.dealer_upcard(), 7);
    }

    #[test]
    fn bust_is_derived_from_totals() {
        let mut game = unshuffled_game();
        game.dealer = Hand::from(vec![card("Ace", "Spades"), card("6", "Clubs")]);
        game.player = Hand::from(vec![card("Jack", "Clubs"), card("King", "Diamonds")]);
        assert!(!game.dealer_bust());
        assert!(!game.player_bust());

        game.dealer += vec![card("10", "Hearts"), card("Jack", "Diamonds")];
        game.player += vec![card("Ace", "Clubs"), card("Ace", "Hearts")];
        assert!(game.player_bust());
        assert!(game.dealer_bust());
        assert!(!game.active());
    }

    #[test]
    fn stand_resolves_the_hand() {
        let mut game = unshuffled_game();
        game.deal().unwrap();
        assert!(!game.player_standing());
        assert!(game.active());

        game.player_stand();
        assert!(game.player_standing());
        assert!(!game.active());
    }

    #[test]
    fn hits_add_cards() {
        let mut game = unshuffled_game();
        game.deal().unwrap();
        let (p_total, p_len) = (game.player_total(), game.player().len());
        game.player_hit().unwrap();
        assert!(game.player_total() > p_total);
        assert!(game.player().len() > p_len);

        let (d_total, d_len) = (game.dealer_total(), game.dealer().len());
        game.dealer_hit().unwrap();
        assert!(game.dealer().len() > d_len);
        assert!(game.dealer_total() > d_total);
    }

    #[test]
    fn hit_records_the_situation_key() {
        let mut game = unshuffled_game();
        game.deal().unwrap();
        game.deal().unwrap();
        assert!(game.prev_state().is_none());

        game.player_hit().unwrap();
        let prev = game.prev_state().unwrap();
        assert_eq!(prev.key.to_string(), "H13-9");
        assert_eq!(prev.action, Action::Hit);
    }

    #[test]
    fn dealer_hit_leaves_the_decision_untouched() {
        let mut game = unshuffled_game();
        game.deal().unwrap();
        game.player_stand();
        let before = game.prev_state().cloned();
        game.dealer_hit().unwrap();
        assert_eq!(game.prev_state().cloned(), before);
    }

    #[test]
    fn snapshots_follow_the_dealt_cards() {
        let mut game = unshuffled_game();

        // Dealer King/Queen, player Jack/10.
        game.deal().unwrap();
        match game.state() {
            GameState::Active(state) => {
                assert_eq!(state.player_total, 20);
                assert_eq!(state.dealer_upcard, 10);
                assert!(!state.player_soft);
                assert!(state.prev_state.is_none());
            }
            GameState::Resolved(_) => panic!("freshly dealt hand should be active"),
        }
        game.player_stand();
        let state = game.state().resolved().cloned().unwrap();
        assert_eq!(state.player_total, 20);
        assert_eq!(state.dealer_total, 20);
        assert!(!state.player_bust);
        assert!(!state.dealer_bust);
        assert_eq!(state.outcome, Outcome::Push);
        assert_eq!(state.description, OutcomeDescription::Tie);

        // Dealer 9/8, player 7/6, then a 5.
        game.deal().unwrap();
        game.player_hit().unwrap();
        game.player_stand();
        let state = game.state().resolved().cloned().unwrap();
        assert_eq!(state.player_total, 18);
        assert_eq!(state.dealer_total, 17);
        assert_eq!(state.outcome, Outcome::Win);
        assert_eq!(state.description, OutcomeDescription::PlayerWon);

        // Dealer 4/3, player 2/Ace, then King and Queen of Hearts.
        game.deal().unwrap();
        game.player_hit().unwrap();
        game.player_hit().unwrap();
        let state = game.state().resolved().cloned().unwrap();
        assert_eq!(state.player_total, 23);
        assert_eq!(state.dealer_total, 7);
        assert!(state.player_bust);
        assert!(!state.dealer_bust);
        assert_eq!(state.outcome, Outcome::Loss);
        assert_eq!(state.description, OutcomeDescription::PlayerBusted);

        // Dealer Jack/10 of Hearts, player 9/8, dealer draws the 7.
        game.deal().unwrap();
        game.player_stand();
        game.dealer_hit().unwrap();
        let state = game.state().resolved().cloned().unwrap();
        assert_eq!(state.player_total, 17);
        assert_eq!(state.dealer_total, 27);
        assert!(!state.player_bust);
        assert!(state.dealer_bust);
        assert_eq!(state.outcome, Outcome::Win);
        assert_eq!(state.description, OutcomeDescription::DealerBusted);
    }

    #[test]
    fn player_bust_loses_against_a_standing_dealer() {
        let mut game = unshuffled_game();
        game.player = Hand::from(vec![
            card("King", "Clubs"),
            card("Queen", "Clubs"),
            card("3", "Clubs"),
        ]);
        game.dealer = Hand::from(vec![card("King", "Hearts"), card("Queen", "Hearts")]);
        assert_eq!(game.outcome(), Outcome::Loss);
        assert_eq!(game.outcome_description(), OutcomeDescription::PlayerBusted);
    }

    #[test]
    fn equal_totals_are_checked_before_falling_through_to_loss() {
        let mut game = unshuffled_game();
        game.player = Hand::from(vec![
            card("King", "Clubs"),
            card("Queen", "Clubs"),
            card("3", "Clubs"),
        ]);
        game.dealer = Hand::from(vec![
            card("King", "Hearts"),
            card("Queen", "Hearts"),
            card("3", "Hearts"),
        ]);
        assert!(game.player_bust() && game.dealer_bust());
        assert_eq!(game.outcome(), Outcome::Push);
        assert_eq!(game.outcome_description(), OutcomeDescription::Tie);
    }

    #[test]
    fn dealer_higher_total_is_a_loss() {
        let mut game = unshuffled_game();
        game.player = Hand::from(vec![card("King", "Clubs"), card("7", "Clubs")]);
        game.dealer = Hand::from(vec![card("King", "Hearts"), card("9", "Hearts")]);
        assert_eq!(game.outcome(), Outcome::Loss);
        assert_eq!(game.outcome_description(), OutcomeDescription::DealerWon);
    }
}
