use super::{Card, Rank, Suit};
use crate::Error;

use strum::IntoEnumIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// A standard 52-card deck. The top of the deck is the end of the card list.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a new deck with ordered cards: suit by suit, Ace to King within each suit.
    pub fn new() -> Deck {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card { rank, suit });
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draws `n` cards from the top, in draw order. Leaves the deck untouched if it cannot
    /// satisfy the whole request.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, Error> {
        if n > self.cards.len() {
            return Err(Error::EmptyDeck {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let start = self.cards.len() - n;
        let mut drawn = self.cards.split_off(start);
        drawn.reverse();
        Ok(drawn)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
