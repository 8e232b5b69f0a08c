use std::ops::AddAssign;

use super::{Card, Rank};

/// Hand total together with its soft/hard classification. Both come from one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Total {
    pub value: u16,
    /// True when one Ace is counted as 11.
    pub soft: bool,
}

/// Cards held by the dealer or the player, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(4),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn contains_ace(&self) -> bool {
        self.cards.iter().any(|card| card.rank == Rank::Ace)
    }

    /// Counts at most one Ace as 11, and only when the raw sum leaves room for it.
    pub fn total(&self) -> Total {
        let sum: u16 = self
            .cards
            .iter()
            .map(|card| card.blackjack_value() as u16)
            .sum();
        if sum <= 11 && self.contains_ace() {
            Total {
                value: sum + 10,
                soft: true,
            }
        } else {
            Total {
                value: sum,
                soft: false,
            }
        }
    }

    pub fn is_soft(&self) -> bool {
        self.total().soft
    }

    pub fn bust(&self) -> bool {
        self.total().value > 21
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

impl AddAssign<Card> for Hand {
    fn add_assign(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl AddAssign<Vec<Card>> for Hand {
    fn add_assign(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }
}

impl AddAssign<&[Card]> for Hand {
    fn add_assign(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
    }
}

impl AddAssign<Hand> for Hand {
    fn add_assign(&mut self, other: Hand) {
        self.cards.extend(other.cards);
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}
