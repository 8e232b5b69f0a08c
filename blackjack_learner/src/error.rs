use thiserror::Error;

/// Every failure the game engine, the runner and the responders can report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a valid card rank: {0}")]
    InvalidRank(String),
    #[error("Not a valid card suit: {0}")]
    InvalidSuit(String),
    #[error("Cannot draw {requested} cards, only {remaining} left in the deck")]
    EmptyDeck { requested: usize, remaining: usize },
    #[error("Valid actions are 'hit' or 'stand', got '{0}'")]
    InvalidAction(String),
    #[error("Not a valid situation key: {0}")]
    InvalidSituationKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
